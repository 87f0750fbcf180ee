use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Note {
    id: Uuid,
    course_id: Uuid,
    teacher_id: Uuid,
    title: String,
    content: Option<String>,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Note {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Note
    }
}

impl Note {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct NoteCreate {
    pub course_id: Uuid,
    #[serde(skip)]
    pub teacher_id: Uuid,
    pub title: String,
    pub content: Option<String>,
}

impl Note {
    pub async fn create(mm: &ModelManager, data: NoteCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO notes (id, course_id, teacher_id, title, content)
            VALUES ($1,$2,$3,$4,$5)
            RETURNING id, course_id, teacher_id, title, content, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.course_id)
        .bind(data.teacher_id)
        .bind(&data.title)
        .bind(&data.content)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn list_by_course(mm: &ModelManager, course_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result =
            sqlx::query_as("SELECT * FROM notes WHERE course_id = $1 ORDER BY created_at DESC")
                .bind(course_id)
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }
}

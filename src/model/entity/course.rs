use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Course {
    id: Uuid,
    title: String,
    description: String,
    class_year: String,
    branch: String,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Course
    }
}

impl Course {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_by(&self) -> Uuid {
        self.created_by
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CourseCreate {
    pub title: String,
    pub description: String,
    pub class_year: String,
    pub branch: String,
    #[serde(skip)]
    pub created_by: Uuid,
}

impl Course {
    pub async fn create(mm: &ModelManager, data: CourseCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO courses (id, title, description, class_year, branch, created_by)
            VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING id, title, description, class_year, branch, created_by, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.class_year)
        .bind(&data.branch)
        .bind(data.created_by)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn list_all(mm: &ModelManager) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM courses ORDER BY created_at DESC")
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn list_by_teacher(mm: &ModelManager, teacher_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result =
            sqlx::query_as("SELECT * FROM courses WHERE created_by = $1 ORDER BY created_at DESC")
                .bind(teacher_id)
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }
}

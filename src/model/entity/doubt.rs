use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DoubtStatus {
    Open,
    Resolved,
}

impl DoubtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Doubt {
    id: Uuid,
    course_id: Uuid,
    student_id: Uuid,
    title: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Doubt {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Doubt
    }
}

impl Doubt {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DoubtCreate {
    pub course_id: Uuid,
    #[serde(skip)]
    pub student_id: Uuid,
    pub title: String,
    pub description: String,
}

impl Doubt {
    pub async fn create(mm: &ModelManager, data: DoubtCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO doubts (id, course_id, student_id, title, description)
            VALUES ($1,$2,$3,$4,$5)
            RETURNING id, course_id, student_id, title, description, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.course_id)
        .bind(data.student_id)
        .bind(&data.title)
        .bind(&data.description)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM doubts WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn list_by_course(mm: &ModelManager, course_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result =
            sqlx::query_as("SELECT * FROM doubts WHERE course_id = $1 ORDER BY created_at DESC")
                .bind(course_id)
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }

    pub async fn set_status(mm: &ModelManager, id: Uuid, status: DoubtStatus) -> DatabaseResult<()> {
        sqlx::query("UPDATE doubts SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(mm.executor())
            .await?;
        Ok(())
    }
}

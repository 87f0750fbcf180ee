use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct DoubtComment {
    id: Uuid,
    doubt_id: Uuid,
    author_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for DoubtComment {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::DoubtComment
    }
}

impl DoubtComment {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DoubtCommentCreate {
    #[serde(skip)]
    pub doubt_id: Uuid,
    #[serde(skip)]
    pub author_id: Uuid,
    pub text: String,
}

impl DoubtComment {
    pub async fn create(mm: &ModelManager, data: DoubtCommentCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO doubt_comments (id, doubt_id, author_id, text)
            VALUES ($1,$2,$3,$4)
            RETURNING id, doubt_id, author_id, text, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.doubt_id)
        .bind(data.author_id)
        .bind(&data.text)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }
}

// Utils

/// Comment joined with its author, as shown in the doubt thread.
#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct DoubtCommentWithAuthorRow {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_role: String,
}

impl DoubtCommentWithAuthorRow {
    pub async fn list_by_doubt(mm: &ModelManager, doubt_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                dc.id,
                dc.text,
                dc.created_at,
                dc.author_id,
                u.name AS author_name,
                u.role AS author_role
            FROM doubt_comments dc
            JOIN users u ON u.id = dc.author_id
            WHERE dc.doubt_id = $1
            ORDER BY dc.created_at ASC
            "#,
        )
        .bind(doubt_id)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}

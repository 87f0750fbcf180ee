use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use crate::web::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct UserEntity {
    id: Uuid,
    name: String,
    email: String,
    #[serde(skip)]
    password_hash: String,
    mobile: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for UserEntity {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::User
    }
}

impl UserEntity {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        UserRole::from(self.role.as_str())
    }
}

#[derive(Debug)]
pub struct UserEntityCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub mobile: String,
    pub role: UserRole,
}

impl UserEntity {
    /// Inserts the user row. Takes any executor so registration can pair it
    /// with the profile insert in one transaction.
    pub async fn create<'e>(
        exec: impl sqlx::PgExecutor<'e>,
        data: UserEntityCreate,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, password_hash, mobile, role)
            VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING id, name, email, password_hash, mobile, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.mobile)
        .bind(data.role.to_string())
        .fetch_one(exec)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn find_by_email(mm: &ModelManager, email: &str) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}

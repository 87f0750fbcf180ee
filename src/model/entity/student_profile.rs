use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct StudentProfile {
    id: Uuid,
    user_id: Uuid,
    class_year: String,
    branch: String,
    college_name: Option<String>,
    xp: i32,
    #[schema(value_type = Vec<String>)]
    badges: Json<Vec<String>>,
}

impl ResourceTyped for StudentProfile {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::StudentProfile
    }
}

impl StudentProfile {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn class_year(&self) -> &str {
        &self.class_year
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn xp(&self) -> i32 {
        self.xp
    }

    pub fn badges(&self) -> &[String] {
        &self.badges.0
    }
}

#[derive(Debug)]
pub struct StudentProfileCreate {
    pub user_id: Uuid,
    pub class_year: String,
    pub branch: String,
    pub college_name: Option<String>,
}

impl StudentProfile {
    pub async fn create<'e>(
        exec: impl sqlx::PgExecutor<'e>,
        data: StudentProfileCreate,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO student_profiles (id, user_id, class_year, branch, college_name)
            VALUES ($1,$2,$3,$4,$5)
            RETURNING id, user_id, class_year, branch, college_name, xp, badges
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(&data.class_year)
        .bind(&data.branch)
        .bind(&data.college_name)
        .fetch_one(exec)
        .await?;

        Ok(row)
    }

    pub async fn find_by_user(mm: &ModelManager, user_id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM student_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    /// Adds XP and unions badges in a single statement.
    ///
    /// The increment and the jsonb union read their operands inside the
    /// statement, so concurrent submissions for the same student cannot lose
    /// updates. Takes any executor so the submit handler can run it inside
    /// the attempt transaction.
    pub async fn award_xp_and_badges<'e>(
        exec: impl sqlx::PgExecutor<'e>,
        user_id: Uuid,
        xp_delta: i32,
        new_badges: &[String],
    ) -> DatabaseResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE student_profiles
            SET xp = xp + $2,
                badges = (
                    SELECT COALESCE(jsonb_agg(DISTINCT badge), '[]'::jsonb)
                    FROM jsonb_array_elements_text(badges || $3::jsonb) AS t(badge)
                )
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(xp_delta)
        .bind(Json(new_badges))
        .execute(exec)
        .await?;

        if result.rows_affected() == 0 {
            // no profile row: surface as not-found instead of quietly dropping XP
            return Err(sqlx::Error::RowNotFound.into());
        }
        Ok(())
    }
}

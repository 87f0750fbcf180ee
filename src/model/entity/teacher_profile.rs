use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct TeacherProfile {
    id: Uuid,
    user_id: Uuid,
    department: String,
    experience_years: i32,
    status: String,
    test_score: Option<i32>,
}

impl ResourceTyped for TeacherProfile {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::TeacherProfile
    }
}

impl TeacherProfile {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn test_score(&self) -> Option<i32> {
        self.test_score
    }
}

#[derive(Debug)]
pub struct TeacherProfileCreate {
    pub user_id: Uuid,
    pub department: String,
    pub experience_years: i32,
}

impl TeacherProfile {
    pub async fn create<'e>(
        exec: impl sqlx::PgExecutor<'e>,
        data: TeacherProfileCreate,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO teacher_profiles (id, user_id, department, experience_years)
            VALUES ($1,$2,$3,$4)
            RETURNING id, user_id, department, experience_years, status, test_score
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(&data.department)
        .bind(data.experience_years)
        .fetch_one(exec)
        .await?;

        Ok(row)
    }

    pub async fn find_by_user(mm: &ModelManager, user_id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM teacher_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn set_verification(
        mm: &ModelManager,
        user_id: Uuid,
        status: &str,
        test_score: i32,
    ) -> DatabaseResult<()> {
        sqlx::query("UPDATE teacher_profiles SET status = $2, test_score = $3 WHERE user_id = $1")
            .bind(user_id)
            .bind(status)
            .bind(test_score)
            .execute(mm.executor())
            .await?;
        Ok(())
    }
}

// Utils

/// Dashboard counters for one teacher, computed in a single round trip.
#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct TeacherStats {
    pub courses_count: i64,
    pub notes_count: i64,
    pub quizzes_count: i64,
    pub attempts_count: i64,
}

impl TeacherStats {
    pub async fn for_teacher(mm: &ModelManager, teacher_id: Uuid) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM courses WHERE created_by = $1) AS courses_count,
                (SELECT COUNT(*) FROM notes WHERE teacher_id = $1) AS notes_count,
                (SELECT COUNT(*)
                    FROM quizzes q
                    JOIN courses c ON c.id = q.course_id
                    WHERE c.created_by = $1) AS quizzes_count,
                (SELECT COUNT(*)
                    FROM quiz_attempts qa
                    JOIN quizzes q ON q.id = qa.quiz_id
                    JOIN courses c ON c.id = q.course_id
                    WHERE c.created_by = $1) AS attempts_count
            "#,
        )
        .bind(teacher_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }
}

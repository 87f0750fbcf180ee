use std::collections::BTreeMap;

use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct QuizAttempt {
    id: Uuid,
    quiz_id: Uuid,
    student_id: Uuid,
    score: i32,
    total_questions: i32,
    accuracy: i32,
    time_taken_seconds: i32,
    xp_earned: i32,
    #[schema(value_type = Object)]
    answers: Json<BTreeMap<u32, i64>>,
    completed_at: DateTime<Utc>,
}

impl ResourceTyped for QuizAttempt {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::QuizAttempt
    }
}

impl QuizAttempt {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quiz_id(&self) -> Uuid {
        self.quiz_id
    }

    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn accuracy(&self) -> i32 {
        self.accuracy
    }

    pub fn xp_earned(&self) -> i32 {
        self.xp_earned
    }
}

#[derive(Debug)]
pub struct QuizAttemptCreate {
    pub quiz_id: Uuid,
    pub student_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub accuracy: i32,
    pub time_taken_seconds: i32,
    pub xp_earned: i32,
    pub answers: BTreeMap<u32, i64>,
}

impl QuizAttempt {
    /// Inserts the attempt row. Takes any executor so the submit handler can
    /// pair it with the XP/badge update in one transaction.
    pub async fn create<'e>(
        exec: impl sqlx::PgExecutor<'e>,
        data: QuizAttemptCreate,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO quiz_attempts
                (id, quiz_id, student_id, score, total_questions, accuracy,
                 time_taken_seconds, xp_earned, answers)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
            RETURNING id, quiz_id, student_id, score, total_questions, accuracy,
                      time_taken_seconds, xp_earned, answers, completed_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.quiz_id)
        .bind(data.student_id)
        .bind(data.score)
        .bind(data.total_questions)
        .bind(data.accuracy)
        .bind(data.time_taken_seconds)
        .bind(data.xp_earned)
        .bind(Json(&data.answers))
        .fetch_one(exec)
        .await?;

        Ok(row)
    }

    pub async fn list_by_student(mm: &ModelManager, student_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM quiz_attempts WHERE student_id = $1 ORDER BY completed_at DESC",
        )
        .bind(student_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }
}

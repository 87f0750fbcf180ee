use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizQuestion {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub difficulty: Difficulty,
}

/// A quiz is immutable once created: there are no update operations.
#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Quiz {
    id: Uuid,
    course_id: Uuid,
    notes_id: Option<Uuid>,
    created_by: Uuid,
    title: String,
    #[schema(value_type = Vec<QuizQuestion>)]
    questions: Json<Vec<QuizQuestion>>,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Quiz {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Quiz
    }
}

impl Quiz {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions.0
    }
}

#[derive(Debug)]
pub struct QuizCreate {
    pub course_id: Uuid,
    pub notes_id: Option<Uuid>,
    pub created_by: Uuid,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub async fn create(mm: &ModelManager, data: QuizCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO quizzes (id, course_id, notes_id, created_by, title, questions)
            VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING id, course_id, notes_id, created_by, title, questions, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.course_id)
        .bind(data.notes_id)
        .bind(data.created_by)
        .bind(&data.title)
        .bind(Json(&data.questions))
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM quizzes WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn list_by_course(mm: &ModelManager, course_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result =
            sqlx::query_as("SELECT * FROM quizzes WHERE course_id = $1 ORDER BY created_at DESC")
                .bind(course_id)
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::{Difficulty, Quiz};
use crate::model::scoring::AttemptScore;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GenerateQuizRequest {
    pub notes_id: Uuid,
    pub title: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct QuizSubmitRequest {
    /// Question index -> chosen option index. Sparse maps are allowed;
    /// unanswered questions count as incorrect.
    pub answers: BTreeMap<u32, i64>,
    pub time_taken_seconds: i64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizSubmitResponse {
    pub score: i32,
    pub accuracy: i32,
    pub time_taken_seconds: i64,
    pub xp_earned: i32,
    pub new_badges: Vec<String>,
}

impl QuizSubmitResponse {
    pub fn from_score(score: AttemptScore, time_taken_seconds: i64) -> Self {
        Self {
            score: score.correct_count,
            accuracy: score.accuracy,
            time_taken_seconds,
            xp_earned: score.xp_earned,
            new_badges: score.new_badges,
        }
    }
}

/// A question as shown to students: the correct option index is stripped.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizQuestionPublic {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub questions: Vec<QuizQuestionPublic>,
}

impl QuizResponse {
    pub fn from_entity(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id(),
            course_id: quiz.course_id(),
            title: quiz.title().to_string(),
            questions: quiz
                .questions()
                .iter()
                .map(|q| QuizQuestionPublic {
                    id: q.id.clone(),
                    question_text: q.question_text.clone(),
                    options: q.options.clone(),
                    difficulty: q.difficulty,
                })
                .collect(),
        }
    }
}

//! Leaderboard and rank queries.
//!
//! Standings are always computed at read time from the aggregate state, each
//! as a single grouped query. Ties on XP break on student id ascending so the
//! ordering (and therefore ranks) is deterministic.

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::model::{ModelManager, error::DatabaseResult};

/// One unranked global standings row; ranks are assigned by position after
/// the ordered fetch.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct GlobalStandingRow {
    pub user_id: Uuid,
    pub name: String,
    pub class_year: String,
    pub branch: String,
    pub xp: i32,
    pub badges: Json<Vec<String>>,
    /// Average accuracy over all of this student's attempts, 0 with none.
    pub accuracy: i32,
}

impl GlobalStandingRow {
    /// Every profiled student, ordered by XP descending. Accuracy is folded
    /// in by the same query; a per-student lookup loop would be O(n) round
    /// trips for no reason.
    pub async fn fetch_all(mm: &ModelManager) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                u.id AS user_id,
                u.name,
                sp.class_year,
                sp.branch,
                sp.xp,
                sp.badges,
                COALESCE(ROUND(AVG(qa.accuracy)), 0)::INT AS accuracy
            FROM student_profiles sp
            JOIN users u ON u.id = sp.user_id
            LEFT JOIN quiz_attempts qa ON qa.student_id = sp.user_id
            GROUP BY u.id, u.name, sp.class_year, sp.branch, sp.xp, sp.badges
            ORDER BY sp.xp DESC, u.id ASC
            "#,
        )
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}

/// One unranked course standings row. Only students with at least one attempt
/// on a quiz of the course appear.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct CourseStandingRow {
    pub user_id: Uuid,
    pub name: String,
    pub class_year: String,
    pub branch: String,
    /// XP earned from attempts in this course only, not the global aggregate.
    pub course_xp: i32,
    pub accuracy: i32,
}

impl CourseStandingRow {
    pub async fn fetch_for_course(
        mm: &ModelManager,
        course_id: Uuid,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                qa.student_id AS user_id,
                u.name,
                sp.class_year,
                sp.branch,
                SUM(qa.xp_earned)::INT AS course_xp,
                COALESCE(ROUND(AVG(qa.accuracy)), 0)::INT AS accuracy
            FROM quiz_attempts qa
            JOIN quizzes q ON q.id = qa.quiz_id
            JOIN users u ON u.id = qa.student_id
            JOIN student_profiles sp ON sp.user_id = qa.student_id
            WHERE q.course_id = $1
            GROUP BY qa.student_id, u.name, sp.class_year, sp.branch
            ORDER BY course_xp DESC, qa.student_id ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct StudentRank {
    pub rank: i64,
    pub total_students: i64,
}

impl StudentRank {
    /// Position in the global (xp DESC, user_id ASC) ordering without
    /// materializing the whole leaderboard: count the profiles strictly
    /// ahead, plus the total. `None` when the student has no profile.
    pub async fn fetch(mm: &ModelManager, student_id: Uuid) -> DatabaseResult<Option<Self>> {
        let row = sqlx::query_as(
            r#"
            SELECT
                ((SELECT COUNT(*)
                    FROM student_profiles o
                    WHERE o.xp > sp.xp
                       OR (o.xp = sp.xp AND o.user_id < sp.user_id)) + 1) AS rank,
                (SELECT COUNT(*) FROM student_profiles) AS total_students
            FROM student_profiles sp
            WHERE sp.user_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(mm.executor())
        .await?;

        Ok(row)
    }
}

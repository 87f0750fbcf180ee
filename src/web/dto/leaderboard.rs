use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::leaderboard::{CourseStandingRow, GlobalStandingRow};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GlobalLeaderboardEntry {
    pub rank: usize,
    pub user_id: Uuid,
    pub name: String,
    pub class_year: String,
    pub branch: String,
    pub xp: i32,
    pub badges: Vec<String>,
    pub accuracy: i32,
}

impl GlobalLeaderboardEntry {
    /// Assigns 1-based sequential ranks by position. The rows arrive already
    /// ordered; ties share XP but never a rank.
    pub fn ranked(rows: Vec<GlobalStandingRow>) -> Vec<Self> {
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| Self {
                rank: i + 1,
                user_id: row.user_id,
                name: row.name,
                class_year: row.class_year,
                branch: row.branch,
                xp: row.xp,
                badges: row.badges.0,
                accuracy: row.accuracy,
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CourseLeaderboardEntry {
    pub rank: usize,
    pub user_id: Uuid,
    pub name: String,
    pub class_year: String,
    pub branch: String,
    pub course_xp: i32,
    pub accuracy: i32,
}

impl CourseLeaderboardEntry {
    pub fn ranked(rows: Vec<CourseStandingRow>) -> Vec<Self> {
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| Self {
                rank: i + 1,
                user_id: row.user_id,
                name: row.name,
                class_year: row.class_year,
                branch: row.branch,
                course_xp: row.course_xp,
                accuracy: row.accuracy,
            })
            .collect()
    }
}

pub mod auth;
pub mod leaderboard;
pub mod quizzes;
pub mod teacher;

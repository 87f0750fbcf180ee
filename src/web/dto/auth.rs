use serde::{Deserialize, Serialize};

use crate::model::entity::{StudentProfile, TeacherProfile, UserEntity};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct StudentRegisterRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub class_year: String,
    pub branch: String,
    pub college_name: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TeacherRegisterRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub department: String,
    pub experience_years: i32,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentAuthResponse {
    pub user: UserEntity,
    pub profile: StudentProfile,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeacherAuthResponse {
    pub user: UserEntity,
    pub profile: TeacherProfile,
}

#[derive(Debug, Clone)]
pub enum ResourceType {
    User,
    StudentProfile,
    TeacherProfile,
    Course,
    Note,
    Quiz,
    QuizAttempt,
    Doubt,
    DoubtComment,
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

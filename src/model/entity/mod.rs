mod user;
pub use user::{UserEntity, UserEntityCreate};

mod student_profile;
pub use student_profile::{StudentProfile, StudentProfileCreate};

mod teacher_profile;
pub use teacher_profile::{TeacherProfile, TeacherProfileCreate, TeacherStats};

mod course;
pub use course::{Course, CourseCreate};

mod note;
pub use note::{Note, NoteCreate};

mod quiz;
pub use quiz::{Difficulty, Quiz, QuizCreate, QuizQuestion};

mod quiz_attempt;
pub use quiz_attempt::{QuizAttempt, QuizAttemptCreate};

mod doubt;
pub use doubt::{Doubt, DoubtCreate, DoubtStatus};

mod doubt_comment;
pub use doubt_comment::{DoubtComment, DoubtCommentCreate, DoubtCommentWithAuthorRow};

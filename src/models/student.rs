use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub class_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudentRequest {
    pub name: String,
    pub class_name: String,
}

/// Public listing shape for `GET /students`; ids are not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub name: String,
    pub class_name: String,
}

impl From<Student> for StudentSummary {
    fn from(student: Student) -> Self {
        Self {
            name: student.name,
            class_name: student.class_name,
        }
    }
}

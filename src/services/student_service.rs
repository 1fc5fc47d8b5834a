use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::repository;
use crate::error::AppError;
use crate::models::{NewStudentRequest, Student};

pub struct StudentService {
    db: SqlitePool,
}

impl StudentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Registers a student. Names are unique.
    pub async fn add_student(&self, req: NewStudentRequest) -> Result<Student, AppError> {
        if req.name.trim().is_empty() || req.class_name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "name and class_name must not be empty".to_string(),
            ));
        }

        if repository::find_student_by_name(&self.db, &req.name).await?.is_some() {
            warn!("Rejecting duplicate student name: {}", req.name);
            return Err(duplicate());
        }

        match repository::insert_student(&self.db, req).await {
            Ok(student) => {
                info!("Added student {} ({}) in class {}", student.id, student.name, student.class_name);
                Ok(student)
            }
            // lost a race with a concurrent insert of the same name
            Err(e) if is_unique_violation(&e) => Err(duplicate()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        Ok(repository::fetch_students(&self.db).await?)
    }
}

fn duplicate() -> AppError {
    AppError::DuplicateResource("Student already exists".to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

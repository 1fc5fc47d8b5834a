use sqlx::SqlitePool;

use crate::services::{AttendanceService, StudentService};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn students(&self) -> StudentService {
        StudentService::new(self.db.clone())
    }

    pub fn attendance(&self) -> AttendanceService {
        AttendanceService::new(self.db.clone())
    }
}

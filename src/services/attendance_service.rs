use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::repository;
use crate::error::AppError;
use crate::models::{AttendanceRecord, AttendanceState, date_matches_prefix};
use crate::validation::parse_attendance;

pub struct AttendanceService {
    db: SqlitePool,
}

impl AttendanceService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Validates a raw submission, checks the student exists, then stores an
    /// `Active` record.
    ///
    /// Malformed payloads are rejected before the store is touched.
    pub async fn add_attendance(&self, payload: &Value) -> Result<AttendanceRecord, AppError> {
        let req = parse_attendance(payload).map_err(|e| {
            warn!("Rejecting attendance payload: {}", e);
            AppError::from(e)
        })?;

        if repository::find_student_by_id(&self.db, req.student_id).await?.is_none() {
            warn!("Attendance submitted for unknown student {}", req.student_id);
            return Err(AppError::NotFound("Student not found".to_string()));
        }

        let record = repository::insert_attendance(&self.db, req).await?;
        info!(
            "Added attendance {} for student {} on {} ({})",
            record.id, record.student_id, record.date, record.status
        );
        Ok(record)
    }

    /// Every record, soft-deleted ones included.
    pub async fn list_all_attendance(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(repository::fetch_attendance(&self.db).await?)
    }

    pub async fn list_active_by_date_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        self.list_by_date_prefix(AttendanceState::Active, prefix).await
    }

    pub async fn list_deleted_by_date_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        self.list_by_date_prefix(AttendanceState::Deleted, prefix).await
    }

    pub async fn soft_delete(&self, id: i64) -> Result<AttendanceRecord, AppError> {
        self.transition(id, AttendanceState::Deleted).await
    }

    pub async fn restore(&self, id: i64) -> Result<AttendanceRecord, AppError> {
        self.transition(id, AttendanceState::Active).await
    }

    async fn list_by_date_prefix(
        &self,
        state: AttendanceState,
        prefix: &str,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = repository::fetch_attendance_by_deleted(&self.db, state.is_deleted()).await?;
        Ok(records
            .into_iter()
            .filter(|r| date_matches_prefix(&r.date, prefix))
            .collect())
    }

    /// Moves a record into `target`. Valid from either state.
    async fn transition(
        &self,
        id: i64,
        target: AttendanceState,
    ) -> Result<AttendanceRecord, AppError> {
        let mut record = repository::find_attendance_by_id(&self.db, id)
            .await?
            .ok_or_else(|| {
                warn!("Attendance {} not found", id);
                AppError::NotFound("Record not found".to_string())
            })?;

        if record.state() != target {
            if !repository::set_attendance_deleted(&self.db, id, target.is_deleted()).await? {
                return Err(AppError::NotFound("Record not found".to_string()));
            }
            record.is_deleted = target.is_deleted();
        }

        info!("Attendance {} is now {:?}", id, target);
        Ok(record)
    }
}

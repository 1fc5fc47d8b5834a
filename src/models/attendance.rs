use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Canonical rendering used for prefix filtering and storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub is_deleted: bool,
}

impl AttendanceRecord {
    pub fn state(&self) -> AttendanceState {
        AttendanceState::from_flag(self.is_deleted)
    }
}

/// Typed form of an attendance submission, produced by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendanceRequest {
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: String,
}

/// Soft-delete lifecycle of an attendance record.
///
/// Records start `Active`. `Active -> Deleted` and `Deleted -> Active` are
/// both allowed from either state, so repeating a transition is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceState {
    Active,
    Deleted,
}

impl AttendanceState {
    pub fn from_flag(is_deleted: bool) -> Self {
        if is_deleted {
            Self::Deleted
        } else {
            Self::Active
        }
    }

    pub fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// Byte-wise prefix match against the `YYYY-MM-DD` rendering of `date`.
pub fn date_matches_prefix(date: &NaiveDate, prefix: &str) -> bool {
    date.format(DATE_FORMAT).to_string().starts_with(prefix)
}

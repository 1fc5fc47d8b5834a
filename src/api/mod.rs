use axum::Json;
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

const STUDENT_RECORD: &str = "Student";
const ATTENDANCE_RECORD: &str = "Attendance";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/students", get(list_students).post(create_student))
        .route("/attendance", post(create_attendance))
        .route("/attendance/all", get(list_all_attendance))
        .route(
            "/attendance/restore/{attendance_id}",
            get(list_deleted_under_restore).put(restore_attendance),
        )
        .route(
            "/attendance/{day_month}",
            get(list_active_attendance).delete(delete_attendance),
        )
        .route("/attendance/{day_month}/deleted", get(list_deleted_attendance))
        .with_state(state)
}

/// Failed write: the envelope still carries the message in `data`, while the
/// status code reflects the error kind.
struct EnvelopeError {
    status: StatusCode,
    envelope: ResponseEnvelope,
}

impl EnvelopeError {
    fn new(err: AppError, param: Value, record: &str) -> Self {
        Self {
            status: err.status_code(),
            envelope: ResponseEnvelope::post(
                param,
                record,
                format!("Error occurred: {}", err.public_message()),
            ),
        }
    }
}

impl IntoResponse for EnvelopeError {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudentRequest>,
) -> Result<Json<ResponseEnvelope>, EnvelopeError> {
    let param = json!({ "name": req.name, "class_name": req.class_name });

    match state.students().add_student(req).await {
        Ok(_) => Ok(Json(ResponseEnvelope::post(
            param,
            STUDENT_RECORD,
            "Successfully Added Student.",
        ))),
        Err(err) => Err(EnvelopeError::new(err, param, STUDENT_RECORD)),
    }
}

async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentSummary>>, AppError> {
    let students = state.students().list_students().await?;
    Ok(Json(students.into_iter().map(StudentSummary::from).collect()))
}

async fn create_attendance(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<ResponseEnvelope>, EnvelopeError> {
    match state.attendance().add_attendance(&payload).await {
        Ok(record) => Ok(Json(ResponseEnvelope::post(
            payload,
            ATTENDANCE_RECORD,
            format!(
                "Attendance added successfully for student_id {}",
                record.student_id
            ),
        ))),
        Err(err) => Err(EnvelopeError::new(err, payload, ATTENDANCE_RECORD)),
    }
}

async fn list_all_attendance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let records = state.attendance().list_all_attendance().await?;
    Ok(Json(records))
}

async fn list_active_attendance(
    State(state): State<AppState>,
    Path(day_month): Path<String>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let records = state
        .attendance()
        .list_active_by_date_prefix(&day_month)
        .await?;
    Ok(Json(records))
}

async fn list_deleted_attendance(
    State(state): State<AppState>,
    Path(day_month): Path<String>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let records = state
        .attendance()
        .list_deleted_by_date_prefix(&day_month)
        .await?;
    Ok(Json(records))
}

/// `GET /attendance/restore/deleted` lands on the restore route, so the
/// deleted listing for the literal prefix `restore` is served here.
async fn list_deleted_under_restore(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    if segment != "deleted" {
        return Err(AppError::NotFound("Not found".to_string()));
    }
    let records = state
        .attendance()
        .list_deleted_by_date_prefix("restore")
        .await?;
    Ok(Json(records))
}

async fn delete_attendance(
    State(state): State<AppState>,
    Path(attendance_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let record = state.attendance().soft_delete(attendance_id).await?;
    Ok(Json(MessageResponse {
        message: "Attendance marked as deleted".to_string(),
        id: record.id,
    }))
}

async fn restore_attendance(
    State(state): State<AppState>,
    Path(attendance_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let record = state.attendance().restore(attendance_id).await?;
    Ok(Json(MessageResponse {
        message: "Attendance restored".to_string(),
        id: record.id,
    }))
}

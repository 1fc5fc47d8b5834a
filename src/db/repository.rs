use sqlx::SqlitePool;

use crate::models::{AttendanceRecord, NewAttendanceRequest, NewStudentRequest, Student};

pub async fn fetch_students(db: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>("SELECT id, name, class_name FROM students ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn find_student_by_id(db: &SqlitePool, id: i64) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>("SELECT id, name, class_name FROM students WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_student_by_name(
    db: &SqlitePool,
    name: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>("SELECT id, name, class_name FROM students WHERE name = ?")
        .bind(name)
        .fetch_optional(db)
        .await
}

pub async fn insert_student(
    db: &SqlitePool,
    req: NewStudentRequest,
) -> Result<Student, sqlx::Error> {
    let id = sqlx::query("INSERT INTO students (name, class_name) VALUES (?1, ?2)")
        .bind(&req.name)
        .bind(&req.class_name)
        .execute(db)
        .await?
        .last_insert_rowid();

    Ok(Student {
        id,
        name: req.name,
        class_name: req.class_name,
    })
}

pub async fn fetch_attendance(db: &SqlitePool) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, student_id, date, status, is_deleted FROM attendance ORDER BY id",
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_attendance_by_deleted(
    db: &SqlitePool,
    is_deleted: bool,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, student_id, date, status, is_deleted FROM attendance WHERE is_deleted = ? ORDER BY id",
    )
    .bind(is_deleted)
    .fetch_all(db)
    .await
}

pub async fn find_attendance_by_id(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, student_id, date, status, is_deleted FROM attendance WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_attendance(
    db: &SqlitePool,
    req: NewAttendanceRequest,
) -> Result<AttendanceRecord, sqlx::Error> {
    let id = sqlx::query(
        r#"
        INSERT INTO attendance (student_id, date, status, is_deleted)
        VALUES (?1, ?2, ?3, 0)
        "#,
    )
    .bind(req.student_id)
    .bind(req.date)
    .bind(&req.status)
    .execute(db)
    .await?
    .last_insert_rowid();

    Ok(AttendanceRecord {
        id,
        student_id: req.student_id,
        date: req.date,
        status: req.status,
        is_deleted: false,
    })
}

/// Sets the soft-delete flag. Returns `false` when no record has `id`.
pub async fn set_attendance_deleted(
    db: &SqlitePool,
    id: i64,
    is_deleted: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE attendance SET is_deleted = ?2 WHERE id = ?1")
        .bind(id)
        .bind(is_deleted)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

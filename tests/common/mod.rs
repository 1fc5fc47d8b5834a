#![allow(dead_code)]

use attendance::db;
use attendance::models::NewStudentRequest;
use sqlx::SqlitePool;

pub async fn setup_test_db() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create database");

    db::migrate(&pool).await.expect("Failed to run migrations");

    pool
}

pub fn student(name: &str, class_name: &str) -> NewStudentRequest {
    NewStudentRequest {
        name: name.to_string(),
        class_name: class_name.to_string(),
    }
}

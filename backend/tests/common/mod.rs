//! Common test utilities for integration tests
//!
//! This module provides shared setup and teardown for integration tests.
//! Each test app gets its own throwaway SQLite database file.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bodymetrics_backend::{config::AppConfig, db, routes, state::AppState};
use sqlx::SqlitePool;
use tempfile::NamedTempFile;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    // Keeps the database file alive for the duration of the test
    _db_file: NamedTempFile,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a new test application with default configuration
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a new test application with custom configuration
    ///
    /// The database URL is always replaced with a fresh temp file.
    pub async fn with_config(mut config: AppConfig) -> Self {
        let db_file = NamedTempFile::new().expect("Failed to create temp database file");
        config.database.url = format!("sqlite://{}", db_file.path().display());

        let pool = db::create_pool(&config.database.url, config.database.max_connections)
            .await
            .expect("Failed to create test pool");

        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config);
        let app = routes::create_router(state);

        Self {
            app,
            pool,
            _db_file: db_file,
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("DELETE")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

/// A complete assessment input body for request payloads
#[allow(dead_code)]
pub fn assessment_body(name: &str) -> String {
    format!(
        r#"{{
            "patient": {{
                "name": "{name}",
                "sex": "male",
                "age_years": 30.0,
                "height_cm": 175.0,
                "weight_kg": 70.0,
                "activity_factor": 1.55
            }},
            "circumferences": {{ "waist": 80.0, "hip": 100.0 }},
            "skinfolds": {{ "chest": 10.0, "abdominal": 15.0, "thigh": 12.0 }},
            "protocol": "three_site"
        }}"#
    )
}

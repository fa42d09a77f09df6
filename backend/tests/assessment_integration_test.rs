//! Integration tests for the assessment endpoints

mod common;

use axum::http::StatusCode;
use bodymetrics_backend::repositories::{AssessmentRepository, HISTORY_LIMIT};
use fake::faker::name::en::Name;
use fake::Fake;

#[tokio::test]
async fn test_save_assessment_computes_and_persists() {
    let app = common::TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/assessments", &common::assessment_body("João Pereira"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let saved: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert!(!saved["id"].as_str().unwrap().is_empty());
    assert!((saved["results"]["bmi"].as_f64().unwrap() - 22.86).abs() < 0.01);
    assert_eq!(saved["results"]["bmi_class"]["label"], "Normal");
    assert_eq!(saved["results"]["whr"].as_f64().unwrap(), 0.8);
    assert_eq!(saved["results"]["body_fat"]["skinfold_sum"].as_f64().unwrap(), 37.0);

    // Fat + lean reconstructs the weight exactly
    let fat = saved["results"]["body_composition"]["fat_mass_kg"].as_f64().unwrap();
    let lean = saved["results"]["body_composition"]["lean_mass_kg"].as_f64().unwrap();
    assert_eq!(fat + lean, 70.0);
}

#[tokio::test]
async fn test_save_rejects_missing_required_fields() {
    let app = common::TestApp::new().await;

    let body = r#"{"patient": {"name": "No Weight", "sex": "female", "height_cm": 165.0}}"#;
    let (status, response) = app.post("/api/v1/assessments", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("VALIDATION_ERROR"));
    assert!(response.contains("weight_kg"));
}

#[tokio::test]
async fn test_save_rejects_out_of_range_measurements() {
    let app = common::TestApp::new().await;

    let body = r#"{
        "patient": {"name": "Bad Height", "sex": "male", "height_cm": 9000.0, "weight_kg": 70.0}
    }"#;
    let (status, response) = app.post("/api/v1/assessments", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("height_cm"));
}

#[tokio::test]
async fn test_evaluate_accepts_incomplete_input() {
    let app = common::TestApp::new().await;

    // No weight: BMI/BMR/TDEE are absent, ideal weight still computes
    let body = r#"{"patient": {"name": "", "sex": "female", "height_cm": 165.0}}"#;
    let (status, response) = app.post("/api/v1/assessments/evaluate", body).await;

    assert_eq!(status, StatusCode::OK);
    let results: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(results.get("bmi").is_none());
    assert!(results.get("bmr").is_none());
    assert!(results["ideal_weight"]["min_kg"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_history_is_newest_first_and_trimmed() {
    let app = common::TestApp::new().await;

    // Overfill the history past the limit
    for i in 0..(HISTORY_LIMIT + 5) {
        let name: String = Name().fake();
        let (status, _) = app
            .post(
                "/api/v1/assessments",
                &common::assessment_body(&format!("{name} {i}")),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let count = AssessmentRepository::count(&app.pool).await.unwrap();
    assert_eq!(count, HISTORY_LIMIT);

    let (status, body) = app.get("/api/v1/assessments").await;
    assert_eq!(status, StatusCode::OK);
    let history: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(history["total_count"].as_i64().unwrap(), HISTORY_LIMIT);

    let items = history["items"].as_array().unwrap();
    assert_eq!(items.len() as i64, HISTORY_LIMIT);

    // Newest first: the very last save is the first item, and the
    // oldest five were trimmed away
    let first_name = items[0]["patient"]["name"].as_str().unwrap();
    assert!(first_name.ends_with(&format!(" {}", HISTORY_LIMIT + 4)));
    let last_name = items[items.len() - 1]["patient"]["name"].as_str().unwrap();
    assert!(last_name.ends_with(" 5"));
}

#[tokio::test]
async fn test_history_limit_parameter() {
    let app = common::TestApp::new().await;

    for i in 0..3 {
        app.post(
            "/api/v1/assessments",
            &common::assessment_body(&format!("Patient {i}")),
        )
        .await;
    }

    let (status, body) = app.get("/api/v1/assessments?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let history: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(history["items"].as_array().unwrap().len(), 2);
    assert_eq!(history["total_count"].as_i64().unwrap(), 3);
}

#[tokio::test]
async fn test_get_and_delete_assessment() {
    let app = common::TestApp::new().await;

    let (_, body) = app
        .post("/api/v1/assessments", &common::assessment_body("Keep Me"))
        .await;
    let saved: serde_json::Value = serde_json::from_str(&body).unwrap();
    let id = saved["id"].as_str().unwrap();

    let (status, body) = app.get(&format!("/api/v1/assessments/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Keep Me"));

    let (status, _) = app.delete(&format!("/api/v1/assessments/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/v1/assessments/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&format!("/api/v1/assessments/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_history() {
    let app = common::TestApp::new().await;

    app.post("/api/v1/assessments", &common::assessment_body("One"))
        .await;
    app.post("/api/v1/assessments", &common::assessment_body("Two"))
        .await;

    let (status, _) = app.delete("/api/v1/assessments").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let count = AssessmentRepository::count(&app.pool).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_export_csv() {
    let app = common::TestApp::new().await;

    app.post("/api/v1/assessments", &common::assessment_body("Export Me"))
        .await;

    let (status, body) = app.get("/api/v1/assessments/export/csv").await;
    assert_eq!(status, StatusCode::OK);

    let mut lines = body.lines();
    assert!(lines.next().unwrap().contains("patient"));
    assert!(lines.next().unwrap().contains("Export Me"));
}

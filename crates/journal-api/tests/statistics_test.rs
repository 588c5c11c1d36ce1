//! Integration tests for the date histogram endpoint.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

fn seed(app: &helpers::TestApp) {
    app.write_report("report_a", "<Report><Date>05/01/2024</Date></Report>");
    app.write_report("report_b", "<Report><Date>05/01/2024</Date></Report>");
    app.write_report("report_c", "<Report><Date>01/02/2024</Date></Report>");
    app.write_report("report_d", "<Report><Date>2024-01-10</Date></Report>");
}

#[tokio::test]
async fn test_statistics_counts_by_date() {
    let app = helpers::TestApp::new().await;
    seed(&app);

    let response = app
        .post_json(
            "/get_statistics",
            json!({"start_date": "2024-01-01", "end_date": "2024-01-31"}).to_string(),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"2024-01-05": 2}));
}

#[tokio::test]
async fn test_statistics_range_is_inclusive_and_sorted() {
    let app = helpers::TestApp::new().await;
    seed(&app);

    let response = app
        .post_json(
            "/get_statistics",
            json!({"start_date": "2024-01-05", "end_date": "2024-02-01"}).to_string(),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), r#"{"2024-01-05":2,"2024-02-01":1}"#);
}

#[tokio::test]
async fn test_statistics_missing_date_is_bad_request() {
    let app = helpers::TestApp::new().await;
    seed(&app);

    for body in [
        json!({"end_date": "2024-01-31"}),
        json!({"start_date": "2024-01-01"}),
        json!({"start_date": "", "end_date": "2024-01-31"}),
        json!({}),
    ] {
        let response = app.post_json("/get_statistics", body.to_string()).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.json()["code"], "VALIDATION");
    }
}

#[tokio::test]
async fn test_statistics_invalid_date_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post_json(
            "/get_statistics",
            json!({"start_date": "01/01/2024", "end_date": "2024-01-31"}).to_string(),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].as_str().unwrap().contains("01/01/2024"));
}

#[tokio::test]
async fn test_statistics_short_year_is_bad_request() {
    let app = helpers::TestApp::new().await;
    seed(&app);

    for body in [
        json!({"start_date": "24-01-01", "end_date": "2024-01-31"}),
        json!({"start_date": "2024-01-01", "end_date": "24-01-31"}),
    ] {
        let response = app.post_json("/get_statistics", body.to_string()).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.json()["code"], "VALIDATION");
    }
}

#[tokio::test]
async fn test_statistics_malformed_body_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app.post_json("/get_statistics", "not json").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.post_json("/get_statistics", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_statistics_empty_when_nothing_matches() {
    let app = helpers::TestApp::new().await;
    seed(&app);

    let response = app
        .post_json(
            "/get_statistics",
            json!({"start_date": "2023-01-01", "end_date": "2023-12-31"}).to_string(),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({}));
}

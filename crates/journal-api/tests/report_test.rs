//! Integration tests for report detail and listing.

mod helpers;

use axum::http::StatusCode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const FULL_REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Report>
  <General>
    <ActivityType>Inspection</ActivityType>
    <Date>05/03/2024</Date>
    <Region>North</Region>
  </General>
  <DynamicFieldsData>
    <Field name="soil">loam</Field>
    <Field name="moisture"/>
  </DynamicFieldsData>
</Report>"#;

#[tokio::test]
async fn test_get_report_not_found() {
    let app = helpers::TestApp::new().await;
    app.write_report("report_a", FULL_REPORT);

    let response = app.get("/get_report/report_missing").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let body = response.json();
    assert_eq!(body["error"], "Report not found");
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_report_applies_sentinels() {
    let app = helpers::TestApp::new().await;
    app.write_report("report_a", FULL_REPORT);

    let response = app.get("/get_report/report_a").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["id"], "report_a");
    assert_eq!(body["activity_type"], "Inspection");
    assert_eq!(body["date"], "2024-03-05");
    assert_eq!(body["region"], "North");
    assert_eq!(body["work_type"], "Unknown WorkType");
    assert_eq!(body["latitude"], "0.0");
    assert_eq!(body["description"], "No Description");
    assert_eq!(body["dynamic_fields"]["soil"], "loam");
    assert_eq!(body["dynamic_fields"]["moisture"], "Нет данных");
    assert!(body.get("folder_path").is_none());
}

#[tokio::test]
async fn test_get_report_inlines_photos() {
    let app = helpers::TestApp::new().await;
    app.write_report("report_a", FULL_REPORT);
    app.write_file("report_a", "b.png", [0x89, b'P', b'N', b'G']);
    app.write_file("report_a", "a.jpg", [0xff, 0xd8, 0xff, 0xe0]);
    app.write_file("report_a", "notes.txt", "ignored");
    app.write_file("report_a", "c.JPG", "case-sensitive");

    let response = app.get("/get_report/report_a").await;

    assert_eq!(response.status, StatusCode::OK);
    let photos = response.json()["photos"].as_array().unwrap().clone();
    assert_eq!(photos.len(), 2);

    let decoded: Vec<Vec<u8>> = photos
        .iter()
        .map(|p| {
            let uri = p.as_str().unwrap();
            let data = uri.strip_prefix("data:image/jpeg;base64,").unwrap();
            STANDARD.decode(data).unwrap()
        })
        .collect();
    assert_eq!(decoded[0], vec![0xff, 0xd8, 0xff, 0xe0]);
    assert_eq!(decoded[1], vec![0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_malformed_report_is_skipped() {
    let app = helpers::TestApp::new().await;
    app.write_report("report_a", FULL_REPORT);
    app.write_report("report_broken", "<Report><Region>North</Report>");

    let response = app.get("/get_report/report_broken").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.get("/api/reports").await;
    assert_eq!(response.status, StatusCode::OK);
    let records = response.json()["records"].as_array().unwrap().clone();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], "report_a");
}

#[tokio::test]
async fn test_list_reports_filters() {
    let app = helpers::TestApp::new().await;
    app.write_report("report_a", FULL_REPORT);
    app.write_report(
        "report_b",
        "<Report><Region>South</Region><Date>01/02/2024</Date><WorkType>Sowing</WorkType></Report>",
    );
    app.write_report("report_c", "<Report/>");
    app.write_report("other_d", "<Report><Region>West</Region></Report>");

    let response = app.get("/api/reports").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["records"].as_array().unwrap().len(), 3);
    assert_eq!(body["filters"]["regions"], serde_json::json!(["North", "South"]));
    assert_eq!(body["filters"]["dates"], serde_json::json!(["2024-02-01", "2024-03-05"]));
    assert_eq!(body["filters"]["work_types"], serde_json::json!(["Sowing"]));
    assert_eq!(body["records"][0]["photos"], serde_json::json!([]));

    let response = app.get("/api/reports?region=South").await;
    let body = response.json();
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], "report_b");
    assert_eq!(body["filters"]["regions"], serde_json::json!(["North", "South"]));

    let response = app.get("/api/reports?date=2024-03-05&region=").await;
    let records = response.json()["records"].as_array().unwrap().clone();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], "report_a");
}

#[tokio::test]
async fn test_folder_without_xml_is_skipped() {
    let app = helpers::TestApp::new().await;
    app.write_file("report_empty", "a.jpg", "img");

    let response = app.get("/get_report/report_empty").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
    assert_eq!(response.json()["service"], "dashboard");
}

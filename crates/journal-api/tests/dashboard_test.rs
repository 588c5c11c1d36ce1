//! Integration tests for the HTML dashboard.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_dashboard_lists_reports() {
    let app = helpers::TestApp::new().await;
    app.write_report(
        "report_a",
        "<Report><Region>North</Region><Date>05/01/2024</Date><ActivityType>Scouting</ActivityType></Report>",
    );
    app.write_report("report_b", "<Report><Region>South</Region></Report>");

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.as_deref().unwrap().starts_with("text/html"));
    let html = response.text();
    assert!(html.contains("data-id=\"report_a\""));
    assert!(html.contains("data-id=\"report_b\""));
    assert!(html.find("report_a").unwrap() < html.find("report_b").unwrap());
    assert!(html.contains("<option value=\"North\">North</option>"));
    assert!(html.contains("<option value=\"South\">South</option>"));
    assert!(html.contains("<option value=\"2024-01-05\">2024-01-05</option>"));
    assert!(html.contains("<option value=\"Scouting\">Scouting</option>"));
}

#[tokio::test]
async fn test_dashboard_filters_exclude_sentinels() {
    let app = helpers::TestApp::new().await;
    app.write_report("report_bare", "<Report><Date>31/02/2024</Date></Report>");

    let response = app.get("/").await;
    let html = response.text();

    assert!(html.contains("data-date=\"Unknown Date\""));
    assert!(html.contains("data-region=\"Unknown Region\""));
    for sentinel in ["Unknown Date", "Unknown Region", "Unknown Activity Type", "Unknown WorkType"] {
        assert!(
            !html.contains(&format!("<option value=\"{sentinel}\">")),
            "{sentinel} offered as a filter"
        );
    }
}

#[tokio::test]
async fn test_dashboard_ignores_query_parameters() {
    let app = helpers::TestApp::new().await;
    app.write_report("report_a", "<Report><Region>North</Region></Report>");
    app.write_report("report_b", "<Report><Region>South</Region></Report>");

    let response = app.get("/?region=North&unknown=1").await;

    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("data-id=\"report_a\""));
    assert!(html.contains("data-id=\"report_b\""));
}

#[tokio::test]
async fn test_dashboard_escapes_report_values() {
    let app = helpers::TestApp::new().await;
    app.write_report("report_a", "<Report><Region>&lt;script&gt;</Region></Report>");

    let html = app.get("/").await.text();

    assert!(!html.contains("<td><script></td>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_dashboard_empty_root() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.text().contains("data-id="));
}

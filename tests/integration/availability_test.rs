//! Integration tests for availability previews and event administration.

mod helpers;

use chrono::Days;
use http::StatusCode;

#[tokio::test]
async fn test_availability_reports_usage_events_and_weekends() {
    let app = helpers::TestApp::new().await;
    let monday = helpers::monday(20);
    app.seed_appointment(monday, 180).await;
    app.seed_event(monday + Days::new(1), "Parent Evening").await;

    let response = app
        .request(
            "GET",
            &format!("/api/availability?from={}&days=7", monday),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let days = response.body["data"].as_array().unwrap();
    assert_eq!(days.len(), 7);

    // Monday: partially used.
    assert_eq!(days[0]["used"], 180);
    assert_eq!(days[0]["available"], 20);
    assert_eq!(days[0]["blocked"], false);

    // Tuesday: blocked by the event.
    assert_eq!(days[1]["blocked"], true);
    assert_eq!(days[1]["available"], 0);

    // Saturday: blocked as a weekend.
    assert_eq!(days[5]["blocked"], true);
    assert_eq!(days[5]["available"], 0);
}

#[tokio::test]
async fn test_event_lifecycle() {
    let app = helpers::TestApp::new().await;
    let date = helpers::monday(21);

    let created = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "event_date": date,
                "name": "School Inspection",
                "description": "No processing",
            })),
            None,
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let listed = app
        .request(
            "GET",
            &format!("/api/events?from={}&to={}", date, date),
            None,
            None,
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let deleted = app
        .request("DELETE", &format!("/api/events/{}", id), None, None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("DELETE", &format!("/api/events/{}", id), None, None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preview_plans_without_persisting() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(22);
    app.seed_appointment(start, 180).await;

    let response = app
        .request(
            "POST",
            "/api/appointments/preview",
            Some(serde_json::json!({
                "file_count": 50,
                "start_date": start,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let allocations = response.body["data"].as_array().unwrap();
    assert_eq!(allocations.len(), 2);
    assert_eq!(allocations[0]["file_count"], 20);
    assert_eq!(allocations[1]["file_count"], 30);

    // Only the seeded row exists; the preview wrote nothing.
    assert_eq!(app.appointment_count().await, 1);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = helpers::TestApp::new().await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");

    let detailed = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(detailed.status, StatusCode::OK);
    assert_eq!(detailed.body["data"]["database"], "connected");
}

//! Integration tests for the booking submission flow.

mod helpers;

use chrono::{Days, Utc};
use http::StatusCode;
use intake_core::config::SchedulingConfig;

#[tokio::test]
async fn test_single_day_booking() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(1);

    let response = app.book("Northside Elementary", 50, start).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let data = &response.body["data"];
    assert_eq!(data["is_split"], false);
    assert_eq!(data["allocations"].as_array().unwrap().len(), 1);
    assert_eq!(data["allocations"][0]["file_count"], 50);

    assert_eq!(app.daily_sum(start).await, 50);
}

#[tokio::test]
async fn test_exact_capacity_fits_without_splitting() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(2);

    let response = app.book("Hillcrest Academy", 200, start).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let data = &response.body["data"];
    assert_eq!(data["is_split"], false);
    assert_eq!(data["allocations"].as_array().unwrap().len(), 1);
    assert_eq!(data["allocations"][0]["file_count"], 200);
}

#[tokio::test]
async fn test_split_booking_rolls_remainder_to_next_day() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(3);
    app.seed_appointment(start, 180).await;

    let response = app.book("Riverside Prep", 50, start).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let data = &response.body["data"];
    assert_eq!(data["is_split"], true);
    assert_eq!(data["total_splits"], 2);
    let allocations = data["allocations"].as_array().unwrap();
    assert_eq!(allocations[0]["file_count"], 20);
    assert_eq!(allocations[1]["file_count"], 30);
    assert_eq!(
        allocations[1]["date"],
        serde_json::json!(start + Days::new(1))
    );

    // The persisted group: primary has no parent, the child references it.
    let primary_id = data["appointment_id"].as_str().unwrap().to_string();
    let group = app
        .request(
            "GET",
            &format!("/api/appointments/{}/group", primary_id),
            None,
            None,
        )
        .await;
    assert_eq!(group.status, StatusCode::OK);
    let rows = group.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["parent_appointment_id"], serde_json::Value::Null);
    assert_eq!(rows[1]["parent_appointment_id"], primary_id.as_str());
    assert_eq!(rows[0]["split_sequence"], 1);
    assert_eq!(rows[1]["split_sequence"], 2);
    // Every row keeps the original request total.
    assert_eq!(rows[0]["file_count"], 50);
    assert_eq!(rows[1]["file_count"], 50);
}

#[tokio::test]
async fn test_full_day_rolls_everything_to_next_open_day() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(4);
    app.seed_appointment(start, 200).await;

    let response = app.book("Lakeview School", 1, start).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let allocations = response.body["data"]["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 1);
    assert_eq!(
        allocations[0]["date"],
        serde_json::json!(start + Days::new(1))
    );
    assert_eq!(app.daily_sum(start).await, 200);
}

#[tokio::test]
async fn test_event_day_is_skipped_when_rolling_over() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(5);
    app.seed_appointment(start, 180).await;
    app.seed_event(start + Days::new(1), "Staff Training").await;

    let response = app.book("Oakwood Elementary", 50, start).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let allocations = response.body["data"]["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 2);
    // Tuesday is blocked; the remainder lands on Wednesday.
    assert_eq!(
        allocations[1]["date"],
        serde_json::json!(start + Days::new(2))
    );
}

#[tokio::test]
async fn test_booking_today_is_rejected_before_capacity_checks() {
    let app = helpers::TestApp::new().await;
    let today = Utc::now().date_naive();

    let response = app.book("Same-Day School", 1, today).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(app.appointment_count().await, 0);
}

#[tokio::test]
async fn test_weekend_start_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.book("Weekend School", 10, helpers::saturday(1)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["message"].as_str().unwrap();
    assert!(message.contains("weekend"), "{}", message);
}

#[tokio::test]
async fn test_event_on_start_date_is_rejected_naming_the_event() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(6);
    app.seed_event(start, "Sports Day").await;

    let response = app.book("Eastside Middle", 10, start).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["message"].as_str().unwrap();
    assert!(message.contains("Sports Day"), "{}", message);
}

#[tokio::test]
async fn test_no_day_exceeds_the_limit_across_bookings() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(7);

    let first = app.book("First School", 120, start).await;
    assert_eq!(first.status, StatusCode::OK);
    let second = app.book("Second School", 150, start).await;
    assert_eq!(second.status, StatusCode::OK);

    // 120 + 80 fill Monday; the remaining 70 roll to Tuesday.
    assert_eq!(app.daily_sum(start).await, 200);
    assert_eq!(app.daily_sum(start + Days::new(1)).await, 70);
}

#[tokio::test]
async fn test_exhaustion_rejects_and_persists_nothing() {
    let app = helpers::TestApp::with_scheduling(SchedulingConfig {
        daily_file_limit: 10,
        max_planning_days: 5,
        ..SchedulingConfig::default()
    })
    .await;

    let response = app.book("Oversized School", 1000, helpers::monday(8)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["message"].as_str().unwrap();
    assert!(message.contains("1000"), "{}", message);
    assert_eq!(app.appointment_count().await, 0);
}

#[tokio::test]
async fn test_cancelled_appointments_still_hold_capacity() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(9);

    let first = app.book("Cancelled School", 200, start).await;
    assert_eq!(first.status, StatusCode::OK);
    let id = first.body["data"]["appointment_id"].as_str().unwrap();

    let cancel = app
        .request(
            "PUT",
            &format!("/api/appointments/{}/cancel", id),
            None,
            None,
        )
        .await;
    assert_eq!(cancel.status, StatusCode::OK);

    // The cancelled booking keeps its slot; a new one rolls to Tuesday.
    let second = app.book("Next School", 10, start).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        second.body["data"]["allocations"][0]["date"],
        serde_json::json!(start + Days::new(1))
    );
}

#[tokio::test]
async fn test_deleted_appointments_release_capacity() {
    let app = helpers::TestApp::new().await;
    let start = helpers::monday(10);

    let first = app.book("Deleted School", 200, start).await;
    assert_eq!(first.status, StatusCode::OK);
    let id = first.body["data"]["appointment_id"].as_str().unwrap();

    let delete = app
        .request("DELETE", &format!("/api/appointments/{}", id), None, None)
        .await;
    assert_eq!(delete.status, StatusCode::OK);

    let second = app.book("Next School", 10, start).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        second.body["data"]["allocations"][0]["date"],
        serde_json::json!(start)
    );
}

#[tokio::test]
async fn test_direct_booking_rejects_totals_over_the_per_appointment_cap() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/appointments/direct",
            Some(serde_json::json!({
                "school_name": "Direct School",
                "file_count": 201,
                "start_date": helpers::monday(11),
            })),
            Some(uuid::Uuid::new_v4()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.appointment_count().await, 0);
}

#[tokio::test]
async fn test_booking_requires_an_acting_user() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/appointments",
            Some(serde_json::json!({
                "school_name": "Headerless School",
                "file_count": 10,
                "start_date": helpers::monday(12),
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.appointment_count().await, 0);
}

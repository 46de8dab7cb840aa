//! Integration tests for the owner sales, feedback and dashboard reports.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

async fn record_sale(app: axum::Router, date: &str, service: &str, method: &str, amount: f64) {
    let response = post_json(
        app,
        "/api/v1/owner/sales",
        json!({
            "date": date,
            "customerName": "Guest",
            "serviceType": service,
            "paymentMethod": method,
            "amount": amount,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn seed_sales(app: &axum::Router) {
    record_sale(app.clone(), "2025-01-05T10:00:00Z", "Kubo", "Cash", 300.0).await;
    record_sale(app.clone(), "2025-01-18T10:00:00Z", "Pool", "GCash", 150.0).await;
    record_sale(app.clone(), "2025-03-02T10:00:00Z", "Kubo", "Cash", 450.0).await;
    record_sale(app.clone(), "2024-12-30T10:00:00Z", "Room", "Card", 2000.0).await;
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[tokio::test]
async fn monthly_report_for_requested_year() {
    let test = common::build_test_app();
    seed_sales(&test.app()).await;

    let response = get(test.app(), "/api/v1/owner/sales?year=2025&filterType=monthly").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    let chart = data["chartData"].as_array().unwrap();
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0]["label"], "Jan");
    assert_eq!(chart[0]["total"], 450.0);
    assert_eq!(chart[1]["label"], "Mar");

    let services = data["serviceData"].as_array().unwrap();
    assert_eq!(services[0]["name"], "Kubo");
    assert_eq!(services[0]["value"], 750.0);

    assert_eq!(data["recentSales"].as_array().unwrap().len(), 4);
    assert!(data["stats"]["thisYear"].is_number());
}

#[tokio::test]
async fn daily_report_covers_requested_month() {
    let test = common::build_test_app();
    seed_sales(&test.app()).await;

    let data = body_json(
        get(test.app(), "/api/v1/owner/sales?year=2025&month=1&filterType=daily").await,
    )
    .await["data"]
        .clone();

    let labels: Vec<_> = data["chartData"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, vec!["05", "18"]);
    assert_eq!(data["serviceData"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_report_parameters_return_400() {
    let test = common::build_test_app();

    let bad_filter = get(test.app(), "/api/v1/owner/sales?filterType=hourly").await;
    assert_eq!(bad_filter.status(), StatusCode::BAD_REQUEST);

    let bad_month = get(test.app(), "/api/v1/owner/sales?year=2025&month=13").await;
    assert_eq!(bad_month.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sales_years_are_distinct_and_descending() {
    let test = common::build_test_app();
    seed_sales(&test.app()).await;

    let json = body_json(get(test.app(), "/api/v1/owner/sales/years").await).await;
    assert_eq!(json["data"], json!([2025, 2024]));
}

#[tokio::test]
async fn history_applies_filters_and_all() {
    let test = common::build_test_app();
    seed_sales(&test.app()).await;

    let all = body_json(
        get(test.app(), "/api/v1/owner/sales/history?category=All&paymentMethod=All").await,
    )
    .await;
    assert_eq!(all["data"].as_array().unwrap().len(), 4);

    let january_cash = body_json(
        get(
            test.app(),
            "/api/v1/owner/sales/history?startDate=2025-01-01&endDate=2025-01-31&paymentMethod=Cash",
        )
        .await,
    )
    .await;
    let rows = january_cash["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["serviceType"], "Kubo");

    let only_start = body_json(
        get(test.app(), "/api/v1/owner/sales/history?startDate=2025-03-01&endDate=").await,
    )
    .await;
    assert_eq!(only_start["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn out_of_range_sale_amount_returns_400() {
    let test = common::build_test_app();
    for amount in [json!(-5), json!(1e11)] {
        let response = post_json(
            test.app(),
            "/api/v1/owner/sales",
            json!({ "serviceType": "Kubo", "paymentMethod": "Cash", "amount": amount }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// ---------------------------------------------------------------------------
// Feedback & dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feedback_submission_and_sentiment_filter() {
    let test = common::build_test_app();
    for rating in [5, 4, 3, 1] {
        let response = post_json(
            test.app(),
            "/api/v1/feedback",
            json!({ "customerName": "Guest", "rating": rating, "comment": "ok" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let positive = body_json(get(test.app(), "/api/v1/owner/feedback?filter=positive").await).await;
    assert_eq!(positive["data"].as_array().unwrap().len(), 2);

    let negative = body_json(get(test.app(), "/api/v1/owner/feedback?filter=negative").await).await;
    assert_eq!(negative["data"][0]["rating"], 1);

    let unfiltered = body_json(get(test.app(), "/api/v1/owner/feedback?filter=whatever").await).await;
    assert_eq!(unfiltered["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn out_of_range_rating_returns_400() {
    let test = common::build_test_app();
    let response = post_json(test.app(), "/api/v1/feedback", json!({ "rating": 6 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_stats_aggregate_everything() {
    let test = common::build_test_app();
    seed_sales(&test.app()).await;
    for rating in [5, 2] {
        post_json(test.app(), "/api/v1/feedback", json!({ "rating": rating })).await;
    }

    let data = body_json(get(test.app(), "/api/v1/owner/dashboard/stats").await).await["data"].clone();
    assert_eq!(data["totalRevenue"], 2900.0);
    assert_eq!(data["totalTransactions"], 4);
    assert_eq!(data["totalFeedback"], 2);
    assert_eq!(data["salesByService"][0]["name"], "Room");

    let distribution = data["feedbackDistribution"].as_array().unwrap();
    assert_eq!(distribution.len(), 2);
}

//! `GET /events` end-to-end tests against a seeded SQLite database.

#![cfg(feature = "server")]

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use chrono::Utc;
use serde_json::Value;

use event_insight::api::middleware::{REQUEST_ID_HEADER, RequestIdMiddleware};
use event_insight::api::services::AppStartTime;
use event_insight::runtime::lifetime::startup::StartupContext;
use event_insight::runtime::modes::server::configure_services;

const JANUARY: &str = "from=2024-01-01&to=2024-01-31";

macro_rules! init_app {
    ($storage:expr) => {{
        let context = StartupContext::from_storage($storage.clone());
        let start = AppStartTime {
            start_datetime: Utc::now(),
        };
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .configure(|cfg| configure_services(cfg, &context, &start)),
        )
        .await
    }};
}

macro_rules! get_json {
    ($app:expr, $uri:expr $(,)?) => {{
        let resp = test::call_service(&$app, TestRequest::get().uri($uri).to_request()).await;
        let status: StatusCode = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_id"].as_str().unwrap().to_string())
        .collect()
}

#[actix_rt::test]
async fn test_default_ordering_and_meta() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (status, body) = get_json!(app, &format!("/events?{}", JANUARY));
    assert_eq!(status, StatusCode::OK);

    let meta = &body["meta"];
    assert_eq!(meta["total"], 13);
    assert_eq!(meta["page"], 1);
    assert_eq!(meta["limit"], 10);
    assert_eq!(meta["last_page"], 2);
    assert_eq!(meta["from"], "2024-01-01");
    assert_eq!(meta["to"], "2024-01-31");
    assert_eq!(meta["sort_by"], "event_time");
    assert_eq!(meta["sort_direction"], "desc");
    assert!(meta["profession_id"].is_null());
    assert!(meta["funnel_id"].is_null());

    let fields: Vec<&str> = meta["valid_sort_fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(fields.len(), 26);
    assert!(fields.windows(2).all(|w| w[0] < w[1]));
    assert!(fields.contains(&"utm_source"));

    // 月末 23:59:59 的事件包含在内，2 月 1 日的不包含
    let page = ids(&body);
    assert_eq!(page.len(), 10);
    assert_eq!(page[0], "evt-13");
    assert_eq!(page[1], "evt-12");
    assert!(!page.contains(&"evt-14".to_string()));
}

#[actix_rt::test]
async fn test_limit_and_last_page() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (_, body) = get_json!(app, &format!("/events?{}&limit=5", JANUARY));
    assert_eq!(ids(&body).len(), 5);
    assert_eq!(body["meta"]["last_page"], 3);

    let (_, body) = get_json!(app, &format!("/events?{}&limit=5&page=3", JANUARY));
    assert_eq!(ids(&body), vec!["evt-03", "evt-02", "evt-01"]);
    assert_eq!(body["meta"]["page"], 3);

    // 超出末页返回空数据，总数不变
    let (_, body) = get_json!(app, &format!("/events?{}&limit=5&page=9", JANUARY));
    assert!(ids(&body).is_empty());
    assert_eq!(body["meta"]["total"], 13);
}

#[actix_rt::test]
async fn test_pagination_inputs_are_clamped() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (status, body) = get_json!(app, &format!("/events?{}&page=0&limit=0", JANUARY));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 1);
    assert_eq!(body["meta"]["last_page"], 13);
    assert_eq!(ids(&body).len(), 1);

    let (_, body) = get_json!(app, &format!("/events?{}&page=-3&limit=10000", JANUARY));
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 100);
    assert_eq!(ids(&body).len(), 13);

    let (_, body) = get_json!(app, &format!("/events?{}&page=abc&limit=", JANUARY));
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 10);
}

#[actix_rt::test]
async fn test_enormous_page_returns_empty_page() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    for page in ["100000000000000000", "9223372036854775807"] {
        let (status, body) = get_json!(
            app,
            &format!("/events?{}&page={}&limit=100", JANUARY, page),
        );
        assert_eq!(status, StatusCode::OK);
        assert!(ids(&body).is_empty());
        assert_eq!(body["meta"]["total"], 13);
        assert_eq!(body["meta"]["page"], i64::MAX as u64 / 100);
    }
}

#[actix_rt::test]
async fn test_funnel_filter_reduces_total() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (_, body) = get_json!(app, &format!("/events?{}&funnel_id=100&limit=2", JANUARY));
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["funnel_id"], 100);
    assert_eq!(body["meta"]["last_page"], 3);
    assert_eq!(ids(&body).len(), 2);
    for event in body["data"].as_array().unwrap() {
        assert_eq!(event["funnel_id"], 100);
    }
}

#[actix_rt::test]
async fn test_profession_filter_and_non_numeric_ids() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (_, body) = get_json!(app, &format!("/events?{}&profession_id=1", JANUARY));
    assert_eq!(body["meta"]["total"], 9);
    assert_eq!(body["meta"]["profession_id"], 1);

    let (status, body) = get_json!(
        app,
        &format!("/events?{}&profession_id=abc&funnel_id=x1", JANUARY),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 13);
    assert!(body["meta"]["profession_id"].is_null());
    assert!(body["meta"]["funnel_id"].is_null());
}

#[actix_rt::test]
async fn test_unknown_sort_field_falls_back() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (status, body) = get_json!(
        app,
        &format!("/events?{}&sortBy=password&sortDirection=asc", JANUARY),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["sort_by"], "event_time");
    assert_eq!(body["meta"]["sort_direction"], "desc");
    assert_eq!(ids(&body)[0], "evt-13");
}

#[actix_rt::test]
async fn test_invalid_direction_is_coerced_to_desc() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (_, body) = get_json!(
        app,
        &format!("/events?{}&sortBy=event_id&sortDirection=sideways", JANUARY),
    );
    assert_eq!(body["meta"]["sort_by"], "event_id");
    assert_eq!(body["meta"]["sort_direction"], "desc");
    assert_eq!(ids(&body)[0], "evt-13");

    let (_, body) = get_json!(
        app,
        &format!("/events?{}&sortBy=event_id&sortDirection=asc", JANUARY),
    );
    assert_eq!(ids(&body)[0], "evt-01");
}

#[actix_rt::test]
async fn test_sort_by_joined_column() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    // Bruno (u2) 在 Ana (u1) 之前，同名按 event_id 升序
    let (_, body) = get_json!(
        app,
        &format!(
            "/events?{}&funnel_id=100&sortBy=fullname&sortDirection=desc",
            JANUARY
        ),
    );
    assert_eq!(
        ids(&body),
        vec!["evt-02", "evt-04", "evt-01", "evt-03", "evt-05"]
    );

    let (_, body) = get_json!(
        app,
        &format!(
            "/events?{}&funnel_id=101&sortBy=utm_source&sortDirection=asc",
            JANUARY
        ),
    );
    // s2 = facebook (evt-07..09) 排在 s1 = google (evt-06) 前
    assert_eq!(ids(&body), vec!["evt-07", "evt-08", "evt-09", "evt-06"]);
}

#[actix_rt::test]
async fn test_nested_relations_and_properties() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (_, body) = get_json!(
        app,
        &format!("/events?{}&sortBy=event_id&sortDirection=asc&limit=3", JANUARY),
    );
    let data = body["data"].as_array().unwrap();

    let first = &data[0];
    assert_eq!(first["event_id"], "evt-01");
    assert_eq!(first["user"]["fullname"], "Ana");
    assert_eq!(first["user"]["is_client"], true);
    assert_eq!(first["session"]["utm_source"], "google");
    assert_eq!(first["profession"]["profession_name"], "Dentist");
    assert_eq!(first["funnel"]["funnel_name"], "Webinar");
    assert!(first["product"].is_null());
    assert_eq!(first["event_properties"]["currency"], "EUR");

    assert_eq!(data[1]["event_properties"], "not-json");
    assert_eq!(data[2]["product"]["product_name"], "Whitening Kit");

    let (_, body) = get_json!(
        app,
        "/events?from=2024-01-31&to=2024-01-31&sortBy=event_id&sortDirection=desc",
    );
    let bare = &body["data"][0];
    assert_eq!(bare["event_id"], "evt-13");
    assert!(bare["user"].is_null());
    assert!(bare["session"].is_null());
    assert!(bare["funnel"].is_null());
    assert!(bare["event_properties"].is_null());
}

#[actix_rt::test]
async fn test_date_bounds_are_inclusive_days() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (_, body) = get_json!(app, "/events?from=2024-02-01&to=2024-02-01");
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(ids(&body), vec!["evt-14"]);

    let (_, body) = get_json!(app, "/events?from=2024-01-05&to=2024-01-06");
    assert_eq!(body["meta"]["total"], 2);
}

#[actix_rt::test]
async fn test_default_window_is_recent() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    // 种子数据都在 2024 年，默认 30 天窗口内没有事件
    let (status, body) = get_json!(app, "/events?from=&to=");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);
    assert_eq!(body["meta"]["last_page"], 0);
    assert_eq!(
        body["meta"]["to"],
        Utc::now().format("%Y-%m-%d").to_string()
    );
}

#[actix_rt::test]
async fn test_invalid_dates_return_400() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let (status, body) = get_json!(app, "/events?from=bad-date");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        serde_json::json!({"error": "Invalid from date format. Use YYYY-MM-DD"})
    );

    let (status, body) = get_json!(app, "/events?from=2024-01-01&to=2024/01/31");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        serde_json::json!({"error": "Invalid to date format. Use YYYY-MM-DD"})
    );
}

#[actix_rt::test]
async fn test_responses_carry_request_id() {
    let (storage, _dir) = common::create_seeded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/events?{}", JANUARY))
            .to_request(),
    )
    .await;
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
}

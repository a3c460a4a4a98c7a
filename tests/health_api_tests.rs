//! Health checks and request-id propagation.

#![cfg(feature = "server")]

mod common;

use actix_web::App;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use chrono::Utc;
use serde_json::Value;

use event_insight::api::middleware::{REQUEST_ID_HEADER, RequestIdMiddleware};
use event_insight::api::services::AppStartTime;
use event_insight::runtime::lifetime::startup::StartupContext;
use event_insight::runtime::modes::server::configure_services;

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

#[actix_rt::test]
async fn test_health_reports_database() {
    let (storage, _dir) = common::create_temp_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
    assert_eq!(body["checks"]["database"]["backend"], "sqlite");
    assert!(body["checks"]["database"].get("error").is_none());
    assert!(body["uptime"].is_u64());
}

#[actix_rt::test]
async fn test_readiness_and_liveness() {
    let (storage, _dir) = common::create_temp_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"OK");

    let resp = test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn test_request_id_is_echoed_or_generated() {
    let (storage, _dir) = common::create_temp_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/health/live")
            .insert_header((REQUEST_ID_HEADER, "trace-7"))
            .to_request(),
    )
    .await;
    assert_eq!(
        resp.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some("trace-7")
    );

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/health/live")
            .insert_header((REQUEST_ID_HEADER, "bad id with spaces"))
            .to_request(),
    )
    .await;
    let generated = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert_ne!(generated, "bad id with spaces");
    assert_eq!(generated.len(), 36);
}

#[actix_rt::test]
async fn test_unknown_route_is_404() {
    let (storage, _dir) = common::create_temp_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/links").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

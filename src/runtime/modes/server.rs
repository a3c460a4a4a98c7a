//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::api::services::{
    AppStartTime, events_routes, funnels_routes, health_routes, professions_routes,
    sessions_routes, users_routes,
};
use crate::config::CorsConfig;
use crate::runtime::lifetime::{self, startup::StartupContext};

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
///
/// Only GET/HEAD are exposed; the API is read-only.
fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 未启用时使用浏览器默认同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default();

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec!["GET", "HEAD"])
        .allowed_header(actix_web::http::header::ACCEPT)
        .allowed_header(actix_web::http::header::CONTENT_TYPE)
        .expose_headers(vec!["x-request-id"])
        .max_age(cors_config.max_age as usize)
}

/// Register handlers and shared state.
///
/// Used by the server and by integration tests so both see the same routes.
pub fn configure_services(
    cfg: &mut web::ServiceConfig,
    context: &StartupContext,
    app_start_time: &AppStartTime,
) {
    cfg.app_data(web::Data::new(context.storage.clone()))
        .app_data(web::Data::new(context.event_service.clone()))
        .app_data(web::Data::new(context.catalog_service.clone()))
        .app_data(web::Data::new(context.audience_service.clone()))
        .app_data(web::Data::new(app_start_time.clone()))
        .service(web::scope(&context.route_config.health_prefix).service(health_routes()))
        .service(events_routes())
        .service(professions_routes())
        .service(funnels_routes())
        .service(users_routes())
        .service(sessions_routes());
}

/// Run the HTTP server
///
/// 1. Records startup time
/// 2. Prepares storage and services
/// 3. Starts the HTTP server
/// 4. Listens for graceful shutdown signals
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    // Clone db reference before storage moves into HttpServer closure
    let db_for_shutdown = startup.storage.get_db().clone();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);
        let startup = startup.clone();
        let app_start_time = app_start_time.clone();

        App::new()
            .wrap(TimingMiddleware) // 最外层，记录请求延迟
            .wrap(RequestIdMiddleware) // 为每个请求生成 request_id
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(|cfg| configure_services(cfg, &startup, &app_start_time))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cors_builds() {
        let _ = build_cors_middleware(&CorsConfig::default());
    }

    #[test]
    fn test_enabled_cors_builds() {
        let cors = CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://dashboard.example.com".to_string()],
            max_age: 600,
        };
        validate_cors_config(&cors);
        let _ = build_cors_middleware(&cors);
    }
}

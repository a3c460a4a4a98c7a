//! `GET /users`, `GET /session`

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use tracing::{error, trace};

use crate::config::get_config;
use crate::services::{AudienceService, SESSION_SORT_FIELDS, USER_SORT_FIELDS};

use super::helpers::{error_from_app, json_response, page_meta};
use super::params::{
    SessionsQueryParams, UsersQueryParams, format_day, non_empty, parse_flag, parse_page_request,
    resolve_optional_date_range,
};
use super::types::{ListResponse, SessionCount, SessionsMeta, UsersMeta};

pub async fn list_users(
    query: web::Query<UsersQueryParams>,
    service: web::Data<Arc<AudienceService>>,
) -> actix_web::Result<HttpResponse> {
    let config = get_config();
    let api = &config.api;
    let params = query.into_inner();

    let page = parse_page_request(non_empty(&params.page), non_empty(&params.limit), api);
    let order = USER_SORT_FIELDS.resolve(
        non_empty(&params.sort_by),
        non_empty(&params.sort_direction),
    );
    let is_client = parse_flag(non_empty(&params.is_client));

    match service.list_users(&page, &order, is_client).await {
        Ok((users, total)) => Ok(json_response(
            StatusCode::OK,
            &ListResponse {
                data: users,
                meta: UsersMeta {
                    page: page_meta(&page, total, &order, USER_SORT_FIELDS.field_names()),
                    is_client,
                },
            },
        )),
        Err(e) => {
            error!("GET /users failed: {}", e);
            Ok(error_from_app(&e, api.expose_error_details))
        }
    }
}

/// 会话列表；`count_only=true` 时只返回数量
pub async fn list_sessions(
    query: web::Query<SessionsQueryParams>,
    service: web::Data<Arc<AudienceService>>,
) -> actix_web::Result<HttpResponse> {
    let config = get_config();
    let api = &config.api;
    let params = query.into_inner();
    trace!("list_sessions params: {:?}", params);

    let range = match resolve_optional_date_range(
        non_empty(&params.from),
        non_empty(&params.to),
        Utc::now(),
        api.default_range_days,
    ) {
        Ok(range) => range,
        Err(e) => return Ok(error_from_app(&e, api.expose_error_details)),
    };
    let from = range.map(|r| format_day(r.from));
    let to = range.map(|r| format_day(r.to));

    if parse_flag(non_empty(&params.count_only)) == Some(true) {
        return match service.count_sessions(range.as_ref()).await {
            Ok(count) => Ok(json_response(
                StatusCode::OK,
                &SessionCount { count, from, to },
            )),
            Err(e) => {
                error!("GET /session count failed: {}", e);
                Ok(error_from_app(&e, api.expose_error_details))
            }
        };
    }

    let page = parse_page_request(non_empty(&params.page), non_empty(&params.limit), api);
    let order = SESSION_SORT_FIELDS.resolve(
        non_empty(&params.sort_by),
        non_empty(&params.sort_direction),
    );

    match service.list_sessions(&page, &order, range.as_ref()).await {
        Ok((sessions, total)) => Ok(json_response(
            StatusCode::OK,
            &ListResponse {
                data: sessions,
                meta: SessionsMeta {
                    page: page_meta(&page, total, &order, SESSION_SORT_FIELDS.field_names()),
                    from,
                    to,
                },
            },
        )),
        Err(e) => {
            error!("GET /session failed: {}", e);
            Ok(error_from_app(&e, api.expose_error_details))
        }
    }
}

/// 用户路由 `/users`
pub fn users_routes() -> actix_web::Scope {
    web::scope("/users")
        .route("", web::get().to(list_users))
        .route("", web::head().to(list_users))
}

/// 会话路由 `/session`
pub fn sessions_routes() -> actix_web::Scope {
    web::scope("/session")
        .route("", web::get().to(list_sessions))
        .route("", web::head().to(list_sessions))
}

//! `GET /professions`, `GET /funnels`, `GET /professions/{profession_id}/funnels`

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::{error, trace};

use crate::config::get_config;
use crate::services::{CatalogService, FUNNEL_SORT_FIELDS, PROFESSION_SORT_FIELDS};

use super::helpers::{error_from_app, error_response, json_response, page_meta};
use super::params::{ListQueryParams, non_empty, parse_optional_id, parse_page_request};
use super::types::{FunnelsMeta, ListResponse};

pub async fn list_professions(
    query: web::Query<ListQueryParams>,
    service: web::Data<Arc<CatalogService>>,
) -> actix_web::Result<HttpResponse> {
    let config = get_config();
    let api = &config.api;
    let params = query.into_inner();

    let page = parse_page_request(non_empty(&params.page), non_empty(&params.limit), api);
    let order = PROFESSION_SORT_FIELDS.resolve(
        non_empty(&params.sort_by),
        non_empty(&params.sort_direction),
    );

    match service.list_professions(&page, &order).await {
        Ok((professions, total)) => Ok(json_response(
            StatusCode::OK,
            &ListResponse {
                data: professions,
                meta: page_meta(&page, total, &order, PROFESSION_SORT_FIELDS.field_names()),
            },
        )),
        Err(e) => {
            error!("GET /professions failed: {}", e);
            Ok(error_from_app(&e, api.expose_error_details))
        }
    }
}

pub async fn list_funnels(
    query: web::Query<ListQueryParams>,
    service: web::Data<Arc<CatalogService>>,
) -> actix_web::Result<HttpResponse> {
    let config = get_config();
    let api = &config.api;
    let params = query.into_inner();

    let page = parse_page_request(non_empty(&params.page), non_empty(&params.limit), api);
    let order = FUNNEL_SORT_FIELDS.resolve(
        non_empty(&params.sort_by),
        non_empty(&params.sort_direction),
    );
    let profession_id = parse_optional_id(non_empty(&params.profession_id));

    match service.list_funnels(&page, &order, profession_id).await {
        Ok((funnels, total)) => Ok(json_response(
            StatusCode::OK,
            &ListResponse {
                data: funnels,
                meta: FunnelsMeta {
                    page: page_meta(&page, total, &order, FUNNEL_SORT_FIELDS.field_names()),
                    profession_id,
                },
            },
        )),
        Err(e) => {
            error!("GET /funnels failed: {}", e);
            Ok(error_from_app(&e, api.expose_error_details))
        }
    }
}

pub async fn list_profession_funnels(
    path: web::Path<String>,
    query: web::Query<ListQueryParams>,
    service: web::Data<Arc<CatalogService>>,
) -> actix_web::Result<HttpResponse> {
    let config = get_config();
    let api = &config.api;
    let raw_id = path.into_inner();

    let Ok(profession_id) = raw_id.parse::<i32>() else {
        trace!("Rejecting non-numeric profession_id: {}", raw_id);
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Invalid profession_id",
        ));
    };

    let params = query.into_inner();
    let page = parse_page_request(non_empty(&params.page), non_empty(&params.limit), api);
    let order = FUNNEL_SORT_FIELDS.resolve(
        non_empty(&params.sort_by),
        non_empty(&params.sort_direction),
    );

    match service
        .list_profession_funnels(profession_id, &page, &order)
        .await
    {
        Ok((funnels, total)) => Ok(json_response(
            StatusCode::OK,
            &ListResponse {
                data: funnels,
                meta: FunnelsMeta {
                    page: page_meta(&page, total, &order, FUNNEL_SORT_FIELDS.field_names()),
                    profession_id: Some(profession_id),
                },
            },
        )),
        Err(e) => {
            if !e.is_client_error() {
                error!("GET /professions/{}/funnels failed: {}", profession_id, e);
            }
            Ok(error_from_app(&e, api.expose_error_details))
        }
    }
}

/// 职业路由 `/professions`
pub fn professions_routes() -> actix_web::Scope {
    web::scope("/professions")
        .route("", web::get().to(list_professions))
        .route("", web::head().to(list_professions))
        .route(
            "/{profession_id}/funnels",
            web::get().to(list_profession_funnels),
        )
        .route(
            "/{profession_id}/funnels",
            web::head().to(list_profession_funnels),
        )
}

/// 漏斗路由 `/funnels`
pub fn funnels_routes() -> actix_web::Scope {
    web::scope("/funnels")
        .route("", web::get().to(list_funnels))
        .route("", web::head().to(list_funnels))
}

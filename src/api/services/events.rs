//! `GET /events`

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use tracing::{error, trace};

use crate::config::get_config;
use crate::services::{EVENT_SORT_FIELDS, EventService};
use crate::storage::EventQuery;

use super::helpers::{error_from_app, json_response};
use super::params::{
    EventsQueryParams, format_day, non_empty, parse_optional_id, parse_page_request,
    resolve_date_range,
};
use super::types::{EventsMeta, ListResponse};

pub async fn list_events(
    query: web::Query<EventsQueryParams>,
    service: web::Data<Arc<EventService>>,
) -> actix_web::Result<HttpResponse> {
    let config = get_config();
    let api = &config.api;
    let params = query.into_inner();
    trace!("list_events params: {:?}", params);

    let page = parse_page_request(non_empty(&params.page), non_empty(&params.limit), api);
    let order = EVENT_SORT_FIELDS.resolve(
        non_empty(&params.sort_by),
        non_empty(&params.sort_direction),
    );

    let range = match resolve_date_range(
        non_empty(&params.from),
        non_empty(&params.to),
        Utc::now(),
        api.default_range_days,
    ) {
        Ok(range) => range,
        Err(e) => return Ok(error_from_app(&e, api.expose_error_details)),
    };

    let event_query = EventQuery {
        page,
        order,
        range,
        profession_id: parse_optional_id(non_empty(&params.profession_id)),
        funnel_id: parse_optional_id(non_empty(&params.funnel_id)),
    };

    match service.list_events(&event_query).await {
        Ok(result) => {
            let meta = EventsMeta {
                total: result.total,
                page: page.page(),
                limit: page.limit(),
                last_page: page.last_page(result.total),
                from: format_day(range.from),
                to: format_day(range.to),
                sort_by: order.field,
                sort_direction: order.direction,
                profession_id: event_query.profession_id,
                funnel_id: event_query.funnel_id,
                valid_sort_fields: EVENT_SORT_FIELDS.field_names(),
            };
            Ok(json_response(
                StatusCode::OK,
                &ListResponse {
                    data: result.events,
                    meta,
                },
            ))
        }
        Err(e) => {
            error!("GET /events failed: {}", e);
            Ok(error_from_app(&e, api.expose_error_details))
        }
    }
}

/// 事件路由 `/events`
pub fn events_routes() -> actix_web::Scope {
    web::scope("/events")
        .route("", web::get().to(list_events))
        .route("", web::head().to(list_events))
}

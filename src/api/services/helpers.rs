//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::AppError;
use crate::storage::{OrderClause, PageRequest};

use super::types::{ErrorBody, PageMeta};

/// 服务端错误对外统一返回的信息
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 构建错误响应 `{"error": message}`
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    json_response(
        status,
        &ErrorBody {
            error: message.into(),
        },
    )
}

/// 从 AppError 构建错误响应
///
/// 客户端错误原样返回信息；服务端错误只在 `expose_details` 为 true 时返回底层信息。
pub fn error_from_app(err: &AppError, expose_details: bool) -> HttpResponse {
    let status = err.http_status();
    if err.is_client_error() || expose_details {
        error_response(status, err.message())
    } else {
        error_response(status, INTERNAL_ERROR_MESSAGE)
    }
}

pub fn page_meta(
    page: &PageRequest,
    total: u64,
    order: &OrderClause,
    valid_sort_fields: Vec<&'static str>,
) -> PageMeta {
    PageMeta {
        total,
        page: page.page(),
        limit: page.limit(),
        last_page: page.last_page(total),
        sort_by: order.field,
        sort_direction: order.direction,
        valid_sort_fields,
    }
}

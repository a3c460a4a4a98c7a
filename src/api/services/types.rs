//! Response envelopes

use serde::Serialize;

use crate::storage::SortDirection;

/// `{ "data": [...], "meta": {...} }`
#[derive(Serialize, Debug)]
pub struct ListResponse<T, M> {
    pub data: Vec<T>,
    pub meta: M,
}

/// `GET /events` 的分页元数据
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EventsMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub last_page: u64,
    pub from: String,
    pub to: String,
    pub sort_by: &'static str,
    pub sort_direction: SortDirection,
    pub profession_id: Option<i32>,
    pub funnel_id: Option<i32>,
    pub valid_sort_fields: Vec<&'static str>,
}

/// 职业 / 漏斗列表的分页元数据
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub last_page: u64,
    pub sort_by: &'static str,
    pub sort_direction: SortDirection,
    pub valid_sort_fields: Vec<&'static str>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FunnelsMeta {
    #[serde(flatten)]
    pub page: PageMeta,
    pub profession_id: Option<i32>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UsersMeta {
    #[serde(flatten)]
    pub page: PageMeta,
    pub is_client: Option<bool>,
}

/// 会话列表元数据；未给定时间窗口时 from / to 为 null
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SessionsMeta {
    #[serde(flatten)]
    pub page: PageMeta,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// `GET /session?count_only=true`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SessionCount {
    pub count: u64,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// `{ "error": "..." }`
#[derive(Serialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: String,
}

/// 健康检查：数据库状态
#[derive(Serialize, Debug, Clone)]
pub struct HealthDatabaseCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct HealthChecks {
    pub database: HealthDatabaseCheck,
}

/// 健康检查响应
#[derive(Serialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub checks: HealthChecks,
    pub response_time_ms: u64,
}

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Event row with its related entities hydrated.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventRecord {
    pub event_id: String,
    pub event_name: String,
    pub pageview_id: Option<String>,
    pub session_id: Option<String>,
    pub event_time: DateTime<Utc>,
    pub user_id: Option<String>,
    pub profession_id: Option<i32>,
    pub product_id: Option<i32>,
    pub funnel_id: Option<i32>,
    pub event_source: Option<String>,
    pub event_type: Option<String>,
    /// JSON 解析成功时为对象，否则保留原始字符串
    pub event_properties: Option<serde_json::Value>,

    pub user: Option<UserRecord>,
    pub session: Option<SessionRecord>,
    pub profession: Option<ProfessionRecord>,
    pub product: Option<ProductRecord>,
    pub funnel: Option<FunnelRecord>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_client: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub session_id: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfessionRecord {
    pub profession_id: i32,
    pub profession_name: String,
    pub meta_pixel: Option<String>,
    pub meta_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductRecord {
    pub product_id: i32,
    pub product_name: String,
    pub profession_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FunnelRecord {
    pub funnel_id: i32,
    pub funnel_name: String,
    pub funnel_tag: Option<String>,
    pub global: bool,
    pub profession_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// 存储后端信息（health check 使用）
#[derive(Debug, Clone, Serialize)]
pub struct StorageInfo {
    pub backend: String,
}

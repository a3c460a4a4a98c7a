//! Query-string parsing for the listing endpoints
//!
//! Parameters are extracted as raw strings so that a malformed value never
//! fails extraction. Pagination is clamped, ids that don't parse are
//! dropped and only dates can be rejected.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::errors::AppError;
use crate::storage::{DateRange, PageRequest};

pub const INVALID_FROM_DATE: &str = "Invalid from date format. Use YYYY-MM-DD";
pub const INVALID_TO_DATE: &str = "Invalid to date format. Use YYYY-MM-DD";

/// `GET /events` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct EventsQueryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    pub profession_id: Option<String>,
    pub funnel_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// 职业 / 漏斗列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    pub profession_id: Option<String>,
}

/// `GET /users` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct UsersQueryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    pub is_client: Option<String>,
}

/// `GET /session` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct SessionsQueryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub count_only: Option<String>,
}

/// Empty strings count as absent.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn parse_page_request(page: Option<&str>, limit: Option<&str>, api: &ApiConfig) -> PageRequest {
    let page = page.and_then(|v| v.parse::<i64>().ok()).unwrap_or(1);
    let limit = limit
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(api.default_limit as i64);
    PageRequest::clamped(page, limit, api.max_limit)
}

/// Non-numeric ids are ignored rather than rejected.
pub fn parse_optional_id(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.parse::<i32>().ok())
}

/// Exactly `true` / `false`; anything else is ignored.
pub fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Strict `YYYY-MM-DD`
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 23:59:59 of the given day
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

/// Resolve the inclusive event-time window.
///
/// `from` defaults to `now - default_days`, `to` defaults to `now`.
pub fn resolve_date_range(
    from: Option<&str>,
    to: Option<&str>,
    now: DateTime<Utc>,
    default_days: i64,
) -> Result<DateRange, AppError> {
    let from = match from {
        Some(raw) => parse_day(raw)
            .map(start_of_day)
            .ok_or_else(|| AppError::invalid_date(INVALID_FROM_DATE))?,
        None => now - Duration::days(default_days),
    };

    let to = match to {
        Some(raw) => parse_day(raw)
            .map(end_of_day)
            .ok_or_else(|| AppError::invalid_date(INVALID_TO_DATE))?,
        None => now,
    };

    Ok(DateRange { from, to })
}

/// Like [`resolve_date_range`], but no window at all when neither bound is given.
pub fn resolve_optional_date_range(
    from: Option<&str>,
    to: Option<&str>,
    now: DateTime<Utc>,
    default_days: i64,
) -> Result<Option<DateRange>, AppError> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    resolve_date_range(from, to, now, default_days).map(Some)
}

pub fn format_day(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn api() -> ApiConfig {
        ApiConfig::default()
    }

    #[test]
    fn test_pagination_defaults() {
        let p = parse_page_request(None, None, &api());
        assert_eq!((p.page(), p.limit()), (1, 10));
    }

    #[test]
    fn test_pagination_non_numeric_uses_defaults() {
        let p = parse_page_request(Some("two"), Some("ten"), &api());
        assert_eq!((p.page(), p.limit()), (1, 10));
    }

    #[test]
    fn test_pagination_clamps() {
        let p = parse_page_request(Some("0"), Some("0"), &api());
        assert_eq!((p.page(), p.limit()), (1, 1));

        let p = parse_page_request(Some("-3"), Some("10000"), &api());
        assert_eq!((p.page(), p.limit()), (1, 100));

        let p = parse_page_request(Some("4"), Some("25"), &api());
        assert_eq!((p.page(), p.limit()), (4, 25));
    }

    #[test]
    fn test_optional_id() {
        assert_eq!(parse_optional_id(Some("12")), Some(12));
        assert_eq!(parse_optional_id(Some("abc")), None);
        assert_eq!(parse_optional_id(Some("1.5")), None);
        assert_eq!(parse_optional_id(None), None);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
        assert_eq!(non_empty(&None), None);
    }

    #[test]
    fn test_parse_day_is_strict() {
        assert!(parse_day("2024-01-31").is_some());
        assert!(parse_day("2024-1-31").is_none());
        assert!(parse_day("2024/01/31").is_none());
        assert!(parse_day("2024-02-30").is_none());
        assert!(parse_day("2024-01-31T00:00:00").is_none());
        assert!(parse_day("bad-date").is_none());
    }

    #[test]
    fn test_explicit_range_is_whole_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let range = resolve_date_range(Some("2024-01-01"), Some("2024-01-31"), now, 30).unwrap();
        assert_eq!(range.from, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(range.to, Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_default_range() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 8, 15, 0).unwrap();
        let range = resolve_date_range(None, None, now, 30).unwrap();
        assert_eq!(range.from, Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 0).unwrap());
        assert_eq!(range.to, now);
    }

    #[test]
    fn test_invalid_dates_are_rejected_with_fixed_messages() {
        let now = Utc::now();

        let err = resolve_date_range(Some("bad-date"), None, now, 30).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
        assert_eq!(err.message(), INVALID_FROM_DATE);

        let err = resolve_date_range(None, Some("31/01/2024"), now, 30).unwrap_err();
        assert_eq!(err.message(), INVALID_TO_DATE);
    }

    #[test]
    fn test_query_params_deserialize_camel_case_sort_keys() {
        let params: EventsQueryParams = parse_query(
            "sortBy=city&sortDirection=asc&profession_id=abc&page=2",
        );
        assert_eq!(params.sort_by.as_deref(), Some("city"));
        assert_eq!(params.sort_direction.as_deref(), Some("asc"));
        assert_eq!(params.profession_id.as_deref(), Some("abc"));
        assert_eq!(params.page.as_deref(), Some("2"));
        assert!(params.limit.is_none());
    }

    fn parse_query(query: &str) -> EventsQueryParams {
        actix_web::web::Query::<EventsQueryParams>::from_query(query)
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(Some("true")), Some(true));
        assert_eq!(parse_flag(Some("false")), Some(false));
        assert_eq!(parse_flag(Some("TRUE")), None);
        assert_eq!(parse_flag(Some("1")), None);
        assert_eq!(parse_flag(None), None);
    }

    #[test]
    fn test_optional_range() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(resolve_optional_date_range(None, None, now, 30).unwrap(), None);

        let range = resolve_optional_date_range(Some("2024-02-20"), None, now, 30)
            .unwrap()
            .unwrap();
        assert_eq!(range.from, Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap());
        assert_eq!(range.to, now);

        let err = resolve_optional_date_range(None, Some("2024-13-01"), now, 30).unwrap_err();
        assert_eq!(err.message(), INVALID_TO_DATE);
    }

    #[test]
    fn test_format_day() {
        let t = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(format_day(t), "2024-01-31");
    }
}

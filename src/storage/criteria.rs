//! Query criteria passed from the service layer into the repository.
//!
//! Every value here is already validated: pages and limits are clamped,
//! orderings come from a static allow-list and date bounds are resolved.

use chrono::{DateTime, Utc};
use sea_orm::Order;
use sea_orm::sea_query::{Alias, Expr};
use serde::Serialize;

/// Pagination window. Only constructible through clamping, so `page >= 1`,
/// `1 <= limit <= max_limit` and `offset() <= i64::MAX` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub fn clamped(page: i64, limit: i64, max_limit: u64) -> Self {
        let max_limit = max_limit.max(1);
        // 数据库驱动以 i64 绑定 OFFSET，页码过大时会溢出
        let max_page = (i64::MAX as u64 / max_limit).max(1);
        let page = if page < 1 { 1 } else { (page as u64).min(max_page) };
        let limit = if limit < 1 {
            1
        } else {
            (limit as u64).min(max_limit)
        };
        Self { page, limit }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// 0-based page index (SeaORM paginator)
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    pub fn offset(&self) -> u64 {
        self.index().saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`, 0 for an empty result
    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Exact, case-sensitive match on `asc` / `desc`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// A fully qualified `table.column` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortColumn {
    pub table: &'static str,
    pub column: &'static str,
}

impl SortColumn {
    pub const fn new(table: &'static str, column: &'static str) -> Self {
        Self { table, column }
    }

    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }

    pub fn expr(&self) -> Expr {
        Expr::col((Alias::new(self.table), Alias::new(self.column)))
    }
}

/// Validated ordering: the logical field name the client asked for, the
/// column it maps to and the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderClause {
    pub field: &'static str,
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl OrderClause {
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.column.qualified(), self.direction.as_str())
    }
}

/// Inclusive `[from, to]` window on `events.event_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EventQuery {
    pub page: PageRequest,
    pub order: OrderClause,
    pub range: DateRange,
    pub profession_id: Option<i32>,
    pub funnel_id: Option<i32>,
}

//! Sort allow-lists
//!
//! Logical sort names accepted from clients, mapped to fully qualified
//! columns. Client text is only ever used as a lookup key; the column that
//! reaches the query always comes from one of these tables.

use crate::storage::{OrderClause, SortColumn, SortDirection};

pub struct SortFieldTable {
    pub default_field: &'static str,
    pub default_direction: SortDirection,
    entries: &'static [(&'static str, SortColumn)],
}

impl SortFieldTable {
    pub const fn new(
        default_field: &'static str,
        default_direction: SortDirection,
        entries: &'static [(&'static str, SortColumn)],
    ) -> Self {
        Self {
            default_field,
            default_direction,
            entries,
        }
    }

    pub fn lookup(&self, field: &str) -> Option<(&'static str, SortColumn)> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .copied()
    }

    /// Logical names in ascending order (echoed as `valid_sort_fields`).
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }

    fn default_clause(&self) -> OrderClause {
        let (field, column) = self
            .lookup(self.default_field)
            .unwrap_or((self.default_field, self.entries[0].1));
        OrderClause {
            field,
            column,
            direction: self.default_direction,
        }
    }

    /// Resolve client-supplied `sortBy` / `sortDirection`.
    ///
    /// - unknown field: default field *and* default direction
    /// - missing field: default field with the requested direction
    /// - direction other than exactly `asc` / `desc`: default direction
    pub fn resolve(&self, sort_by: Option<&str>, direction: Option<&str>) -> OrderClause {
        let (field, column) = match sort_by {
            Some(requested) => match self.lookup(requested) {
                Some(found) => found,
                None => return self.default_clause(),
            },
            None => {
                let clause = self.default_clause();
                (clause.field, clause.column)
            }
        };

        let direction = direction
            .and_then(SortDirection::parse)
            .unwrap_or(self.default_direction);

        OrderClause {
            field,
            column,
            direction,
        }
    }
}

const fn col(table: &'static str, column: &'static str) -> SortColumn {
    SortColumn::new(table, column)
}

pub static EVENT_SORT_FIELDS: SortFieldTable = SortFieldTable::new(
    "event_time",
    SortDirection::Desc,
    &[
        ("event_id", col("events", "event_id")),
        ("event_name", col("events", "event_name")),
        ("pageview_id", col("events", "pageview_id")),
        ("session_id", col("events", "session_id")),
        ("event_time", col("events", "event_time")),
        ("event_source", col("events", "event_source")),
        ("event_type", col("events", "event_type")),
        ("fullname", col("users", "fullname")),
        ("email", col("users", "email")),
        ("phone", col("users", "phone")),
        ("is_client", col("users", "is_client")),
        ("utm_source", col("sessions", "utm_source")),
        ("utm_medium", col("sessions", "utm_medium")),
        ("utm_campaign", col("sessions", "utm_campaign")),
        ("utm_content", col("sessions", "utm_content")),
        ("utm_term", col("sessions", "utm_term")),
        ("country", col("sessions", "country")),
        ("state", col("sessions", "state")),
        ("city", col("sessions", "city")),
        ("profession_name", col("professions", "profession_name")),
        ("meta_pixel", col("professions", "meta_pixel")),
        ("meta_token", col("professions", "meta_token")),
        ("product_name", col("products", "product_name")),
        ("funnel_name", col("funnels", "funnel_name")),
        ("funnel_tag", col("funnels", "funnel_tag")),
        ("global", col("funnels", "global")),
    ],
);

pub static PROFESSION_SORT_FIELDS: SortFieldTable = SortFieldTable::new(
    "profession_id",
    SortDirection::Asc,
    &[
        ("profession_id", col("professions", "profession_id")),
        ("profession_name", col("professions", "profession_name")),
        ("created_at", col("professions", "created_at")),
    ],
);

pub static FUNNEL_SORT_FIELDS: SortFieldTable = SortFieldTable::new(
    "funnel_id",
    SortDirection::Asc,
    &[
        ("funnel_id", col("funnels", "funnel_id")),
        ("funnel_name", col("funnels", "funnel_name")),
        ("funnel_tag", col("funnels", "funnel_tag")),
        ("created_at", col("funnels", "created_at")),
    ],
);

// users / sessions 表没有时间戳列，按主键排序
pub static USER_SORT_FIELDS: SortFieldTable = SortFieldTable::new(
    "user_id",
    SortDirection::Asc,
    &[
        ("user_id", col("users", "user_id")),
        ("fullname", col("users", "fullname")),
        ("email", col("users", "email")),
        ("phone", col("users", "phone")),
        ("is_client", col("users", "is_client")),
    ],
);

pub static SESSION_SORT_FIELDS: SortFieldTable = SortFieldTable::new(
    "session_id",
    SortDirection::Asc,
    &[
        ("session_id", col("sessions", "session_id")),
        ("utm_source", col("sessions", "utm_source")),
        ("utm_medium", col("sessions", "utm_medium")),
        ("utm_campaign", col("sessions", "utm_campaign")),
        ("utm_content", col("sessions", "utm_content")),
        ("utm_term", col("sessions", "utm_term")),
        ("country", col("sessions", "country")),
        ("state", col("sessions", "state")),
        ("city", col("sessions", "city")),
    ],
);

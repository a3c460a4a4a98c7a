//! Service layer
//!
//! Use-case orchestration between the HTTP handlers and the storage backend.

mod audience_service;
mod catalog_service;
mod event_service;
pub mod sort_fields;

pub use audience_service::AudienceService;
pub use catalog_service::CatalogService;
pub use event_service::{EventPage, EventService};
pub use sort_fields::{
    EVENT_SORT_FIELDS, FUNNEL_SORT_FIELDS, PROFESSION_SORT_FIELDS, SESSION_SORT_FIELDS,
    SortFieldTable, USER_SORT_FIELDS,
};

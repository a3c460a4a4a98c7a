//! Event Insight - read API over marketing/analytics events
//!
//! Serves paginated, filterable and sortable listings of events joined with
//! their users, sessions, professions, products and funnels.
//!
//! # Features
//! - **server**: HTTP handlers, middleware and server mode (default)
//!
//! # Architecture
//! - `api`: HTTP handlers and middleware
//! - `services`: use-case layer and sort allow-lists
//! - `storage`: SeaORM repository and query criteria
//! - `config`: static configuration (TOML + environment)
//! - `runtime`: execution modes, startup and shutdown
//! - `system`: logging

#[cfg(feature = "server")]
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;

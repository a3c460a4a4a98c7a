//! Mode routing
//!
//! Entry points for the execution modes selected on the command line:
//! - Server mode (HTTP server)
//! - Migrate mode (apply schema migrations and exit)
//! - Config mode (sample configuration generation)

pub mod config;
pub mod migrate;
#[cfg(feature = "server")]
pub mod server;

pub use config::run_config_generate;
pub use migrate::run_migrate;
#[cfg(feature = "server")]
pub use server::run_server;

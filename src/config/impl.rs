use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::validators::normalize;
use super::{DEFAULT_CONFIG_PATH, StaticConfig};

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
        .load_full()
}

/// Like [`get_config`] but returns `None` before initialization.
pub fn try_get_config() -> Option<Arc<StaticConfig>> {
    CONFIG.get().map(|c| c.load_full())
}

/// Initialize the global configuration from `config.toml` in the current directory.
///
/// If the file doesn't exist, uses in-memory defaults (plus `EI__*` env overrides).
///
/// # Examples
/// ```no_run
/// use event_insight::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    init_config_from(DEFAULT_CONFIG_PATH);
}

/// Initialize the global configuration from an explicit TOML path.
///
/// Only the first call has an effect.
pub fn init_config_from(path: &str) {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(normalize(StaticConfig::load(path))));
}

/// Replace the global configuration (used by tests that need non-default settings).
pub fn update_config(config: StaticConfig) {
    match CONFIG.get() {
        Some(current) => current.store(Arc::new(normalize(config))),
        None => {
            let _ = CONFIG.set(ArcSwap::from_pointee(normalize(config)));
        }
    }
}

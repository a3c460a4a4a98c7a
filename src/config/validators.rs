//! 静态配置校验
//!
//! 加载后对数值做一次规范化，避免分页参数出现 0 或负数窗口。

use super::{ApiConfig, LoggingConfig, StaticConfig};

/// 校验 api 配置，返回第一个不合法项
pub fn validate_api_config(api: &ApiConfig) -> Result<(), String> {
    if api.max_limit == 0 {
        return Err("api.max_limit must be at least 1".to_string());
    }
    if api.default_limit == 0 || api.default_limit > api.max_limit {
        return Err(format!(
            "api.default_limit must be between 1 and api.max_limit ({}), got {}",
            api.max_limit, api.default_limit
        ));
    }
    if api.default_range_days < 1 {
        return Err(format!(
            "api.default_range_days must be positive, got {}",
            api.default_range_days
        ));
    }
    if !api.health_prefix.starts_with('/') {
        return Err(format!(
            "api.health_prefix must start with '/', got '{}'",
            api.health_prefix
        ));
    }
    Ok(())
}

pub fn validate_logging_config(logging: &LoggingConfig) -> Result<(), String> {
    match logging.format.as_str() {
        "text" | "json" => Ok(()),
        other => Err(format!(
            "logging.format must be 'text' or 'json', got '{}'",
            other
        )),
    }
}

/// 规范化配置：不合法的分组回退到默认值并打印警告
pub fn normalize(mut config: StaticConfig) -> StaticConfig {
    if let Err(e) = validate_api_config(&config.api) {
        eprintln!("[WARN] {}; falling back to default [api] settings", e);
        config.api = ApiConfig {
            expose_error_details: config.api.expose_error_details,
            ..ApiConfig::default()
        };
    }

    if let Err(e) = validate_logging_config(&config.logging) {
        eprintln!("[WARN] {}; using 'text'", e);
        config.logging.format = "text".to_string();
    }

    if config.server.cpu_count == 0 {
        config.server.cpu_count = 1;
    }

    config
}

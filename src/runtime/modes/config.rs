//! `config generate` command

use std::path::Path;

use colored::Colorize;

use crate::config::StaticConfig;
use crate::errors::{AppError, Result};

pub const DEFAULT_SAMPLE_PATH: &str = "config.example.toml";

/// Generate example configuration file
pub fn run_config_generate(output_path: Option<String>, force: bool) -> Result<String> {
    let path = output_path.unwrap_or_else(|| DEFAULT_SAMPLE_PATH.to_string());

    if !force && Path::new(&path).exists() {
        return Err(AppError::file_operation(format!(
            "File already exists: {} (use --force to overwrite)",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default().save_to_file(&path).map_err(|e| {
        AppError::file_operation(format!("Failed to write {}: {}", path, e))
    })?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Environment variables prefixed with EI__ override file values (e.g. EI__SERVER__PORT)"
            .dimmed()
    );

    Ok(path)
}

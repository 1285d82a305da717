mod config;
pub mod database;

pub use config::{ChartConfig, Config, DatabaseConfig, ServerConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/studylog[-dev]/` based on STUDYLOG_ENV.
///
/// Set STUDYLOG_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYLOG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studylog-dev")
    } else {
        base_dir.join("studylog")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

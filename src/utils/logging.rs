//! Diagnostic logging for the long-running services (topbar, reminders).
//!
//! Stdout belongs to the topbar line, so records go to a daily rolling file
//! under `<config dir>/logs`.

use std::path::Path;
use std::sync::LazyLock;

use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

use crate::errors::{AppError, AppResult};

pub const TOPBAR_PREFIX: &str = "topbar";
pub const REMIND_PREFIX: &str = "remind";

/// `RUST_LOG` is used verbatim; otherwise the configured level applies to
/// this crate only.
fn filter_directives(rust_log: Option<String>, log_level: &str) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => format!(
            "{}={}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
            log_level
        ),
    }
}

pub fn enable_logging(prefix: &str, config_dir: &Path, log_level: &str) -> AppResult<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(prefix)
        .build(config_dir.join("logs"))
        .map_err(|e| AppError::Config(format!("cannot create log appender: {}", e)))?;

    let directives = filter_directives(std::env::var("RUST_LOG").ok(), log_level);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_ansi(false)
        .with_writer(appender)
        .try_init()
        .map_err(|e| AppError::Config(format!("cannot install log subscriber: {}", e)))?;

    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_is_passed_through() {
        assert_eq!(
            filter_directives(Some("debug,rusqlite=warn".into()), "info"),
            "debug,rusqlite=warn"
        );
    }

    #[test]
    fn config_level_is_scoped_to_the_crate() {
        assert_eq!(filter_directives(None, "debug"), "classtop=debug");
        assert_eq!(filter_directives(Some("  ".into()), "warn"), "classtop=warn");
    }
}

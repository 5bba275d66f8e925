use crate::config::LoggingConfig;
use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "storefront_deck=info";

/// Initialize logging.
///
/// The terminal belongs to the presentation so logs only ever go to a file, and nothing is logged
/// unless a file is configured.
pub fn init_file_logger(config: &LoggingConfig) -> Result<(), LoggingError> {
    let Some(path) = &config.path else {
        return Ok(());
    };
    let filter = build_filter(config.level.as_deref())?;
    let file = open_log_file(path)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;
    tracing::info!("logging to {}", path.display());
    Ok(())
}

/// Build the filter out of the configured level, falling back to `RUST_LOG` and then to the
/// default one. A configured level that can't be parsed is an error.
fn build_filter(level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel(level.to_string(), e.to_string()))
        }
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::OpenFile(path.display().to_string(), e))
}

/// An error when setting up logging.
#[derive(thiserror::Error, Debug)]
pub enum LoggingError {
    #[error("opening log file '{0}': {1}")]
    OpenFile(String, io::Error),

    #[error("invalid log level '{0}': {1}")]
    InvalidLevel(String, String),

    #[error("initializing logger: {0}")]
    Init(String),
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn no_path_is_a_no_op() {
        let config = LoggingConfig { path: None, level: Some("debug".into()) };
        assert!(init_file_logger(&config).is_ok());
    }

    #[rstest]
    #[case::explicit("storefront_deck=debug")]
    #[case::global("warn")]
    fn filter(#[case] level: &str) {
        let filter = build_filter(Some(level)).expect("invalid filter");
        assert_eq!(filter.to_string(), EnvFilter::new(level).to_string());
    }

    #[test]
    fn invalid_level() {
        let result = build_filter(Some("storefront_deck=loud"));
        assert!(matches!(result, Err(LoggingError::InvalidLevel(level, _)) if level == "storefront_deck=loud"));
    }

    #[test]
    fn invalid_level_is_reported_before_opening_the_file() {
        let directory = tempfile::tempdir().expect("failed to create temp dir");
        let path = directory.path().join("deck.log");
        let config = LoggingConfig { path: Some(path.clone()), level: Some("storefront_deck=loud".into()) };
        assert!(matches!(init_file_logger(&config), Err(LoggingError::InvalidLevel(..))));
        assert!(!path.exists());
    }

    #[test]
    fn log_file_is_created() {
        let directory = tempfile::tempdir().expect("failed to create temp dir");
        let path = directory.path().join("deck.log");
        open_log_file(&path).expect("failed to open");
        assert!(path.exists());
    }

    #[test]
    fn missing_directory() {
        let directory = tempfile::tempdir().expect("failed to create temp dir");
        let path = directory.path().join("missing").join("deck.log");
        let result = open_log_file(&path);
        assert!(matches!(result, Err(LoggingError::OpenFile(..))));
    }
}

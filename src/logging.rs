//! File-based logging for tvfinder
//!
//! The terminal belongs to the UI, so tracing output goes to a daily rolling
//! file instead of stdout.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "tvfinder";
const LOG_FILE_SUFFIX: &str = "log";
const DEFAULT_FILTER: &str = "tvfinder=debug,reqwest=info,warn";

/// Daily rolling appender writing `<log_dir>/tvfinder.YYYY-MM-DD.log`
fn file_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)?;
    Ok(appender)
}

/// Initialize the logging system.
///
/// Logs are written to `<log_dir>/tvfinder.YYYY-MM-DD.log` with daily rotation.
/// `RUST_LOG` overrides the default filter, which is:
/// - `tvfinder` modules: DEBUG
/// - `reqwest`: INFO
/// - Other crates: WARN
pub fn init_logging(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);

    // Flushes on drop, so it must live as long as the process
    Box::leak(Box::new(guard));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(log_dir = %log_dir.display(), "Logging to file");

    Ok(())
}

/// Debug event for a catalog request leaving the client
#[macro_export]
macro_rules! log_api_request {
    ($operation:expr, $($field:tt)*) => {
        tracing::debug!(operation = $operation, $($field)*, "Catalog request sent")
    };
}

/// Outcome of a catalog request; cancellations stay at debug level
#[macro_export]
macro_rules! log_api_result {
    ($operation:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::info!(operation = $operation, "Catalog request succeeded"),
            Err($crate::model::CatalogError::Cancelled) => {
                tracing::debug!(operation = $operation, "Catalog request cancelled")
            }
            Err(e) => tracing::error!(operation = $operation, error = %e, "Catalog request failed"),
        }
    };
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::NaiveDate;

    use super::*;
    use crate::model::CatalogError;

    #[test]
    fn test_api_macros_accept_every_outcome() {
        let outcomes: [Result<usize, CatalogError>; 3] = [
            Ok(2),
            Err(CatalogError::Cancelled),
            Err(CatalogError::Network("HTTP 500 Internal Server Error".to_string())),
        ];
        for result in outcomes {
            log_api_request!("search", query = "lost");
            log_api_result!("search", result);
        }
    }

    #[test]
    fn test_log_file_has_date_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut appender = file_appender(dir.path()).unwrap();
        writeln!(appender, "hello").unwrap();
        appender.flush().unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1, "{:?}", names);

        let date = names[0]
            .strip_prefix("tvfinder.")
            .and_then(|rest| rest.strip_suffix(".log"))
            .unwrap_or_else(|| panic!("unexpected log file name {}", names[0]));
        assert!(NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok(), "{}", date);
    }
}

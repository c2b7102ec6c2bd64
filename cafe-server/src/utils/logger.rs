//! Logging Infrastructure
//!
//! Structured logging for development (pretty console) and production (JSON).
//! With a log directory configured:
//! - `app/` daily rotating application logs, deleted after 14 days
//! - `audit/` admin actions (target `audit`), kept
//! - `security/` rejected admin access (target `security`), kept

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio_util::sync::CancellationToken;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, prelude::*};

/// Days an application log file is kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

const DEDICATED_TARGETS: [&str; 2] = ["audit", "security"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Parse the date out of `app.YYYY-MM-DD` (tracing-appender naming)
fn app_log_date(file_name: &str) -> Option<NaiveDate> {
    let date_part = file_name
        .strip_prefix("app.")
        .or_else(|| file_name.strip_prefix("app-"))?;
    let date_part = date_part.strip_suffix(".log").unwrap_or(date_part);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Delete application log files older than [`APP_LOG_RETENTION_DAYS`]
///
/// Returns the number of files removed. Audit and security logs are never
/// touched.
pub fn cleanup_old_logs(log_dir: &Path, today: NaiveDate) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = today - chrono::Duration::days(APP_LOG_RETENTION_DAYS);
    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date) = app_log_date(name)
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

/// Hourly cleanup until shutdown
pub async fn periodic_cleanup(log_dir: PathBuf, shutdown: CancellationToken) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(3600)) => {
                if let Err(e) = cleanup_old_logs(&log_dir, Local::now().date_naive()) {
                    tracing::error!(error = %e, "Failed to cleanup old logs");
                }
            }
            _ = shutdown.cancelled() => return,
        }
    }
}

fn file_layer(dir: &Path, prefix: &str, json: bool, filter: fn(&str) -> bool) -> BoxedLayer {
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, prefix);
    let target_filter =
        tracing_subscriber::filter::filter_fn(move |meta| filter(meta.target()));

    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(appender));

    if json {
        layer.json().with_current_span(true).with_filter(target_filter).boxed()
    } else {
        layer.with_filter(target_filter).boxed()
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - JSON output (production) instead of pretty (development)
/// * `log_dir` - Optional directory for file logging
///
/// # Examples
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// // Development setup (console only)
/// cafe_server::init_logger_with_file("debug", false, None)?;
/// # Ok(())
/// # }
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    layers.push(if json_format {
        console
            .json()
            .with_current_span(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        console.boxed()
    });

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_dir = log_dir.join("app");
        let audit_dir = log_dir.join("audit");
        let security_dir = log_dir.join("security");
        for d in [&app_dir, &audit_dir, &security_dir] {
            fs::create_dir_all(d)?;
        }

        layers.push(file_layer(&app_dir, "app", json_format, |t| {
            !DEDICATED_TARGETS.contains(&t)
        }));
        layers.push(file_layer(&audit_dir, "audit", json_format, |t| t == "audit"));
        layers.push(file_layer(&security_dir, "security", json_format, |t| {
            t == "security"
        }));
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Audit log helper - records admin operations on target `audit`
///
/// # Examples
/// ```ignore
/// audit_log!("admin", "delete", "bookings:3f2a");
/// audit_log!("admin", "delete", "subscribers:91c0", "unsubscribe request");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($actor:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            actor = $actor,
            action = $action,
            resource = $resource,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($actor:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            actor = $actor,
            action = $action,
            resource = $resource,
            details = $details,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

/// Security log helper - records rejected access on target `security`
///
/// ```ignore
/// security_log!(WARN, "auth_missing", uri = %parts.uri);
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
}

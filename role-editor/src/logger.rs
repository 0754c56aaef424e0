//! Logging Infrastructure
//!
//! Console logging in pretty or JSON form, plus an optional daily-rotating
//! file under `<log_dir>/role-editor.YYYY-MM-DD`. `RUST_LOG` overrides the
//! configured level when set.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON lines instead of human-readable output
/// * `log_dir` - Optional directory for a daily log file
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "role-editor");
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(appender))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Audit log helper - records committed role changes
///
/// Emitted under the `audit` target so it can be routed separately.
///
/// # Examples
/// ```no_run
/// role_editor::audit_log!("update", 7, 12usize);
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $role_id:expr, $permission_count:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            role_id = $role_id,
            permission_count = $permission_count,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

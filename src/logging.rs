//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Console logs go to stderr so command results on stdout stay clean.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//! - File logging is refused if any ancestor of the file path is a symlink.

use anyhow::Result;
use chrono::Local;
use linksym::output as out;
use linksym::platform::open_log_file_secure_append;
use linksym::{LogLevel, default_log_path, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::{Registry, registry};
use tracing_subscriber::util::SubscriberInitExt;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
    }
}

/// Only this crate's events; dependencies stay silent.
#[inline]
fn env_filter_from_level(level_filter: LevelFilter) -> EnvFilter {
    EnvFilter::new(format!("linksym={level_filter}")).add_directive(LevelFilter::ERROR.into())
}

fn fmt_layer<W>(json: bool, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_writer(writer)
            .boxed()
    } else {
        tsfmt::layer()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(false)
            .compact()
            .with_writer(writer)
            .boxed()
    }
}

/// Try to open a non-blocking file writer for logging:
/// - Refuse if any ancestor is a symlink (prints a warning and returns None)
/// - Best-effort create parent directory
/// - Open file for append and wrap with non_blocking
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            out::print_warn(&format!(
                "Refusing to enable file logging: ancestor of {} is a symlink",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "Error checking log path {} for symlinks: {e}",
                path.display()
            ));
            return None;
        }
        Ok(false) => {}
    }

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("Failed to open log file {}: {e}", path.display()));
            None
        }
    }
}

/// Initialize tracing. Returns the WorkerGuard of the file appender, if one
/// was created; it must be held until shutdown to flush logs.
pub fn init_tracing(
    lvl: LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter_from_level(to_level_filter(lvl));
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(json, std::io::stderr)];
    let mut guard = None;

    if let Some(path) = log_file {
        match maybe_open_non_blocking_writer(path) {
            Some((writer, g)) => {
                layers.push(fmt_layer(json, writer));
                guard = Some(g);
            }
            None => {
                if let Some(def) = default_log_path() {
                    out::print_info(&format!(
                        "File logging disabled; the default log path is {}",
                        def.display()
                    ));
                }
            }
        }
    }

    registry().with(layers).with(env_filter).try_init()?;
    Ok(guard)
}

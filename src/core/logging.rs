//! Logging Module
//!
//! Sets up `tracing` for the wizard tool:
//! - JSON file logs with daily rotation in the app data directory
//! - `log` crate events redirected to `tracing`
//! - Background gzip compression of rotated log files

use std::fs;
use std::io;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_NAME: &str = "campaign-wizard.log";

/// Initialize the logging system for TUI mode.
///
/// This sets up:
/// 1. A file logger (JSON formatted) in `log_dir`, which should live outside
///    the source tree so file watchers don't pick up log writes.
/// 2. Redirects standard `log` crate events to `tracing`.
///
/// Nothing is written to stdout, so log lines don't corrupt the terminal
/// while it is in raw/alternate-screen mode.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered logs are flushed on shutdown.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    let (file_layer, guard) = file_layer(log_dir);

    tracing_subscriber::registry().with(file_layer).init();

    finish_init(log_dir);
    guard
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
}

fn file_layer<S>(log_dir: &Path) -> (impl Layer<S>, WorkerGuard)
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    (layer, guard)
}

fn finish_init(log_dir: &Path) {
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    tracing::info!(
        path = %log_dir.join(LOG_FILE_NAME).display(),
        "Logging initialized (daily rolling)"
    );

    // Compress after init so the log macros inside work
    let log_dir = log_dir.to_path_buf();
    std::thread::spawn(move || compress_old_logs(&log_dir));
}

/// Whether a file in the log directory is a rotated log that should be gzipped.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_NAME}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Compress rotated log files
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_path_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_path_name.push(".gz");
    let parent_dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path = parent_dir.join(gz_path_name);

    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());

    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;

    Ok(())
}

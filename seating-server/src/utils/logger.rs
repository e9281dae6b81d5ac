//! Logging Infrastructure
//!
//! Structured logging via `tracing-subscriber`. `RUST_LOG` wins over the
//! configured level; with a log directory, output goes to a daily rolling
//! file instead of stdout.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional JSON format and file output
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        match std::fs::create_dir_all(log_path) {
            Ok(()) => Some(tracing_appender::rolling::daily(log_path, "seating-server")),
            Err(e) => {
                eprintln!("Cannot create log directory {dir}: {e}, logging to stdout");
                None
            }
        }
    });

    let result = match (json, file_appender) {
        (true, Some(writer)) => builder.json().with_writer(writer).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(writer)) => builder.with_ansi(false).with_writer(writer).try_init(),
        (false, None) => builder.try_init(),
    };

    // 测试中可能已经初始化过
    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}

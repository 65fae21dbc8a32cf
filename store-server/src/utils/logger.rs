//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate, the shared crate and tower-http.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Default filter directives for `log_level`
pub fn default_directives(log_level: &str) -> String {
    format!("store_server={log_level},shared={log_level},tower_http={log_level}")
}

/// Initialize the global subscriber
///
/// `json` switches to one JSON object per line (production). With
/// `log_dir` pointing at an existing directory, output goes to a daily
/// rolling file instead of stdout.
pub fn init_logger(log_level: &str, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let file_dir = log_dir.filter(|dir| {
        let exists = Path::new(dir).is_dir();
        if !exists {
            eprintln!("log directory {dir} does not exist, logging to stdout");
        }
        exists
    });
    let writer = match file_dir {
        Some(dir) => BoxMakeWriter::new(tracing_appender::rolling::daily(dir, "store-server")),
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .with_ansi(file_dir.is_none() && !json)
        .with_writer(writer);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

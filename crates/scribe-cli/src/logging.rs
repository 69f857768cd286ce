use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// File that receives the log when `SCRIBE_DEBUG` is set. Hook stderr is
/// not shown to the user, so a file is the only place to look.
const DEBUG_LOG_FILE: &str = "scribe-hook-debug.log";

/// Initialise the global tracing subscriber.
///
/// `SCRIBE_LOG` takes an `EnvFilter` directive (default `warn`, or `debug`
/// when `SCRIBE_DEBUG` is set).
pub fn init() {
    if std::env::var_os("SCRIBE_DEBUG").is_some() {
        let log_path = std::env::temp_dir().join(DEBUG_LOG_FILE);
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter("debug"))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            return;
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env("SCRIBE_LOG").unwrap_or_else(|_| EnvFilter::new(default))
}

use {
    chrono::Local,
    std::{
        fs::{self, OpenOptions},
        path::{Path, PathBuf},
    },
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

/// Path of today's log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("{}.log", Local::now().format("%Y-%m-%d")))
}

/// Installs the global subscriber: a colored console layer, plus a plain file
/// layer appending to `<log_dir>/<YYYY-MM-DD>.log` unless `log_dir` is empty.
///
/// `RUST_LOG` takes precedence over the `debug` flag. Returns the log file in use.
pub fn init_logging(debug: bool, log_dir: &str) -> std::io::Result<Option<PathBuf>> {
    let log_file = if log_dir.is_empty() {
        None
    } else {
        let dir = PathBuf::from(log_dir);
        fs::create_dir_all(&dir)?;
        Some(log_file_path(&dir))
    };

    let file_layer = match &log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_target(false)
                    .with_ansi(false)
                    .compact(),
            )
        }
        None => None,
    };

    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_ansi(true).compact())
        .with(file_layer)
        .init();

    match &log_file {
        Some(path) => tracing::info!("Logging to: {}", path.display()),
        None => tracing::info!("Logging to console only"),
    }

    Ok(log_file)
}

use std::{
    fmt,
    fs::{self, OpenOptions},
    io,
    path::Path,
};

use env_logger::{Builder, Env, Target};

/// Sends log output to `path`, since the terminal belongs to the UI while it runs.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(path: &Path) -> Result<(), LoggingInitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|_| LoggingInitError::AlreadyInitialized)
}

#[derive(Debug)]
pub enum LoggingInitError {
    LogFile(io::Error),
    AlreadyInitialized,
}

impl fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoggingInitError::LogFile(err) => write!(f, "Failed to open log file: {}", err),
            LoggingInitError::AlreadyInitialized => write!(f, "Logger was already initialized"),
        }
    }
}

impl From<io::Error> for LoggingInitError {
    fn from(error: io::Error) -> Self {
        LoggingInitError::LogFile(error)
    }
}

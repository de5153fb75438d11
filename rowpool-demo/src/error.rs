use thiserror::Error;

/// Demo error type.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("recycler error: {0}")]
    Recycler(#[from] rowpool::ConfigError),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("limit must be a positive number of calls, got {0}")]
    InvalidLimit(u64),

    #[error("seconds must be a positive window length, got {0}")]
    InvalidPeriod(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GateError>;

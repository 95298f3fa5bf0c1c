use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("worker error: {0}")]
    Worker(String),
}

impl From<thirteenth_core::ConfigError> for SimError {
    fn from(value: thirteenth_core::ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}

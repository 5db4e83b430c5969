use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AlertError {
    /// 是否為設定相關錯誤 (可在啟動時提示使用者)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AlertError::ConfigError { .. }
                | AlertError::MissingConfigError { .. }
                | AlertError::InvalidConfigValueError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AlertError>;

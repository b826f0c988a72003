use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{title}: {message}")]
    ValidationError { title: String, message: String },

    #[error("HTTP error! status: {status}")]
    HttpStatusError { status: u16 },

    #[error("{message}")]
    ApiError { message: String },
}

impl ConsoleError {
    pub fn validation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::ApiError {
            message: message.into(),
        }
    }

    /// 給使用者看的訊息 (不含錯誤分類前綴)
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::RequestError(e) => format!("Could not reach the console API: {}", e),
            Self::ValidationError { title, message } => format!("{} - {}", title, message),
            Self::ApiError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

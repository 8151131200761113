use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("HTML processing error: {message}")]
    ProcessingError { message: String },

    #[error("Webhook rejected the message: HTTP {status} {body}")]
    WebhookRejected { status: u16, body: String },
}

impl WatchError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            WatchError::HttpError(e) if e.is_timeout() => {
                "The remote server did not answer in time".to_string()
            }
            WatchError::HttpError(_) => "Could not reach the remote server".to_string(),
            WatchError::IoError(e) => format!("File access failed: {}", e),
            WatchError::SerializationError(_) => "A JSON document could not be read".to_string(),
            WatchError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            WatchError::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            WatchError::ConfigError { .. } | WatchError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            WatchError::ProcessingError { message } => format!("Page could not be parsed: {}", message),
            WatchError::WebhookRejected { status, .. } => {
                format!("The chat webhook answered with HTTP {}", status)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WatchError::HttpError(_) => "Check network connectivity and the target URL",
            WatchError::IoError(_) => "Check that the path exists and is writable",
            WatchError::SerializationError(_) => "Fix or remove the offending JSON file",
            WatchError::TomlError(_) | WatchError::ConfigError { .. } => {
                "Review the configuration file syntax"
            }
            WatchError::MissingConfigError { .. } => {
                "Set SLACK_WEBHOOK_URL or run with TEST_MODE=true"
            }
            WatchError::InvalidConfigValueError { .. } => "Correct the value and run again",
            WatchError::ProcessingError { .. } => "The page layout may have changed",
            WatchError::WebhookRejected { .. } => "Verify the webhook URL and target channel",
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Token signing failed: {0}")]
    SigningError(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Authorization failed: {message}")]
    AuthError { message: String },

    #[error("Sheets API returned {status}: {message}")]
    SheetsApiError { status: u16, message: String },
}

impl FolioError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            FolioError::HttpError(e) if e.is_timeout() => {
                "The remote service did not answer in time".to_string()
            }
            FolioError::HttpError(_) => "Could not reach the remote service".to_string(),
            FolioError::IoError(e) => format!("File access failed: {}", e),
            FolioError::SerializationError(_) => "Received malformed JSON".to_string(),
            FolioError::SigningError(_) => {
                "The service-account private key could not be used for signing".to_string()
            }
            FolioError::ConfigError { message } => format!("Configuration problem: {}", message),
            FolioError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            FolioError::MissingConfigError { field } => {
                format!("Setting '{}' must be provided", field)
            }
            FolioError::AuthError { .. } => {
                "Spreadsheet credentials were rejected".to_string()
            }
            FolioError::SheetsApiError { status, .. } => {
                format!("Spreadsheet service refused the append (HTTP {})", status)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

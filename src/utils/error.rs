use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid order event: {message}")]
    InvalidEventError { message: String },

    #[error("Identity lookup failed: {message}")]
    IdentityError { message: String },

    #[error("Directory read failed: {message}")]
    DirectoryError { message: String },

    #[error("Email provider rejected message (status {status}): {body}")]
    ProviderError { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, ReceiptError>;

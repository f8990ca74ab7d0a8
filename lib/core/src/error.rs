use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown {attribute} value: {value:?}")]
    UnknownAttributeValue { attribute: &'static str, value: String },

    #[error("Invalid filter payload: {0}")]
    InvalidFilterPayload(String),

    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Search backend error (status {status}): {message}")]
    BackendError { status: u16, message: String },

    #[error("Invalid catalog item: {0}")]
    InvalidItem(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownAttributeValue { .. } | Error::InvalidFilterPayload(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

use thiserror::Error;

/// Reasons a review cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("comment must not be empty")]
    EmptyComment,
}

/// Failures talking to a pavilion store, local or remote.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("store responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("database error: {0}")]
    Database(String),

    #[error(transparent)]
    Invalid(#[from] ReviewError),

    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

#[cfg(feature = "ssr")]
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

#[cfg(feature = "ssr")]
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

impl From<gloo_net::Error> for StoreError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => StoreError::Decode(e.to_string()),
            other => StoreError::Transport(other.to_string()),
        }
    }
}

/// Invalid store settings in the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is set but {1} is missing")]
    MissingKey(&'static str, &'static str),

    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

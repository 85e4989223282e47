use thiserror::Error;

/// Errors raised while building or mutating a `ContextStore`.
#[derive(Error, Debug)]
pub enum ContextError {
    /// A context name was supplied with a non-string type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The inbound webhook payload lacks the session or context list.
    #[error("Invalid webhook request: {0}")]
    InvalidRequest(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ContextError {
    fn from(err: toml::de::Error) -> Self {
        ContextError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ContextError>;

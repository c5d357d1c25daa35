use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("resource path not found: [provided={0}]")]
    NotFound(String),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("failed to generate provenance: {0}")]
    Generation(Box<Error>),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Initialization error: {0}")]
    InitializationError(String),
}

impl Error {
    /// Wraps `cause` as a generation failure.
    pub fn generation(cause: Error) -> Self {
        Error::Generation(Box::new(cause))
    }

    /// Returns the innermost error, looking through `Generation` wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Generation(inner) => inner.root_cause(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Error::NotFound(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.root_cause(), Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FindError {
    // Backend
    #[error("path not found: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed entry: {0}")]
    MalformedEntry(String),

    // Evaluation
    #[error("specification failed on {path}: {message}")]
    Predicate { path: String, message: String },

    // Construction
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Third-party extensibility
    #[error("backend error: {0}")]
    Backend(String),
}

impl FindError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::PermissionDenied(p)
            | Self::Io { path: p, .. }
            | Self::Predicate { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Shorthand for an evaluation fault raised by an atomic specification.
    pub fn predicate(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Predicate {
            path:    path.into(),
            message: message.into(),
        }
    }
}

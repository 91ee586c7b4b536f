//! Error taxonomy for codesnap.
//!
//! Every failure is converted to a status message at the boundary of the
//! action that triggered it; none of these terminate the application.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing at save time. The session stays dirty.
    #[error("{0}")]
    Validation(String),

    /// An operation referenced a snippet id that is no longer present.
    #[error("snippet {0} no longer exists")]
    NotFound(i64),

    /// The durable store is unreachable or a statement failed.
    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An external collaborator (formatter, image renderer, clipboard tool)
    /// failed or exited abnormally. The edit buffer is never discarded.
    #[error("{collaborator}: {reason}")]
    Collaborator { collaborator: String, reason: String },
}

impl Error {
    pub fn collaborator(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Collaborator {
            collaborator: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Everything a submit cycle can surface to the user. The messages here are
/// the exact strings shown in the result area.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter a prompt.")]
    Validation,

    #[error("{0}")]
    Generation(String),

    #[error("An unexpected error occurred.")]
    Unknown,
}

impl SessionError {
    /// Classifies a failed collaborator call. The collaborator's own message
    /// is kept verbatim when it has one; a blank message falls back to the
    /// generic string.
    pub fn from_service(err: &anyhow::Error) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            SessionError::Unknown
        } else {
            SessionError::Generation(message)
        }
    }
}

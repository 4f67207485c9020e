use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested operation could not start; nothing was performed.
    #[error("Precondition failed: {0}")]
    Precondition(String),
    /// A fatal I/O failure mid-operation (e.g. unwritable output).
    #[error("I/O error: {0}")]
    Io(String),
    /// An operation of the same kind is already running.
    #[error("{0}")]
    Busy(String),
}

impl Serialize for CoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

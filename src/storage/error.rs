use thiserror::Error;

/// Errors writing the cart snapshot.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Snapshot serialization error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

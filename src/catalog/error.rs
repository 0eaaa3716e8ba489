use thiserror::Error;

/// Errors from the catalog and stock providers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The request never produced a response.
    #[error("Catalog request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("Catalog returned status {status} for {path}")]
    Status { status: u16, path: String },

    /// The response body did not match the expected record.
    #[error("Catalog response error: {0}")]
    Decode(String),
}

//! Document store error types.

/// Errors from loading records out of the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned an error status
    #[error("store error {status}: {message}")]
    Api { status: u16, message: String },

    /// A collection could not be decoded into typed records
    #[error("invalid {collection} data: {message}")]
    Json {
        collection: &'static str,
        message: String,
    },

    /// Reading a local collection file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The store client could not be constructed
    #[error("store not configured: {0}")]
    NotConfigured(String),
}

use thiserror::Error;

/// Errors from the FAQ record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open FAQ database at {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("FAQ database query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("no FAQ entry with id {id}")]
    RowNotFound { id: i64 },
}

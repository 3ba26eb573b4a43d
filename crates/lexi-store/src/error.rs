use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value could not be (de)serialized: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

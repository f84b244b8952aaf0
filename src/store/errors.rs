use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to store object {key}: {message}")]
    Put { key: String, message: String },
}

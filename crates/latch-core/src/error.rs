//! Error types for passcode storage

/// Passcode storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse passcode storage: {0}")]
    Parse(String),

    #[error("Failed to serialize passcode storage: {0}")]
    Serialize(String),

    #[error("Failed to hash passcode: {0}")]
    Hash(String),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Snapshot too short: {size} bytes")]
    Truncated { size: usize },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

impl SnapshotError {
    /// Whether the bytes themselves are damaged, as opposed to a format
    /// or version the reader does not handle.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            SnapshotError::Decompression
                | SnapshotError::Truncated { .. }
                | SnapshotError::ChecksumMismatch
        )
    }
}

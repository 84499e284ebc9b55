/// Failures of the SQLite layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A statement, transaction or connection failed.
    #[error("sqlite: {message}")]
    SqliteError { message: String },

    /// A schema migration failed and was rolled back.
    #[error("schema migration to v{version} failed: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// `PRAGMA integrity_check` reported problems.
    #[error("integrity check failed: {details}")]
    CorruptionDetected { details: String },
}

impl StorageError {
    pub fn sqlite(message: impl Into<String>) -> Self {
        Self::SqliteError {
            message: message.into(),
        }
    }
}

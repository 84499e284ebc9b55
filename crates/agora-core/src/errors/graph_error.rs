/// Idea-graph resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("unsupported operation {operation}: {reason}")]
    UnsupportedOperation { operation: String, reason: String },
}

impl GraphError {
    pub fn unsupported(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

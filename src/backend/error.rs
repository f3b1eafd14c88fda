//! Backend-specific error types.

/// Errors that can occur during backend operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Unavailable(String),

    /// The backend has no task with this id
    #[error("Task not found: {id}")]
    TaskNotFound { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let error = BackendError::Unavailable("timeout".to_string());
        assert!(error.to_string().contains("Request failed"));
        assert!(error.to_string().contains("timeout"));

        let error = BackendError::TaskNotFound { id: 42 };
        assert!(error.to_string().contains("Task not found"));
        assert!(error.to_string().contains("42"));
    }
}

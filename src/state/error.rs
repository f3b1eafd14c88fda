//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No task is selected in the list
    #[error("No task selected")]
    NoTaskSelected,

    /// No task form is open
    #[error("No task form open")]
    NoTaskForm,

    /// The action does not apply to the current view
    #[error("Invalid view transition: {0}")]
    InvalidViewTransition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::NoTaskSelected;
        assert!(error.to_string().contains("No task selected"));

        let error = StateError::NoTaskForm;
        assert!(error.to_string().contains("No task form"));

        let error = StateError::InvalidViewTransition("edit from list".to_string());
        assert!(error.to_string().contains("Invalid view transition"));
        assert!(error.to_string().contains("edit from list"));
    }
}

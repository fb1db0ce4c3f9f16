use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    /// No user is signed in, or the backing store rejected the call.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Blank list name or task title. Nothing was submitted.
    #[error("Validation skipped: {0}")]
    ValidationSkipped(String),

    /// User-supplied text that does not name a valid value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The relocated copy `copy_id` was inserted under `to` but the original
    /// `task_id` under `from` could not be deleted, so the task now exists
    /// in both lists.
    #[error("Task {task_id} copied to list {to} as {copy_id} but not removed from list {from}: {reason}")]
    PartialRelocate {
        task_id: String,
        copy_id: String,
        from: String,
        to: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl TodoError {
    pub fn no_session() -> Self {
        TodoError::StoreUnavailable("no user is signed in".to_string())
    }

    /// Blank input is a silent no-op rather than a failure.
    pub fn is_validation_skip(&self) -> bool {
        matches!(self, TodoError::ValidationSkipped(_))
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(err: serde_json::Error) -> Self {
        TodoError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_relocate_message_names_both_lists() {
        let err = TodoError::PartialRelocate {
            task_id: "t1".into(),
            copy_id: "t2".into(),
            from: "inbox".into(),
            to: "work".into(),
            reason: "offline".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("inbox"));
        assert!(msg.contains("work"));
        assert!(msg.contains("offline"));
    }

    #[test]
    fn test_validation_skip_detection() {
        assert!(TodoError::ValidationSkipped("blank".into()).is_validation_skip());
        assert!(!TodoError::no_session().is_validation_skip());
    }
}

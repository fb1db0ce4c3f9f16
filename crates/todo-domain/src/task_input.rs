use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::priority::Priority;
use crate::task::TaskRecord;

/// Pending values of a list's new-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl TaskInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Title and description are stored as typed.
    pub fn to_record(&self, created_at: DateTime<Utc>) -> TaskRecord {
        TaskRecord {
            title: self.title.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            due_date: self.due_date,
            priority: self.priority,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(TaskInput::default().is_blank());
        assert!(TaskInput::new("  \t\n").is_blank());
        assert!(!TaskInput::new(" x ").is_blank());
    }

    #[test]
    fn test_to_record_defaults() {
        let now = Utc::now();
        let record = TaskInput::new("Call mom").to_record(now);
        assert_eq!(record.title, "Call mom");
        assert_eq!(record.description, None);
        assert_eq!(record.priority, Priority::Low);
        assert_eq!(record.created_at, now);
    }
}

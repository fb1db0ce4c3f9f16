use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::priority::Priority;
use crate::record::{blank_as_none, due_date};

pub type TaskId = String;

/// Stored shape of a task document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "due_date::deserialize")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn from_record(id: TaskId, record: TaskRecord) -> Self {
        Self {
            id,
            title: record.title,
            description: record.description,
            due_date: record.due_date,
            priority: record.priority,
            created_at: record.created_at,
        }
    }

    /// Fields of this task without its identity.
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            created_at: self.created_at,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::priority::Priority;
use crate::task::{Task, TaskId};

pub type ListId = String;

/// Stored shape of a list document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecord {
    pub name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl ListRecord {
    pub fn new(name: String, created_by: String) -> Self {
        Self {
            name,
            created_by,
            created_at: Utc::now(),
        }
    }
}

/// A list together with the tasks fetched under it. Task order is the
/// order the store returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TodoList {
    pub fn from_record(id: ListId, record: ListRecord, tasks: Vec<Task>) -> Self {
        Self {
            id,
            name: record.name,
            created_by: record.created_by,
            created_at: record.created_at,
            tasks,
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Tasks in one priority column, in fetch order.
    pub fn tasks_with_priority(&self, priority: Priority) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.priority == priority)
    }

    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| &t.id == task_id)?;
        Some(self.tasks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, priority: Priority) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {}", id),
            description: None,
            due_date: None,
            priority,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_tasks_with_priority_keeps_fetch_order() {
        let record = ListRecord::new("Home".into(), "ada@example.com".into());
        let list = TodoList::from_record(
            "l1".into(),
            record,
            vec![
                task("a", Priority::High),
                task("b", Priority::Low),
                task("c", Priority::High),
            ],
        );

        let high: Vec<_> = list
            .tasks_with_priority(Priority::High)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(high, vec!["a", "c"]);
        assert_eq!(list.tasks_with_priority(Priority::Medium).count(), 0);
    }

    #[test]
    fn test_remove_task() {
        let record = ListRecord::new("Home".into(), "ada@example.com".into());
        let mut list = TodoList::from_record("l1".into(), record, vec![task("a", Priority::Low)]);

        assert!(list.remove_task(&"missing".to_string()).is_none());
        let removed = list.remove_task(&"a".to_string()).unwrap();
        assert_eq!(removed.id, "a");
        assert!(list.tasks.is_empty());
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use todo_domain::{ListId, TaskId, TodoList};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskLocation {
    pub list_id: ListId,
    pub task_id: TaskId,
}

/// Copies of one task found in more than one list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateTask {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub locations: Vec<TaskLocation>,
}

type TaskKey<'a> = (&'a str, Option<&'a str>, Option<NaiveDate>, DateTime<Utc>);

/// Tasks that appear in several lists with identical content, the
/// signature a partially failed move leaves behind. Report only.
pub fn find_duplicate_tasks(lists: &[TodoList]) -> Vec<DuplicateTask> {
    let mut groups: HashMap<TaskKey<'_>, Vec<TaskLocation>> = HashMap::new();

    for list in lists {
        for task in &list.tasks {
            let key = (
                task.title.as_str(),
                task.description.as_deref(),
                task.due_date,
                task.created_at,
            );
            groups.entry(key).or_default().push(TaskLocation {
                list_id: list.id.clone(),
                task_id: task.id.clone(),
            });
        }
    }

    let mut duplicates: Vec<DuplicateTask> = groups
        .into_iter()
        .filter(|(_, locations)| {
            locations
                .iter()
                .map(|loc| loc.list_id.as_str())
                .collect::<BTreeSet<_>>()
                .len()
                > 1
        })
        .map(|((title, _, _, created_at), locations)| DuplicateTask {
            title: title.to_string(),
            created_at,
            locations,
        })
        .collect();

    duplicates.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.title.cmp(&b.title))
    });
    duplicates
}

use chrono::Utc;
use futures::future::try_join_all;
use std::sync::Arc;
use todo_core::{TodoError, TodoResult};
use todo_domain::{
    from_fields, to_fields, ListId, ListRecord, Priority, Task, TaskId, TaskInput, TaskRecord,
    TodoList, User,
};
use todo_persistence::{CollectionPath, Document, DocumentStore};

const USERS: &str = "users";
const TODO_LISTS: &str = "todoLists";
const TASKS: &str = "tasks";

/// Lists and tasks of one user, laid out in the store as
/// `users/{uid}/todoLists/{listId}/tasks/{taskId}`.
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn DocumentStore>,
}

impl TodoRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn lists_path(user: &User) -> CollectionPath {
        CollectionPath::root(USERS).nested(&user.id, TODO_LISTS)
    }

    pub fn tasks_path(user: &User, list_id: &str) -> CollectionPath {
        Self::lists_path(user).nested(list_id, TASKS)
    }

    /// Every list of `user` with its tasks. Task collections are fetched
    /// concurrently; any failed read fails the whole call. Documents that
    /// cannot be decoded are skipped with a warning.
    pub async fn list_all_todo_lists(&self, user: &User) -> TodoResult<Vec<TodoList>> {
        let list_docs = self.store.list_documents(&Self::lists_path(user)).await?;

        let fetches = list_docs
            .into_iter()
            .map(|doc| self.materialize_list(user, doc));
        let lists: Vec<TodoList> = try_join_all(fetches).await?.into_iter().flatten().collect();

        tracing::debug!("Fetched {} lists for user {}", lists.len(), user.id);
        Ok(lists)
    }

    async fn materialize_list(&self, user: &User, doc: Document) -> TodoResult<Option<TodoList>> {
        let record: ListRecord = match from_fields(doc.fields) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping unreadable list {} of user {}: {}", doc.id, user.id, e);
                return Ok(None);
            }
        };
        let task_docs = self
            .store
            .list_documents(&Self::tasks_path(user, &doc.id))
            .await?;
        let tasks = task_docs
            .into_iter()
            .filter_map(|task_doc| match from_fields::<TaskRecord>(task_doc.fields) {
                Ok(record) => Some(Task::from_record(task_doc.id, record)),
                Err(e) => {
                    tracing::warn!(
                        "Skipping unreadable task {} in list {}: {}",
                        task_doc.id,
                        doc.id,
                        e
                    );
                    None
                }
            })
            .collect();
        Ok(Some(TodoList::from_record(doc.id, record, tasks)))
    }

    /// Blank names are skipped without touching the store.
    pub async fn create_todo_list(&self, user: &User, name: &str) -> TodoResult<ListId> {
        if name.trim().is_empty() {
            return Err(TodoError::ValidationSkipped("list name is blank".to_string()));
        }

        let record = ListRecord::new(name.to_string(), user.email.clone());
        let id = self
            .store
            .insert_document(&Self::lists_path(user), to_fields(&record)?)
            .await?;
        tracing::info!("Created list '{}' ({})", name, id);
        Ok(id)
    }

    /// Blank titles are skipped without touching the store.
    pub async fn create_task(
        &self,
        user: &User,
        list_id: &str,
        input: &TaskInput,
    ) -> TodoResult<TaskId> {
        if input.is_blank() {
            return Err(TodoError::ValidationSkipped("task title is blank".to_string()));
        }

        let record = input.to_record(Utc::now());
        let id = self
            .store
            .insert_document(&Self::tasks_path(user, list_id), to_fields(&record)?)
            .await?;
        tracing::info!("Created task '{}' ({}) in list {}", input.title, id, list_id);
        Ok(id)
    }

    pub async fn set_task_priority(
        &self,
        user: &User,
        list_id: &str,
        task_id: &str,
        priority: Priority,
    ) -> TodoResult<()> {
        let mut fields = todo_domain::Fields::new();
        fields.insert("priority".to_string(), priority.as_str().into());
        self.store
            .update_fields(&Self::tasks_path(user, list_id), task_id, fields)
            .await?;
        tracing::info!("Task {} in list {} set to {} priority", task_id, list_id, priority);
        Ok(())
    }

    /// Copy `task` into `to` with `priority`, then delete it from `from`.
    ///
    /// Not atomic. A failed insert leaves the task untouched and the delete
    /// is never attempted. A failed delete after a successful insert leaves
    /// the task in both lists and is reported as `PartialRelocate`.
    /// Returns the id the store assigned to the copy.
    pub async fn relocate_task(
        &self,
        user: &User,
        from: &str,
        to: &str,
        task: &Task,
        priority: Priority,
    ) -> TodoResult<TaskId> {
        let mut record = task.to_record();
        record.priority = priority;

        let copy_id = self
            .store
            .insert_document(&Self::tasks_path(user, to), to_fields(&record)?)
            .await?;

        if let Err(e) = self
            .store
            .delete_document(&Self::tasks_path(user, from), &task.id)
            .await
        {
            tracing::warn!(
                "Task {} copied to list {} as {} but still present in list {}",
                task.id,
                to,
                copy_id,
                from
            );
            return Err(TodoError::PartialRelocate {
                task_id: task.id.clone(),
                copy_id,
                from: from.to_string(),
                to: to.to_string(),
                reason: e.to_string(),
            });
        }

        tracing::info!("Moved task {} from list {} to list {} as {}", task.id, from, to, copy_id);
        Ok(copy_id)
    }
}

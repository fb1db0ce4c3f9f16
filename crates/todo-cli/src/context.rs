use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use todo_app::{IdentityProvider, LocalIdentityProvider, TodoController};
use todo_core::AppConfig;
use todo_domain::{ListId, Priority, Task, TodoList, User};
use todo_persistence::JsonFileStore;

/// One list as the CLI prints it: the three priority columns side by side
#[derive(Debug, Serialize)]
pub struct ListView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub created_by: &'a str,
    pub low: Vec<&'a Task>,
    pub medium: Vec<&'a Task>,
    pub high: Vec<&'a Task>,
}

impl<'a> ListView<'a> {
    fn new(list: &'a TodoList) -> Self {
        let column =
            |priority: Priority| -> Vec<&'a Task> { list.tasks_with_priority(priority).collect() };
        Self {
            id: &list.id,
            name: &list.name,
            created_by: &list.created_by,
            low: column(Priority::Low),
            medium: column(Priority::Medium),
            high: column(Priority::High),
        }
    }
}

pub struct CliContext {
    pub controller: TodoController,
}

impl CliContext {
    /// Open the store and sign in, leaving the controller's mirror loaded.
    pub async fn load(
        config: &AppConfig,
        file: Option<PathBuf>,
        user_id: Option<String>,
        email: Option<String>,
    ) -> anyhow::Result<Self> {
        let path = file
            .or_else(|| config.store_file.clone())
            .context("--file is required (or set store_file in config.toml)")?;
        let user = resolve_user(config, user_id, email)?;

        let store = Arc::new(JsonFileStore::new(&path));
        let mut controller =
            TodoController::new(store).with_auto_scroll(config.drag.into());

        let identity = LocalIdentityProvider::new();
        identity.sign_in(user);
        controller
            .on_auth_state_changed(identity.current_user())
            .await
            .with_context(|| format!("could not read {}", path.display()))?;

        Ok(Self { controller })
    }

    pub fn list_views(&self) -> Vec<ListView<'_>> {
        self.controller.lists().iter().map(ListView::new).collect()
    }

    pub fn find_task(&self, list_id: &ListId, task_id: &str) -> anyhow::Result<Task> {
        self.controller
            .list(list_id)
            .with_context(|| format!("List not found: {}", list_id))?
            .task(task_id)
            .cloned()
            .with_context(|| format!("Task not found: {} in list {}", task_id, list_id))
    }
}

fn resolve_user(
    config: &AppConfig,
    user_id: Option<String>,
    email: Option<String>,
) -> anyhow::Result<User> {
    let configured = config.user.as_ref();
    let id = user_id
        .or_else(|| configured.map(|u| u.id.clone()))
        .context("--user-id is required (or set [user] in config.toml)")?;
    let email = email
        .or_else(|| configured.map(|u| u.email.clone()))
        .unwrap_or_default();
    Ok(User::new(id, email))
}

use std::collections::HashMap;
use std::sync::Arc;
use todo_core::{TodoError, TodoResult};
use todo_domain::{ListId, Priority, Task, TaskId, TaskInput, TodoList, User};
use todo_persistence::DocumentStore;
use tokio::sync::broadcast;

use crate::dnd::{resolve_drop, AutoScroll, DraggedTask, DropAction, DropTarget};
use crate::reconcile::{find_duplicate_tasks, DuplicateTask};
use crate::repository::TodoRepository;
use crate::session::{IdentityProvider, Session};

/// In-memory mirror of the signed-in user's lists plus the pending form
/// inputs and drag state a view renders from.
///
/// # Refresh policy
///
/// Creating a list, creating a task and changing a priority each refetch
/// the whole mirror after the write. Moving a task to another list does
/// not: the mirror is patched in place so a drag completes without a
/// round-trip, and it keeps the task's old id until the next refetch.
///
/// # Errors
///
/// Failed store calls are logged and leave the mirror unchanged; the error
/// is returned so the caller decides whether to surface it. Nothing is
/// retried. Blank names and titles come back as `ValidationSkipped`.
pub struct TodoController {
    repository: TodoRepository,
    session: Session,
    lists: Vec<TodoList>,
    new_list_name: String,
    task_inputs: HashMap<ListId, TaskInput>,
    dragged: Option<DraggedTask>,
    auto_scroll: AutoScroll,
}

impl TodoController {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_repository(TodoRepository::new(store))
    }

    pub fn with_repository(repository: TodoRepository) -> Self {
        Self {
            repository,
            session: Session::default(),
            lists: Vec::new(),
            new_list_name: String::new(),
            task_inputs: HashMap::new(),
            dragged: None,
            auto_scroll: AutoScroll::default(),
        }
    }

    pub fn with_auto_scroll(mut self, auto_scroll: AutoScroll) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    // Identity

    /// Apply a sign-in (`Some`) or sign-out (`None`) transition.
    ///
    /// Sign-in replaces the mirror with a fresh fetch for that user.
    /// Sign-out, or a sign-in as someone else, drops everything held for
    /// the previous user first.
    pub async fn on_auth_state_changed(&mut self, user: Option<User>) -> TodoResult<()> {
        match user {
            Some(user) => {
                if self.session.user() != Some(&user) {
                    self.clear();
                }
                tracing::debug!("Session started for {}", user.id);
                self.session = Session::signed_in(user);
                self.refresh().await
            }
            None => {
                tracing::debug!("Session ended");
                self.clear();
                Ok(())
            }
        }
    }

    /// Wait for the next identity event and apply it. Returns `false` once
    /// the provider has gone away.
    pub async fn follow_auth(&mut self, events: &mut broadcast::Receiver<Option<User>>) -> bool {
        loop {
            match events.recv().await {
                Ok(user) => {
                    // Failures are already logged by the refresh.
                    let _ = self.on_auth_state_changed(user).await;
                    return true;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} stale identity events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }

    /// Sign out through the provider and clear the mirror. Showing the
    /// login screen is left to the caller.
    pub async fn logout(&mut self, provider: &dyn IdentityProvider) -> TodoResult<()> {
        provider
            .sign_out()
            .await
            .inspect_err(|e| tracing::error!("Error signing out: {}", e))?;
        self.on_auth_state_changed(None).await
    }

    fn clear(&mut self) {
        self.session = Session::default();
        self.lists.clear();
        self.new_list_name.clear();
        self.task_inputs.clear();
        self.dragged = None;
    }

    // Reads

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn list(&self, list_id: &str) -> Option<&TodoList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    /// One priority column of a list
    pub fn tasks_by_priority(&self, list_id: &str, priority: Priority) -> Vec<&Task> {
        self.list(list_id)
            .map(|list| list.tasks_with_priority(priority).collect())
            .unwrap_or_default()
    }

    pub fn duplicates(&self) -> Vec<DuplicateTask> {
        find_duplicate_tasks(&self.lists)
    }

    // Form inputs

    pub fn new_list_name(&self) -> &str {
        &self.new_list_name
    }

    pub fn new_list_name_mut(&mut self) -> &mut String {
        &mut self.new_list_name
    }

    pub fn task_input(&self, list_id: &str) -> Option<&TaskInput> {
        self.task_inputs.get(list_id)
    }

    pub fn task_input_mut(&mut self, list_id: &str) -> &mut TaskInput {
        self.task_inputs.entry(list_id.to_string()).or_default()
    }

    // Writes

    /// Refetch every list of the signed-in user, replacing the mirror.
    pub async fn refresh(&mut self) -> TodoResult<()> {
        let user = self.session.require_user()?;
        let lists = self
            .repository
            .list_all_todo_lists(user)
            .await
            .inspect_err(|e| tracing::error!("Error fetching lists: {}", e))?;
        self.lists = lists;
        Ok(())
    }

    /// Refresh after a successful write. A failed refetch is logged and
    /// does not undo the write.
    async fn reload(&mut self) {
        let _ = self.refresh().await;
    }

    pub async fn submit_new_list(&mut self) -> TodoResult<ListId> {
        let user = self.session.require_user()?;
        let id = self
            .repository
            .create_todo_list(user, &self.new_list_name)
            .await
            .inspect_err(|e| log_write_error("adding list", e))?;
        self.reload().await;
        self.new_list_name.clear();
        Ok(id)
    }

    pub async fn submit_new_task(&mut self, list_id: &str) -> TodoResult<TaskId> {
        let user = self.session.require_user()?;
        let input = self.task_inputs.get(list_id).cloned().unwrap_or_default();
        let id = self
            .repository
            .create_task(user, list_id, &input)
            .await
            .inspect_err(|e| log_write_error("adding task", e))?;
        self.reload().await;
        self.task_inputs
            .insert(list_id.to_string(), TaskInput::default());
        Ok(id)
    }

    pub async fn change_priority(
        &mut self,
        list_id: &str,
        task_id: &str,
        priority: Priority,
    ) -> TodoResult<()> {
        let user = self.session.require_user()?;
        self.repository
            .set_task_priority(user, list_id, task_id, priority)
            .await
            .inspect_err(|e| log_write_error("updating task priority", e))?;
        self.reload().await;
        Ok(())
    }

    /// Move `task` from list `from` to list `to` with `priority`, patching
    /// the mirror locally instead of refetching. Returns the store id of
    /// the moved copy.
    ///
    /// When the copy lands but the original cannot be deleted the mirror
    /// is refetched so the duplicate shows in both lists, and
    /// `PartialRelocate` is returned.
    pub async fn move_task(
        &mut self,
        from: &str,
        to: &str,
        task: Task,
        priority: Priority,
    ) -> TodoResult<TaskId> {
        if from == to {
            self.change_priority(from, &task.id, priority).await?;
            return Ok(task.id);
        }

        let user = self.session.require_user()?;
        let relocated = self
            .repository
            .relocate_task(user, from, to, &task, priority)
            .await;
        let copy_id = match relocated {
            Ok(copy_id) => copy_id,
            Err(e @ TodoError::PartialRelocate { .. }) => {
                log_write_error("moving task to another list", &e);
                self.reload().await;
                return Err(e);
            }
            Err(e) => {
                log_write_error("moving task to another list", &e);
                return Err(e);
            }
        };

        let moved = task.with_priority(priority);
        for list in &mut self.lists {
            if list.id == from {
                list.remove_task(&moved.id);
            } else if list.id == to {
                list.tasks.push(moved.clone());
            }
        }
        Ok(copy_id)
    }

    // Drag and drop

    /// Begin dragging a task shown in the mirror. Unknown ids leave the
    /// controller idle.
    pub fn drag_start(&mut self, list_id: &str, task_id: &str) -> bool {
        let Some(task) = self.list(list_id).and_then(|l| l.task(task_id)).cloned() else {
            tracing::debug!("Drag start on unknown task {} in list {}", task_id, list_id);
            return false;
        };
        self.dragged = Some(DraggedTask {
            task,
            from_list_id: list_id.to_string(),
        });
        true
    }

    pub fn dragged(&self) -> Option<&DraggedTask> {
        self.dragged.as_ref()
    }

    /// Scroll delta for a drag-over event; `None` when idle or away from
    /// the viewport edges.
    pub fn drag_over(&self, pointer_y: i32, viewport_height: i32) -> Option<i32> {
        self.dragged.as_ref()?;
        self.auto_scroll.scroll_delta(pointer_y, viewport_height)
    }

    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// Finish the gesture on `target`. The dragged slot is cleared whatever
    /// the outcome; a drop with nothing dragged does nothing.
    pub async fn drop_on(&mut self, target: DropTarget) -> TodoResult<DropAction> {
        let Some(dragged) = self.dragged.take() else {
            return Ok(DropAction::None);
        };

        let action = resolve_drop(&dragged, &target);
        match &action {
            DropAction::None => {
                tracing::debug!(
                    "Task {} dropped on list {} outside a priority zone, ignored",
                    dragged.task.id,
                    target.list_id()
                );
            }
            DropAction::ChangePriority {
                list_id,
                task_id,
                priority,
            } => {
                self.change_priority(list_id, task_id, *priority).await?;
            }
            DropAction::Move {
                from,
                to,
                task,
                priority,
            } => {
                self.move_task(from, to, task.clone(), *priority).await?;
            }
        }
        Ok(action)
    }
}

fn log_write_error(action: &str, err: &TodoError) {
    if err.is_validation_skip() {
        tracing::debug!("Not {}: {}", action, err);
    } else {
        tracing::error!("Error {}: {}", action, err);
    }
}

//! Drag-and-drop of tasks between lists and priority zones.
//!
//! A gesture is `drag_start` on a task card, any number of drag-over
//! events, then a drop on a list container or one of its priority zones.
//! The resolution here is pure; the controller owns the dragged-task slot
//! and performs the resulting store calls.

use serde::{Deserialize, Serialize};
use todo_core::DragConfig;
use todo_domain::{ListId, Priority, Task};

/// Snapshot taken at drag start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggedTask {
    pub task: Task,
    pub from_list_id: ListId,
}

/// Where a task was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    /// The list container, outside any priority zone
    List(ListId),
    /// One priority column of a list
    Zone { list_id: ListId, priority: Priority },
}

impl DropTarget {
    pub fn list_id(&self) -> &ListId {
        match self {
            DropTarget::List(list_id) | DropTarget::Zone { list_id, .. } => list_id,
        }
    }
}

/// Store change a drop resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropAction {
    None,
    ChangePriority {
        list_id: ListId,
        task_id: String,
        priority: Priority,
    },
    Move {
        from: ListId,
        to: ListId,
        task: Task,
        priority: Priority,
    },
}

/// Dropping on a list container without a zone does nothing.
pub fn resolve_drop(dragged: &DraggedTask, target: &DropTarget) -> DropAction {
    let DropTarget::Zone { list_id, priority } = target else {
        return DropAction::None;
    };

    if *list_id == dragged.from_list_id {
        DropAction::ChangePriority {
            list_id: list_id.clone(),
            task_id: dragged.task.id.clone(),
            priority: *priority,
        }
    } else {
        DropAction::Move {
            from: dragged.from_list_id.clone(),
            to: list_id.clone(),
            task: dragged.task.clone(),
            priority: *priority,
        }
    }
}

/// Viewport scrolling near the top and bottom edges while dragging.
/// Applied on every drag-over event, so scrolling is continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoScroll {
    pub threshold: i32,
    pub step: i32,
}

impl AutoScroll {
    pub fn new(threshold: i32, step: i32) -> Self {
        Self { threshold, step }
    }

    /// Vertical scroll to apply for a pointer at `pointer_y` in a viewport
    /// `viewport_height` pixels tall. Negative scrolls up.
    pub fn scroll_delta(&self, pointer_y: i32, viewport_height: i32) -> Option<i32> {
        if pointer_y < self.threshold {
            Some(-self.step)
        } else if viewport_height - pointer_y < self.threshold {
            Some(self.step)
        } else {
            None
        }
    }
}

impl Default for AutoScroll {
    fn default() -> Self {
        DragConfig::default().into()
    }
}

impl From<DragConfig> for AutoScroll {
    fn from(config: DragConfig) -> Self {
        Self::new(config.scroll_threshold, config.scroll_step)
    }
}

pub mod list;
pub mod priority;
pub mod record;
pub mod task;
pub mod task_input;
pub mod user;

pub use list::{ListId, ListRecord, TodoList};
pub use priority::Priority;
pub use record::{from_fields, to_fields, Fields};
pub use task::{Task, TaskId, TaskRecord};
pub use task_input::TaskInput;
pub use user::{User, UserId};

pub mod controller;
pub mod dnd;
pub mod reconcile;
pub mod repository;
pub mod session;

pub use controller::TodoController;
pub use dnd::{AutoScroll, DraggedTask, DropAction, DropTarget};
pub use reconcile::{find_duplicate_tasks, DuplicateTask, TaskLocation};
pub use repository::TodoRepository;
pub use session::{IdentityProvider, LocalIdentityProvider, Session};

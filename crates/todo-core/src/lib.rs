pub mod config;
pub mod error;
pub mod result;

pub use config::{AppConfig, DragConfig, UserConfig};
pub use error::TodoError;
pub use result::TodoResult;

pub mod store;
pub mod traits;
pub mod tree;

pub use store::*;
pub use traits::*;
pub use tree::DocumentTree;

pub mod error;
pub mod graph;
pub mod types;

pub use error::*;
pub use graph::{LinkedGroup, WorkspaceGraph};
pub use types::*;

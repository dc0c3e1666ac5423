//! Project storage
//!
//! - [`store`]: copy-on-write in-memory project store
//! - [`tree_source`]: where imported repositories get their file trees

pub mod store;
pub mod tree_source;

pub use store::{ProjectStore, SharedStore};
pub use tree_source::{LocalDirTreeSource, MockTreeSource, TreeSource};

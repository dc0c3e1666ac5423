//! UI-session state
//!
//! Ephemeral state owned by one interactive session. Nothing here is shared
//! or persisted.

pub mod selection;

pub use selection::{ActiveSelection, SelectionStage, SelectionState};

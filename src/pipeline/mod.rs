//! Documentation Pipeline Simulator
//!
//! Models a multi-stage analysis over a repository's flattened file list
//! without performing any analysis.
//!
//! ```text
//! flatten(tree) → Schedule::plan(files, seed) → PipelineSimulator::start
//!                                                  ↓
//!                                   SimulationHandle (events, cancel)
//! ```

pub mod event;
pub mod phase;
pub mod schedule;
pub mod simulator;

pub use event::PipelineEvent;
pub use phase::{COMPLETE, INITIALIZING, PHASE_MESSAGES};
pub use schedule::{Schedule, Step};
pub use simulator::{PipelineSimulator, SimulationHandle, SimulationReport};

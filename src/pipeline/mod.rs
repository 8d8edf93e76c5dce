//! MEM Pipeline
//!
//! Sequences the physics stages for one well (or a batch of wells), reports
//! progress at fixed milestones and folds every failure into a `RunResult`.

mod error;
mod orchestrator;
mod progress;

pub use error::PipelineError;
pub use orchestrator::{MemPipeline, RunResult};
pub use progress::{silent, Milestone, ProgressReporter};

//! Shared data structures for the Mechanical Earth Model pipeline
//!
//! This module defines the core types flowing through the MEM stages:
//! - Inputs: depth index, well-log curves, mechanical properties, method selection
//! - Stage outputs: the five stress/pressure profiles plus per-sample diagnostics
//! - Quality: the assessor's score, warnings and summary counts

mod inputs;
mod logs;
mod mechanics;
mod profile;
mod quality;
pub mod serde_nan;

pub use inputs::*;
pub use logs::*;
pub use mechanics::*;
pub use profile::*;
pub use quality::*;

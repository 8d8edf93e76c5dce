//! Structural pipeline failures.
//!
//! Only conditions that make the whole run meaningless are errors here.
//! Method substitutions and per-sample recoveries are recorded in
//! `Diagnostics` instead and never abort a run.

use thiserror::Error;

use crate::types::Stage;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Log data or mechanical properties are missing.")]
    MissingInputs,

    #[error("Density curve not found (expected one of: RHOB, DEN)")]
    DensityCurveNotFound,

    #[error("Depth value at index {index} is not finite")]
    NonFiniteDepth { index: usize },

    #[error("Length mismatch: {what} has {actual} samples, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid mechanical properties: {0}")]
    InvalidMechanicalProperty(String),

    #[error("Invalid pressure parameter: {0}")]
    InvalidPressureParameter(String),

    #[error("Cancelled")]
    Cancelled,

    #[error("Unexpected failure during {stage} stage: {message}")]
    StageFailed { stage: Stage, message: String },
}

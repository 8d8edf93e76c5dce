//! MEM Pipeline: 1D Mechanical Earth Model
//!
//! Turns depth-indexed well logs and rock properties into five stress
//! profiles (Sv, Pp, Shmin, SHmax, Fg) with a quality report.
//!
//! ## Architecture
//!
//! - **Config**: physical constants and method defaults from TOML
//! - **Physics Engine**: one pure function per stage
//! - **Quality**: rule-based scoring of the assembled profile
//! - **Pipeline**: validation, stage ordering, progress, cancellation

pub mod config;
pub mod physics_engine;
pub mod pipeline;
pub mod quality;
pub mod types;

pub use config::{ConfigError, MemConfig};
pub use pipeline::{silent, MemPipeline, Milestone, PipelineError, ProgressReporter, RunResult};
pub use quality::QualityAssessor;
pub use types::{
    CurveKind, Diagnostics, FallbackReason, FractureGradientMethodName, MechanicalProperties,
    MemInputs, MethodFallback, PorePressureMethodName, PressureData, QualityReport,
    QualitySummary, RegimeLabel, Stage, StressProfile, StressRatios, StressRegime,
    WellLogCurve,
};

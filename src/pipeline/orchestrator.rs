//! MEM Pipeline Orchestrator
//!
//! Validates inputs and runs the stages in strict dependency order:
//!
//! ```text
//! depth + density ──▶ Sv ──▶ Pp ──▶ Shmin / SHmax ──▶ Fg ──▶ Quality
//!                            ▲
//!                 sonic (opt)┘
//! ```
//!
//! A run never returns an error or panics to its caller: every failure is
//! folded into a `RunResult` with `success == false`.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::progress::{silent, Milestone, ProgressReporter};
use super::PipelineError;
use crate::config::MemConfig;
use crate::physics_engine::{
    compute_fracture_gradient, compute_horizontal_stress, compute_pore_pressure,
    compute_vertical_stress, FractureGradientMethod, PorePressureMethod,
};
use crate::quality::QualityAssessor;
use crate::types::{
    CurveKind, Diagnostics, MechanicalProperties, MemInputs, PorePressureMethodName,
    PressureData, QualityReport, QualitySummary, Stage, StressProfile,
};

// ============================================================================
// Run Result
// ============================================================================

/// Outcome of one pipeline run.
///
/// Serializes to `{ success, results, qualityReport, summary, timestamp }`
/// on success and `{ success: false, error, results: null, ... }` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the run stopped at a cancellation checkpoint
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
    pub results: Option<StressProfile>,
    pub quality_report: Option<QualityReport>,
    pub summary: Option<QualitySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RunResult {
    fn completed(profile: StressProfile, report: QualityReport) -> Self {
        Self {
            success: true,
            error: None,
            cancelled: false,
            summary: Some(report.summary.clone()),
            results: Some(profile),
            quality_report: Some(report),
            timestamp: Some(Utc::now()),
        }
    }

    fn failed(error: &PipelineError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            cancelled: matches!(error, PipelineError::Cancelled),
            results: None,
            quality_report: None,
            summary: None,
            timestamp: None,
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Runs the MEM stages with a fixed configuration.
///
/// Holds no per-run state, so one instance can serve many wells, including
/// from multiple threads at once.
#[derive(Debug, Clone, Default)]
pub struct MemPipeline {
    config: MemConfig,
    assessor: QualityAssessor,
}

/// Inputs that passed structural validation, with method parameters resolved.
struct ValidatedRun<'a> {
    depth: &'a [f64],
    density: &'a [f64],
    mechanics: MechanicalProperties,
    pore_pressure: PorePressureMethod<'a>,
    fracture_gradient: FractureGradientMethod,
}

impl MemPipeline {
    pub fn new(config: MemConfig) -> Self {
        let assessor = QualityAssessor::new(config.quality.clone());
        Self { config, assessor }
    }

    pub fn config(&self) -> &MemConfig {
        &self.config
    }

    /// Run the full pipeline, reporting progress at each stage boundary.
    pub fn run(&self, inputs: &MemInputs, progress: &mut dyn ProgressReporter) -> RunResult {
        self.run_inner(inputs, progress, None)
    }

    /// Like `run`, but checks `cancel` once at every stage boundary.
    ///
    /// A stage that has started always finishes; the run then stops at the
    /// next boundary with `cancelled == true`.
    pub fn run_cancellable(
        &self,
        inputs: &MemInputs,
        progress: &mut dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> RunResult {
        self.run_inner(inputs, progress, Some(cancel))
    }

    /// Run independent wells in parallel. Results keep the input order.
    pub fn run_batch(&self, wells: &[MemInputs]) -> Vec<RunResult> {
        info!(wells = wells.len(), "Starting batch MEM run");
        wells
            .par_iter()
            .map(|inputs| self.run(inputs, &mut silent()))
            .collect()
    }

    fn run_inner(
        &self,
        inputs: &MemInputs,
        progress: &mut dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
    ) -> RunResult {
        let started = Instant::now();
        match self.execute(inputs, progress, cancel) {
            Ok((profile, report)) => {
                info!(
                    samples = profile.len(),
                    score = report.score,
                    issues = report.summary.issues,
                    fallbacks = profile.diagnostics.fallbacks.len(),
                    elapsed_ms = started.elapsed().as_millis(),
                    "MEM run complete"
                );
                RunResult::completed(profile, report)
            }
            Err(PipelineError::Cancelled) => {
                info!(elapsed_ms = started.elapsed().as_millis(), "MEM run cancelled");
                RunResult::failed(&PipelineError::Cancelled)
            }
            Err(e) => {
                warn!(error = %e, "MEM run failed");
                RunResult::failed(&e)
            }
        }
    }

    fn execute(
        &self,
        inputs: &MemInputs,
        progress: &mut dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
    ) -> Result<(StressProfile, QualityReport), PipelineError> {
        checkpoint(Milestone::Validating, progress, cancel)?;
        let run = self.validate(inputs)?;

        info!(
            samples = run.depth.len(),
            regime = %run.mechanics.stress_regime,
            pore_pressure = %run.pore_pressure.name(),
            fracture_gradient = ?run.fracture_gradient,
            "Starting MEM run"
        );

        let mut diagnostics = Diagnostics::default();

        checkpoint(Milestone::VerticalStress, progress, cancel)?;
        let vertical = guarded(Stage::VerticalStress, || {
            compute_vertical_stress(run.depth, run.density, &self.config.constants)
        })?;
        if !vertical.held_over_samples.is_empty() {
            warn!(
                samples = vertical.held_over_samples.len(),
                "Sv held over at samples with invalid density or depth step"
            );
        }
        diagnostics.held_over_samples = vertical.held_over_samples;

        checkpoint(Milestone::PorePressure, progress, cancel)?;
        let pore = guarded(Stage::PorePressure, || {
            compute_pore_pressure(
                run.pore_pressure,
                run.depth,
                &vertical.sv,
                self.config.constants.hydrostatic_gradient_psi_ft,
                &self.config.pore_pressure,
            )
        })?;
        diagnostics.fallbacks.extend(pore.fallback);
        diagnostics.clamped_pore_pressure_samples = pore.clamped_samples;

        checkpoint(Milestone::HorizontalStress, progress, cancel)?;
        let horizontal = guarded(Stage::HorizontalStress, || {
            compute_horizontal_stress(
                &vertical.sv,
                &pore.pp,
                &run.mechanics,
                &self.config.horizontal_stress,
            )
        })?;
        diagnostics.unknown_regime_samples = horizontal.unknown_samples;

        checkpoint(Milestone::FractureGradient, progress, cancel)?;
        let fracture = guarded(Stage::FractureGradient, || {
            compute_fracture_gradient(
                run.fracture_gradient,
                run.depth,
                &vertical.sv,
                &pore.pp,
                self.config.fracture_gradient.gradient_fallback_psi_ft,
            )
        })?;
        diagnostics.fallbacks.extend(fracture.alias);

        let profile = StressProfile {
            depth: run.depth.to_vec(),
            sv: vertical.sv,
            sv_gradient: vertical.gradient,
            pp: pore.pp,
            pp_gradient: pore.gradient,
            shmin: horizontal.shmin,
            shmax: horizontal.shmax,
            fg: fracture.fg,
            fg_gradient: fracture.gradient,
            ratios: horizontal.ratios,
            stress_regime_profile: horizontal.stress_regime_profile,
            diagnostics,
        };

        checkpoint(Milestone::Quality, progress, cancel)?;
        let report = guarded(Stage::Quality, || Ok(self.assessor.assess(&profile)))?;

        progress.report(Milestone::Complete.percent(), Milestone::Complete.message());
        Ok((profile, report))
    }

    /// Structural checks. Any failure here aborts the run before a stage runs.
    fn validate<'a>(&self, inputs: &'a MemInputs) -> Result<ValidatedRun<'a>, PipelineError> {
        let mechanics = match inputs.mechanical_properties {
            Some(m) if !inputs.depth.is_empty() => m,
            _ => return Err(PipelineError::MissingInputs),
        };

        let depth = inputs.depth.as_slice();
        if let Some(index) = depth.iter().position(|z| !z.is_finite()) {
            return Err(PipelineError::NonFiniteDepth { index });
        }
        let non_increasing = depth.windows(2).filter(|w| w[1] <= w[0]).count();
        if non_increasing > 0 {
            warn!(steps = non_increasing, "Depth index is not strictly increasing");
        }

        mechanics
            .check_bounds()
            .map_err(PipelineError::InvalidMechanicalProperty)?;

        let density = inputs
            .curve(CurveKind::Density)
            .ok_or(PipelineError::DensityCurveNotFound)?;
        if density.values.len() != depth.len() {
            return Err(PipelineError::LengthMismatch {
                what: "density",
                expected: depth.len(),
                actual: density.values.len(),
            });
        }

        let sonic = inputs.curve(CurveKind::Sonic).map(|c| c.values.as_slice());
        let pore_pressure =
            self.resolve_pore_pressure(&inputs.pressure_data, sonic, depth.len())?;
        let fracture_gradient = self.resolve_fracture_gradient(&inputs.pressure_data, &mechanics)?;

        debug!(
            density = %density.name,
            sonic = sonic.is_some(),
            density_gaps = density.gap_count(),
            "Inputs validated"
        );

        Ok(ValidatedRun {
            depth,
            density: &density.values,
            mechanics,
            pore_pressure,
            fracture_gradient,
        })
    }

    /// Only parameters the selected method will evaluate are checked. Eaton
    /// without a usable sonic curve falls back, so its exponent is ignored.
    fn resolve_pore_pressure<'a>(
        &self,
        data: &PressureData,
        sonic: Option<&'a [f64]>,
        samples: usize,
    ) -> Result<PorePressureMethod<'a>, PipelineError> {
        let defaults = &self.config.pore_pressure;
        Ok(match data.pore_pressure_method {
            PorePressureMethodName::Eaton => {
                let exponent = data.eaton_exponent.unwrap_or(defaults.default_eaton_exponent);
                if sonic.is_some_and(|s| s.len() == samples) {
                    positive("eatonExponent", exponent)?;
                }
                PorePressureMethod::Eaton { sonic, exponent }
            }
            PorePressureMethodName::HottmanJohnson => PorePressureMethod::HottmanJohnson,
            PorePressureMethodName::ConstantGradient => {
                let gradient = data
                    .constant_gradient
                    .unwrap_or(defaults.default_constant_gradient_psi_ft);
                positive("constantGradient", gradient)?;
                PorePressureMethod::ConstantGradient { gradient }
            }
        })
    }

    fn resolve_fracture_gradient(
        &self,
        data: &PressureData,
        mechanics: &MechanicalProperties,
    ) -> Result<FractureGradientMethod, PipelineError> {
        let ki = data
            .matthews_kelly_coeff
            .unwrap_or(self.config.fracture_gradient.default_matthews_kelly_coeff);
        let method = FractureGradientMethod::resolve(
            data.fracture_gradient_method,
            mechanics.poisson_ratio,
            ki,
        );
        if let FractureGradientMethod::MatthewsKelly { ki } = method {
            positive("matthewsKellyCoeff", ki)?;
        }
        Ok(method)
    }
}

fn positive(name: &str, value: f64) -> Result<(), PipelineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidPressureParameter(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

/// Stop at a cancelled token, otherwise report the milestone.
fn checkpoint(
    milestone: Milestone,
    progress: &mut dyn ProgressReporter,
    cancel: Option<&CancellationToken>,
) -> Result<(), PipelineError> {
    if cancel.is_some_and(CancellationToken::is_cancelled) {
        return Err(PipelineError::Cancelled);
    }
    progress.report(milestone.percent(), milestone.message());
    Ok(())
}

/// Run a stage, turning a panic into `PipelineError::StageFailed`.
fn guarded<T>(
    stage: Stage,
    f: impl FnOnce() -> Result<T, PipelineError>,
) -> Result<T, PipelineError> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(PipelineError::StageFailed { stage, message })
    })
}

// ============================================================================
// Tests
// ============================================================================

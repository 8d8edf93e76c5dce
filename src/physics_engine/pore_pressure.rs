//! Pore pressure from overburden and (optionally) sonic slowness
//!
//! Eaton (sonic):
//!
//! Pp = Sv - (Sv - Pn) × (Δt_normal / Δt)^n,   Pn = 0.433 × z
//!
//! Hottman-Johnson has no formula of its own yet and is evaluated as a
//! constant gradient. Eaton without a usable sonic curve does the same.

use tracing::{debug, warn};

use super::average_gradient;
use crate::config::PorePressureConfig;
use crate::pipeline::PipelineError;
use crate::types::{FallbackReason, MethodFallback, PorePressureMethodName, Stage};

/// Resolved pore-pressure method, carrying only the inputs it consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PorePressureMethod<'a> {
    Eaton {
        /// Sonic slowness (µs/ft); `None` when no sonic curve was supplied
        sonic: Option<&'a [f64]>,
        exponent: f64,
    },
    /// Unimplemented; always evaluated as `ConstantGradient` at the
    /// configured fallback gradient
    HottmanJohnson,
    ConstantGradient {
        /// psi/ft
        gradient: f64,
    },
}

impl PorePressureMethod<'_> {
    pub fn name(&self) -> PorePressureMethodName {
        match self {
            PorePressureMethod::Eaton { .. } => PorePressureMethodName::Eaton,
            PorePressureMethod::HottmanJohnson => PorePressureMethodName::HottmanJohnson,
            PorePressureMethod::ConstantGradient { .. } => PorePressureMethodName::ConstantGradient,
        }
    }
}

/// Output of the pore-pressure stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PorePressureResult {
    /// Pp (psi), same length as depth
    pub pp: Vec<f64>,
    /// Pp at the deepest sample over its depth (psi/ft)
    pub gradient: f64,
    /// Set when the requested method was substituted
    pub fallback: Option<MethodFallback>,
    /// Eaton samples clamped to hydrostatic
    pub clamped_samples: Vec<usize>,
}

/// Compute pore pressure along the depth index.
///
/// `hydrostatic_gradient` is the normal-pressure gradient (psi/ft) used as
/// the Eaton baseline.
pub fn compute_pore_pressure(
    method: PorePressureMethod<'_>,
    depth: &[f64],
    sv: &[f64],
    hydrostatic_gradient: f64,
    config: &PorePressureConfig,
) -> Result<PorePressureResult, PipelineError> {
    if sv.len() != depth.len() {
        return Err(PipelineError::LengthMismatch {
            what: "Sv",
            expected: depth.len(),
            actual: sv.len(),
        });
    }

    let requested = method.name();

    let result = match method {
        PorePressureMethod::ConstantGradient { gradient } => PorePressureResult {
            pp: constant_gradient(depth, gradient),
            gradient,
            fallback: None,
            clamped_samples: Vec::new(),
        },
        PorePressureMethod::HottmanJohnson => {
            fallback_to_constant(depth, requested, FallbackReason::NotImplemented, config)
        }
        PorePressureMethod::Eaton { sonic: None, .. } => {
            fallback_to_constant(depth, requested, FallbackReason::MissingSonicCurve, config)
        }
        PorePressureMethod::Eaton { sonic: Some(sonic), .. } if sonic.len() != depth.len() => {
            fallback_to_constant(depth, requested, FallbackReason::SonicLengthMismatch, config)
        }
        PorePressureMethod::Eaton { sonic: Some(sonic), exponent } => {
            let (pp, clamped_samples) = eaton(
                depth,
                sv,
                sonic,
                exponent,
                hydrostatic_gradient,
                config.normal_compaction_dt_us_ft,
            );
            PorePressureResult {
                pp,
                gradient: config.default_constant_gradient_psi_ft,
                fallback: None,
                clamped_samples,
            }
        }
    };

    // Gradient falls back to the gradient the applied method used
    let fallback_gradient = result.gradient;
    let gradient = average_gradient(&result.pp, depth, fallback_gradient);

    debug!(
        method = %requested,
        samples = result.pp.len(),
        clamped = result.clamped_samples.len(),
        gradient,
        "Pore pressure computed"
    );

    Ok(PorePressureResult { gradient, ..result })
}

/// Pp = z × gradient
fn constant_gradient(depth: &[f64], gradient: f64) -> Vec<f64> {
    depth.iter().map(|z| z * gradient).collect()
}

fn fallback_to_constant(
    depth: &[f64],
    requested: PorePressureMethodName,
    reason: FallbackReason,
    config: &PorePressureConfig,
) -> PorePressureResult {
    let gradient = config.fallback_gradient_psi_ft;
    warn!(
        requested = %requested,
        ?reason,
        gradient,
        "Pore pressure method substituted with constant gradient"
    );
    PorePressureResult {
        pp: constant_gradient(depth, gradient),
        gradient,
        fallback: Some(MethodFallback {
            stage: Stage::PorePressure,
            requested: requested.to_string(),
            applied: format!("ConstantGradient({gradient})"),
            reason,
        }),
        clamped_samples: Vec::new(),
    }
}

/// Eaton sonic method. Samples with NaN Sv, unusable sonic, or Sv below
/// hydrostatic are clamped to hydrostatic, as are results below it.
fn eaton(
    depth: &[f64],
    sv: &[f64],
    sonic: &[f64],
    exponent: f64,
    hydrostatic_gradient: f64,
    dt_normal: f64,
) -> (Vec<f64>, Vec<usize>) {
    let mut clamped = Vec::new();
    let pp = depth
        .iter()
        .zip(sv)
        .zip(sonic)
        .enumerate()
        .map(|(i, ((&z, &sv_i), &dt))| {
            // Two clamp triggers: invalid inputs (NaN Sv, bad sonic, Sv < Pn),
            // and a valid Eaton result that lands below Pn (sonic faster than
            // the normal trend). Both yield Pn and are recorded.
            let pn = hydrostatic_gradient * z;
            let usable = sv_i.is_finite() && dt.is_finite() && dt > 0.0 && sv_i >= pn;
            if !usable {
                clamped.push(i);
                return pn;
            }
            let pp = sv_i - (sv_i - pn) * (dt_normal / dt).powf(exponent);
            if pp < pn {
                clamped.push(i);
                pn
            } else {
                pp
            }
        })
        .collect();
    (pp, clamped)
}

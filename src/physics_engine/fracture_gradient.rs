//! Fracture pressure from overburden and pore pressure
//!
//! Both supported formulas take the form Fg = K × (Sv - Pp) + Pp:
//! - Hubbert-Willis: K = ν / (1 - ν)
//! - Matthews-Kelly: K = Ki (matrix stress coefficient)
//!
//! "Eaton" for fracture gradient is a name only; it evaluates Hubbert-Willis.

use tracing::debug;

use super::average_gradient;
use crate::pipeline::PipelineError;
use crate::types::{FallbackReason, FractureGradientMethodName, MethodFallback, Stage};

/// Resolved fracture-gradient method, carrying only the inputs it consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractureGradientMethod {
    HubbertWillis { poisson_ratio: f64 },
    MatthewsKelly { ki: f64 },
    /// Requested as "Eaton"; evaluated with the Hubbert-Willis formula
    EatonAlias { poisson_ratio: f64 },
}

impl FractureGradientMethod {
    pub fn resolve(name: FractureGradientMethodName, poisson_ratio: f64, ki: f64) -> Self {
        match name {
            FractureGradientMethodName::HubbertWillis => Self::HubbertWillis { poisson_ratio },
            FractureGradientMethodName::MatthewsKelly => Self::MatthewsKelly { ki },
            FractureGradientMethodName::Eaton => Self::EatonAlias { poisson_ratio },
        }
    }

    /// Effective stress coefficient K in Fg = K × (Sv - Pp) + Pp.
    pub fn coefficient(&self) -> f64 {
        match *self {
            Self::HubbertWillis { poisson_ratio } | Self::EatonAlias { poisson_ratio } => {
                poisson_ratio / (1.0 - poisson_ratio)
            }
            Self::MatthewsKelly { ki } => ki,
        }
    }

    /// Audit record when the method name does not match the formula applied.
    pub fn alias_record(&self) -> Option<MethodFallback> {
        match self {
            Self::EatonAlias { .. } => Some(MethodFallback {
                stage: Stage::FractureGradient,
                requested: FractureGradientMethodName::Eaton.to_string(),
                applied: FractureGradientMethodName::HubbertWillis.to_string(),
                reason: FallbackReason::MethodAlias,
            }),
            _ => None,
        }
    }
}

/// Output of the fracture-gradient stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FractureGradientResult {
    /// Fg (psi); NaN wherever Sv or Pp is NaN
    pub fg: Vec<f64>,
    /// Fg at the deepest sample over its depth (psi/ft)
    pub gradient: f64,
    pub alias: Option<MethodFallback>,
}

/// Compute fracture pressure along the depth index.
///
/// NaN inputs propagate to NaN outputs sample by sample.
pub fn compute_fracture_gradient(
    method: FractureGradientMethod,
    depth: &[f64],
    sv: &[f64],
    pp: &[f64],
    gradient_fallback: f64,
) -> Result<FractureGradientResult, PipelineError> {
    if sv.len() != pp.len() {
        return Err(PipelineError::LengthMismatch {
            what: "Pp",
            expected: sv.len(),
            actual: pp.len(),
        });
    }

    let k = method.coefficient();
    let fg: Vec<f64> = sv
        .iter()
        .zip(pp)
        .map(|(&sv_i, &pp_i)| k * (sv_i - pp_i) + pp_i)
        .collect();
    let gradient = average_gradient(&fg, depth, gradient_fallback);

    debug!(
        ?method,
        samples = fg.len(),
        nan = fg.iter().filter(|v| v.is_nan()).count(),
        gradient,
        "Fracture gradient computed"
    );

    Ok(FractureGradientResult {
        fg,
        gradient,
        alias: method.alias_record(),
    })
}

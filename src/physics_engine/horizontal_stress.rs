//! Horizontal principal stresses from the Andersonian faulting model
//!
//! With effective vertical stress Δ = Sv - Pp and friction angle φ, the
//! frictional limits on horizontal stress are:
//!
//! - passive (compressional): ((1 + sin φ) / (1 - sin φ)) × Δ + Pp
//! - active (extensional):    ((1 - sin φ) / (1 + sin φ)) × Δ + Pp
//!
//! The faulting regime decides which limit bounds Shmin and SHmax.

use tracing::debug;

use crate::config::HorizontalStressConfig;
use crate::pipeline::PipelineError;
use crate::types::{MechanicalProperties, RegimeLabel, StressRatios, StressRegime};

/// Output of the horizontal-stress stage.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalStressResult {
    pub shmin: Vec<f64>,
    pub shmax: Vec<f64>,
    /// Ratios at the deepest sample with resolved stresses
    pub ratios: Option<StressRatios>,
    pub stress_regime_profile: Vec<RegimeLabel>,
    /// Samples where Sv ≤ Pp or either input was NaN
    pub unknown_samples: Vec<usize>,
}

/// Frictional limit multipliers for a friction angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionalLimits {
    /// (1 + sin φ) / (1 - sin φ)
    pub passive: f64,
    /// (1 - sin φ) / (1 + sin φ)
    pub active: f64,
}

impl FrictionalLimits {
    pub fn from_friction_angle(friction_angle_deg: f64) -> Self {
        let sin_phi = friction_angle_deg.to_radians().sin();
        Self {
            passive: (1.0 + sin_phi) / (1.0 - sin_phi),
            active: (1.0 - sin_phi) / (1.0 + sin_phi),
        }
    }
}

/// Shmin and SHmax at one depth, or `None` when Sv ≤ Pp or inputs are NaN.
pub fn horizontal_stress_at(
    sv: f64,
    pp: f64,
    props: &MechanicalProperties,
    limits: FrictionalLimits,
    policy: &HorizontalStressConfig,
) -> Option<(f64, f64)> {
    if sv.is_nan() || pp.is_nan() || sv <= pp {
        return None;
    }

    let effective = sv - pp;
    let passive_limit = limits.passive * effective + pp;
    let active_limit = limits.active * effective + pp;

    let stresses = match props.stress_regime {
        StressRegime::NormalFaulting => {
            let shmin = active_limit;
            let shmax = props.k0() * effective + pp;
            // Heuristic floor on SHmax; factor comes from config
            let shmax = if shmax < shmin {
                policy.normal_faulting_shmax_floor_factor * shmin
            } else {
                shmax
            };
            (shmin, shmax)
        }
        StressRegime::StrikeSlip => (active_limit, passive_limit),
        // Shmin ≈ Sv: the vertical stress is the least principal stress
        StressRegime::ThrustFaulting => (sv, passive_limit),
    };
    Some(stresses)
}

/// Compute Shmin / SHmax along the depth index.
///
/// Unresolvable samples get NaN stresses and an `Unknown` regime label;
/// they never abort the stage.
pub fn compute_horizontal_stress(
    sv: &[f64],
    pp: &[f64],
    props: &MechanicalProperties,
    policy: &HorizontalStressConfig,
) -> Result<HorizontalStressResult, PipelineError> {
    if sv.len() != pp.len() {
        return Err(PipelineError::LengthMismatch {
            what: "Pp",
            expected: sv.len(),
            actual: pp.len(),
        });
    }

    let limits = FrictionalLimits::from_friction_angle(props.friction_angle);
    let label = RegimeLabel::from(props.stress_regime);

    let mut shmin = Vec::with_capacity(sv.len());
    let mut shmax = Vec::with_capacity(sv.len());
    let mut stress_regime_profile = Vec::with_capacity(sv.len());
    let mut unknown_samples = Vec::new();
    let mut ratios = None;

    for (i, (&sv_i, &pp_i)) in sv.iter().zip(pp).enumerate() {
        match horizontal_stress_at(sv_i, pp_i, props, limits, policy) {
            Some((lo, hi)) => {
                shmin.push(lo);
                shmax.push(hi);
                stress_regime_profile.push(label);
                ratios = Some(StressRatios {
                    shmax_shmin: hi / lo,
                    shmax_sv: hi / sv_i,
                    shmin_sv: lo / sv_i,
                });
            }
            None => {
                shmin.push(f64::NAN);
                shmax.push(f64::NAN);
                stress_regime_profile.push(RegimeLabel::Unknown);
                unknown_samples.push(i);
            }
        }
    }

    debug!(
        regime = %props.stress_regime,
        samples = sv.len(),
        unknown = unknown_samples.len(),
        "Horizontal stresses computed"
    );

    Ok(HorizontalStressResult {
        shmin,
        shmax,
        ratios,
        stress_regime_profile,
        unknown_samples,
    })
}

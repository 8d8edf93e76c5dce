//! Stress profile produced by a completed pipeline run

use serde::{Deserialize, Serialize};

use crate::physics_engine::units::psi_ft_to_ppg;

/// Per-depth faulting-regime label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeLabel {
    NormalFaulting,
    StrikeSlip,
    ThrustFaulting,
    /// Sv ≤ Pp or missing inputs at this depth
    Unknown,
}

impl From<super::StressRegime> for RegimeLabel {
    fn from(regime: super::StressRegime) -> Self {
        match regime {
            super::StressRegime::NormalFaulting => RegimeLabel::NormalFaulting,
            super::StressRegime::StrikeSlip => RegimeLabel::StrikeSlip,
            super::StressRegime::ThrustFaulting => RegimeLabel::ThrustFaulting,
        }
    }
}

/// Principal stress ratios at the deepest valid sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressRatios {
    #[serde(rename = "SHmax_Shmin")]
    pub shmax_shmin: f64,
    #[serde(rename = "SHmax_Sv")]
    pub shmax_sv: f64,
    #[serde(rename = "Shmin_Sv")]
    pub shmin_sv: f64,
}

/// Pipeline stage, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    VerticalStress,
    PorePressure,
    HorizontalStress,
    FractureGradient,
    Quality,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::VerticalStress => "vertical stress",
            Stage::PorePressure => "pore pressure",
            Stage::HorizontalStress => "horizontal stress",
            Stage::FractureGradient => "fracture gradient",
            Stage::Quality => "quality assessment",
        };
        f.write_str(name)
    }
}

/// Why a requested method was not evaluated as named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// Eaton requested with no sonic curve
    MissingSonicCurve,
    /// Sonic curve present but not aligned with the depth index
    SonicLengthMismatch,
    /// Method is named but has no formula of its own
    NotImplemented,
    /// Method name is an alias of another formula
    MethodAlias,
}

/// Audit record for a degraded (non-fatal) method substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodFallback {
    pub stage: Stage,
    pub requested: String,
    pub applied: String,
    pub reason: FallbackReason,
}

/// Explicit record of every local recovery made while building the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub fallbacks: Vec<MethodFallback>,
    /// Sv samples that carried the previous cumulative value
    pub held_over_samples: Vec<usize>,
    /// Eaton samples clamped to hydrostatic
    pub clamped_pore_pressure_samples: Vec<usize>,
    /// Samples where horizontal stresses could not be resolved
    pub unknown_regime_samples: Vec<usize>,
}

/// The five depth profiles with their gradients and regime labels.
///
/// All arrays share the depth index. Stresses in psi, gradients in psi/ft.
/// Unresolved samples are NaN, so compare profiles through their JSON form
/// (NaN becomes `null`) rather than with `==`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressProfile {
    pub depth: Vec<f64>,
    #[serde(rename = "Sv", with = "super::serde_nan")]
    pub sv: Vec<f64>,
    #[serde(rename = "Sv_gradient")]
    pub sv_gradient: f64,
    #[serde(rename = "Pp", with = "super::serde_nan")]
    pub pp: Vec<f64>,
    #[serde(rename = "Pp_gradient")]
    pub pp_gradient: f64,
    #[serde(rename = "Shmin", with = "super::serde_nan")]
    pub shmin: Vec<f64>,
    #[serde(rename = "SHmax", with = "super::serde_nan")]
    pub shmax: Vec<f64>,
    #[serde(rename = "Fg", with = "super::serde_nan")]
    pub fg: Vec<f64>,
    #[serde(rename = "Fg_gradient")]
    pub fg_gradient: f64,
    pub ratios: Option<StressRatios>,
    #[serde(rename = "stressRegimeProfile")]
    pub stress_regime_profile: Vec<RegimeLabel>,
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

/// Average gradients converted to mud-weight units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientsPpg {
    pub sv: f64,
    pub pp: f64,
    pub fg: f64,
}

impl StressProfile {
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// The five output curves in a fixed order: Sv, SHmax, Shmin, Pp, Fg.
    pub fn curves(&self) -> [&[f64]; 5] {
        [&self.sv, &self.shmax, &self.shmin, &self.pp, &self.fg]
    }

    pub fn gradients_ppg(&self) -> GradientsPpg {
        GradientsPpg {
            sv: psi_ft_to_ppg(self.sv_gradient),
            pp: psi_ft_to_ppg(self.pp_gradient),
            fg: psi_ft_to_ppg(self.fg_gradient),
        }
    }
}

//! Rock mechanical properties and method selectors

use serde::{Deserialize, Serialize};

/// Andersonian faulting regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StressRegime {
    /// Sv > SHmax > Shmin
    #[default]
    #[serde(alias = "Normal", alias = "Normal Faulting", alias = "normal")]
    NormalFaulting,
    /// SHmax > Sv > Shmin
    #[serde(alias = "Strike-Slip", alias = "Strike Slip", alias = "strike-slip")]
    StrikeSlip,
    /// SHmax > Shmin > Sv
    #[serde(
        alias = "Thrust",
        alias = "Thrust Faulting",
        alias = "Reverse",
        alias = "thrust"
    )]
    ThrustFaulting,
}

impl std::fmt::Display for StressRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressRegime::NormalFaulting => write!(f, "Normal Faulting"),
            StressRegime::StrikeSlip => write!(f, "Strike-Slip"),
            StressRegime::ThrustFaulting => write!(f, "Thrust Faulting"),
        }
    }
}

/// Elastic and strength properties applied to the whole interval for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanicalProperties {
    /// Poisson's ratio ν, dimensionless, must be in (0, 1)
    pub poisson_ratio: f64,
    /// Internal friction angle φ in degrees
    pub friction_angle: f64,
    #[serde(default)]
    pub stress_regime: StressRegime,
}

impl MechanicalProperties {
    /// Coefficient of earth pressure at rest, ν/(1-ν).
    pub fn k0(&self) -> f64 {
        self.poisson_ratio / (1.0 - self.poisson_ratio)
    }

    /// Check physical bounds. Returns a description of the first violation.
    pub fn check_bounds(&self) -> Result<(), String> {
        if !self.poisson_ratio.is_finite() || self.poisson_ratio <= 0.0 || self.poisson_ratio >= 1.0 {
            return Err(format!(
                "Poisson's ratio must be in (0, 1), got {}",
                self.poisson_ratio
            ));
        }
        if !self.friction_angle.is_finite() || self.friction_angle < 0.0 || self.friction_angle >= 90.0 {
            return Err(format!(
                "Friction angle must be in [0, 90) degrees, got {}",
                self.friction_angle
            ));
        }
        Ok(())
    }
}

/// Pore-pressure method as requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PorePressureMethodName {
    #[serde(alias = "eaton")]
    Eaton,
    #[serde(alias = "Hottman-Johnson", alias = "Hottman Johnson")]
    HottmanJohnson,
    #[default]
    #[serde(alias = "Constant Gradient", alias = "Constant")]
    ConstantGradient,
}

impl std::fmt::Display for PorePressureMethodName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PorePressureMethodName::Eaton => write!(f, "Eaton"),
            PorePressureMethodName::HottmanJohnson => write!(f, "Hottman-Johnson"),
            PorePressureMethodName::ConstantGradient => write!(f, "ConstantGradient"),
        }
    }
}

/// Fracture-gradient method as requested by the caller.
///
/// `Eaton` is a naming alias: it evaluates the Hubbert-Willis formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FractureGradientMethodName {
    #[default]
    #[serde(alias = "Hubbert-Willis", alias = "Hubbert Willis")]
    HubbertWillis,
    #[serde(alias = "Matthews-Kelly", alias = "Matthews Kelly")]
    MatthewsKelly,
    #[serde(alias = "EatonAlias", alias = "eaton")]
    Eaton,
}

impl std::fmt::Display for FractureGradientMethodName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FractureGradientMethodName::HubbertWillis => write!(f, "Hubbert-Willis"),
            FractureGradientMethodName::MatthewsKelly => write!(f, "Matthews-Kelly"),
            FractureGradientMethodName::Eaton => write!(f, "Eaton"),
        }
    }
}

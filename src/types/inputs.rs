//! Pipeline input contract, as supplied by the log-ingestion layer

use serde::{Deserialize, Serialize};

use super::{
    find_curve, CurveKind, FractureGradientMethodName, MechanicalProperties,
    PorePressureMethodName, WellLogCurve,
};

/// Method selection and optional per-run overrides.
///
/// Any `None` override falls back to the configured default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureData {
    #[serde(default)]
    pub pore_pressure_method: PorePressureMethodName,
    #[serde(default)]
    pub fracture_gradient_method: FractureGradientMethodName,
    #[serde(default)]
    pub eaton_exponent: Option<f64>,
    #[serde(default)]
    pub matthews_kelly_coeff: Option<f64>,
    /// Gradient (psi/ft) for the ConstantGradient method
    #[serde(default)]
    pub constant_gradient: Option<f64>,
}

/// Everything one pipeline run consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemInputs {
    /// Measured depth (ft), strictly increasing
    #[serde(default)]
    pub depth: Vec<f64>,
    #[serde(default)]
    pub curves: Vec<WellLogCurve>,
    #[serde(default)]
    pub mechanical_properties: Option<MechanicalProperties>,
    #[serde(default)]
    pub pressure_data: PressureData,
}

impl MemInputs {
    pub fn curve(&self, kind: CurveKind) -> Option<&WellLogCurve> {
        find_curve(&self.curves, kind)
    }
}

//! Well-log curve types and alias resolution

use serde::{Deserialize, Serialize};

/// A single depth-aligned log curve.
///
/// `values` is aligned 1:1 with the depth index. Gaps are stored as NaN
/// (`null` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellLogCurve {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(with = "super::serde_nan")]
    pub values: Vec<f64>,
}

impl WellLogCurve {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            values,
        }
    }

    /// Number of samples that are NaN or infinite.
    pub fn gap_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_finite()).count()
    }
}

/// Curves the pipeline knows how to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Bulk density (g/cm³)
    Density,
    /// Compressional sonic slowness (µs/ft)
    Sonic,
}

impl CurveKind {
    /// Mnemonics accepted for this curve, compared case-insensitively.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CurveKind::Density => &["RHOB", "DEN"],
            CurveKind::Sonic => &["DT", "DTCO"],
        }
    }

    pub fn matches(self, name: &str) -> bool {
        let name = name.trim();
        self.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for CurveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveKind::Density => write!(f, "Density"),
            CurveKind::Sonic => write!(f, "Sonic"),
        }
    }
}

/// Resolve the first curve in `curves` matching `kind`.
pub fn find_curve(curves: &[WellLogCurve], kind: CurveKind) -> Option<&WellLogCurve> {
    curves.iter().find(|c| kind.matches(&c.name))
}

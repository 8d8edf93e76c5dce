//! Quality report types

use serde::{Deserialize, Serialize};

/// Warning category, listed from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningCategory {
    /// Pp exceeds Fg (mud-window inversion)
    MudWindowInversion,
    /// Negative values or broken Sv ≥ Shmin / SHmax ≥ Shmin ordering
    StressAnomaly,
    /// NaN samples in the output curves
    MissingData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityWarning {
    pub message: String,
    pub category: WarningCategory,
}

/// Summary counts surfaced alongside the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub quality_score: f64,
    pub issues: usize,
    pub stress_anomalies: usize,
    pub mw_inversions: usize,
    pub nan_points: usize,
    pub held_over_points: usize,
    pub clamped_points: usize,
    pub unknown_regime_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// 0-100, 100 = no issues found
    pub score: f64,
    pub warnings: Vec<QualityWarning>,
    pub summary: QualitySummary,
}

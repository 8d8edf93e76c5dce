//! Quality Assessment Module
//!
//! Deterministic, rule-based scoring of a completed stress profile. This is
//! the only stage that looks across all five curves at once, so it is where
//! physically inconsistent output from the earlier local recoveries shows up.
//!
//! # Scoring
//!
//! Start at 100 and deduct (deductions stack):
//! - 30 if any sample has Pp > Fg (mud-window inversion)
//! - 20 if any sample has a negative value, Sv < Shmin or SHmax < Shmin
//! - 15 × (NaN points / (5 × samples)) across Sv, SHmax, Shmin, Pp, Fg
//!
//! The score is clamped to [0, 100].

use tracing::{debug, warn};

use crate::config::defaults::QUALITY_MAX_SCORE;
use crate::config::QualityConfig;
use crate::types::{QualityReport, QualitySummary, QualityWarning, StressProfile, WarningCategory};

/// Scores a `StressProfile` with configurable deduction weights.
#[derive(Debug, Clone, Default)]
pub struct QualityAssessor {
    penalties: QualityConfig,
}

/// Raw per-sample counts before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SampleCounts {
    stress_anomalies: usize,
    mw_inversions: usize,
    nan_points: usize,
}

impl QualityAssessor {
    pub fn new(penalties: QualityConfig) -> Self {
        Self { penalties }
    }

    /// Assess a completed profile.
    pub fn assess(&self, profile: &StressProfile) -> QualityReport {
        let n = profile.len();
        let counts = count_issues(profile);
        let mut score = QUALITY_MAX_SCORE;
        let mut warnings = Vec::new();

        if counts.mw_inversions > 0 {
            score -= self.penalties.mud_window_inversion_penalty;
            warnings.push(QualityWarning {
                message: format!(
                    "Mud window inversion (Pp > Fg) at {:.1}% of depth samples",
                    percent(counts.mw_inversions, n)
                ),
                category: WarningCategory::MudWindowInversion,
            });
        }

        if counts.stress_anomalies > 0 {
            score -= self.penalties.stress_anomaly_penalty;
            warnings.push(QualityWarning {
                message: format!(
                    "Stress anomalies (negative values or Sv < Shmin / SHmax < Shmin) at {:.1}% of depth samples",
                    percent(counts.stress_anomalies, n)
                ),
                category: WarningCategory::StressAnomaly,
            });
        }

        let total_points = 5 * n;
        if counts.nan_points > 0 && total_points > 0 {
            let nan_fraction = counts.nan_points as f64 / total_points as f64;
            score -= self.penalties.missing_data_penalty * nan_fraction;
            warnings.push(QualityWarning {
                message: format!(
                    "{} of {} output points are missing ({:.1}%)",
                    counts.nan_points,
                    total_points,
                    nan_fraction * 100.0
                ),
                category: WarningCategory::MissingData,
            });
        }

        let score = score.clamp(0.0, QUALITY_MAX_SCORE);
        let d = &profile.diagnostics;
        let summary = QualitySummary {
            quality_score: score,
            issues: warnings.len(),
            stress_anomalies: counts.stress_anomalies,
            mw_inversions: counts.mw_inversions,
            nan_points: counts.nan_points,
            held_over_points: d.held_over_samples.len(),
            clamped_points: d.clamped_pore_pressure_samples.len(),
            unknown_regime_points: d.unknown_regime_samples.len(),
        };

        if warnings.is_empty() {
            debug!(score, samples = n, "Quality assessment clean");
        } else {
            warn!(
                score,
                inversions = counts.mw_inversions,
                anomalies = counts.stress_anomalies,
                nan_points = counts.nan_points,
                "Quality assessment found issues"
            );
        }

        QualityReport {
            score,
            warnings,
            summary,
        }
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Count anomalous samples, inverted samples and NaN points.
///
/// Comparisons involving NaN are false, so missing values are only counted
/// as NaN points, never as anomalies or inversions.
fn count_issues(profile: &StressProfile) -> SampleCounts {
    let mut counts = SampleCounts::default();

    for i in 0..profile.len() {
        let at = |curve: &[f64]| curve.get(i).copied().unwrap_or(f64::NAN);
        let (sv, pp, shmin, shmax, fg) = (
            at(&profile.sv),
            at(&profile.pp),
            at(&profile.shmin),
            at(&profile.shmax),
            at(&profile.fg),
        );

        let values = [sv, shmax, shmin, pp, fg];
        counts.nan_points += values.iter().filter(|v| v.is_nan()).count();

        let negative = values.iter().any(|&v| v < 0.0);
        let misordered = sv < shmin || shmax < shmin;
        if negative || misordered {
            counts.stress_anomalies += 1;
        }

        if pp > fg {
            counts.mw_inversions += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Diagnostics, RegimeLabel};

    fn profile(sv: &[f64], pp: &[f64], shmin: &[f64], shmax: &[f64], fg: &[f64]) -> StressProfile {
        let depth: Vec<f64> = (1..=sv.len()).map(|i| i as f64 * 1000.0).collect();
        StressProfile {
            stress_regime_profile: vec![RegimeLabel::NormalFaulting; depth.len()],
            depth,
            sv: sv.to_vec(),
            sv_gradient: 1.0,
            pp: pp.to_vec(),
            pp_gradient: 0.45,
            shmin: shmin.to_vec(),
            shmax: shmax.to_vec(),
            fg: fg.to_vec(),
            fg_gradient: 0.7,
            ratios: None,
            diagnostics: Diagnostics::default(),
        }
    }

    #[test]
    fn test_clean_profile_scores_100() {
        let p = profile(
            &[1000.0, 2000.0],
            &[450.0, 900.0],
            &[700.0, 1400.0],
            &[800.0, 1600.0],
            &[800.0, 1600.0],
        );
        let report = QualityAssessor::default().assess(&p);
        assert_eq!(report.score, 100.0);
        assert!(report.warnings.is_empty());
        assert_eq!(report.summary.issues, 0);
    }

    #[test]
    fn test_full_inversion_caps_score_at_70() {
        let p = profile(
            &[1000.0, 2000.0, 3000.0],
            &[900.0, 1900.0, 2900.0],
            &[950.0, 1950.0, 2950.0],
            &[980.0, 1980.0, 2980.0],
            &[800.0, 1800.0, 2800.0],
        );
        let report = QualityAssessor::default().assess(&p);
        assert!(report.score <= 70.0);
        assert_eq!(report.summary.mw_inversions, 3);
        assert_eq!(report.warnings[0].category, WarningCategory::MudWindowInversion);
        assert!(report.warnings[0].message.contains("100.0%"));
    }

    #[test]
    fn test_ordering_violation_deducts_20() {
        // SHmax < Shmin at the second sample
        let p = profile(
            &[1000.0, 2000.0],
            &[450.0, 900.0],
            &[700.0, 1400.0],
            &[800.0, 1300.0],
            &[800.0, 1600.0],
        );
        let report = QualityAssessor::default().assess(&p);
        assert_eq!(report.score, 80.0);
        assert_eq!(report.summary.stress_anomalies, 1);
        assert!(report.warnings[0].message.contains("50.0%"));
    }

    #[test]
    fn test_negative_value_is_anomaly() {
        let p = profile(&[1000.0], &[-1.0], &[700.0], &[800.0], &[800.0]);
        let report = QualityAssessor::default().assess(&p);
        assert_eq!(report.summary.stress_anomalies, 1);
    }

    #[test]
    fn test_nan_fraction_scales_penalty() {
        // 2 of 10 points missing → 15 × 0.2 = 3
        let p = profile(
            &[1000.0, 2000.0],
            &[450.0, 900.0],
            &[f64::NAN, 1400.0],
            &[f64::NAN, 1600.0],
            &[800.0, 1600.0],
        );
        let report = QualityAssessor::default().assess(&p);
        assert!((report.score - 97.0).abs() < 1e-9, "got {}", report.score);
        assert_eq!(report.summary.nan_points, 2);
        assert_eq!(report.summary.stress_anomalies, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].category, WarningCategory::MissingData);
    }

    #[test]
    fn test_deductions_stack_and_clamp() {
        let assessor = QualityAssessor::new(QualityConfig {
            mud_window_inversion_penalty: 80.0,
            stress_anomaly_penalty: 50.0,
            missing_data_penalty: 15.0,
        });
        let p = profile(&[1000.0], &[900.0], &[1100.0], &[1000.0], &[800.0]);
        let report = assessor.assess(&p);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.summary.issues, 2);
    }

    #[test]
    fn test_summary_counts_recoveries() {
        let mut p = profile(&[1000.0], &[450.0], &[700.0], &[800.0], &[800.0]);
        p.diagnostics.held_over_samples = vec![0];
        p.diagnostics.clamped_pore_pressure_samples = vec![0];
        let report = QualityAssessor::default().assess(&p);
        assert_eq!(report.summary.held_over_points, 1);
        assert_eq!(report.summary.clamped_points, 1);
        assert_eq!(report.score, 100.0);
    }
}

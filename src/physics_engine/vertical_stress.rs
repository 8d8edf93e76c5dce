//! Overburden (vertical stress) from bulk density
//!
//! Trapezoidal integration of density over depth:
//!
//! Sv[i] = Sv[i-1] + avg(ρ[i-1], ρ[i]) × 0.433 × (z[i] - z[i-1])
//!
//! with ρ in g/cm³ (≈ specific gravity), z in ft and Sv in psi.

use tracing::debug;

use super::average_gradient;
use crate::config::ConstantsConfig;
use crate::pipeline::PipelineError;

/// Output of the overburden stage.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalStressResult {
    /// Sv (psi), same length as depth
    pub sv: Vec<f64>,
    /// Sv at the deepest sample over its depth (psi/ft)
    pub gradient: f64,
    /// Samples where the interval could not be integrated and Sv carried
    /// the previous cumulative value
    pub held_over_samples: Vec<usize>,
}

/// Integrate density into overburden stress.
///
/// An interval with a non-positive or NaN mean density, or a non-positive
/// depth step, adds nothing: Sv holds the previous value and the sample
/// index is recorded in `held_over_samples`.
pub fn compute_vertical_stress(
    depth: &[f64],
    density: &[f64],
    constants: &ConstantsConfig,
) -> Result<VerticalStressResult, PipelineError> {
    if depth.len() != density.len() {
        return Err(PipelineError::LengthMismatch {
            what: "density",
            expected: depth.len(),
            actual: density.len(),
        });
    }

    let mut sv = Vec::with_capacity(depth.len());
    let mut held_over_samples = Vec::new();

    if !depth.is_empty() {
        sv.push(0.0);
    }

    for i in 1..depth.len() {
        let prev = sv[i - 1];
        let avg_density = (density[i - 1] + density[i]) / 2.0;
        let dz = depth[i] - depth[i - 1];

        // NaN fails both comparisons, so gaps land in the hold-over branch
        if avg_density > 0.0 && dz > 0.0 {
            sv.push(prev + avg_density * constants.hydrostatic_gradient_psi_ft * dz);
        } else {
            held_over_samples.push(i);
            sv.push(prev);
        }
    }

    let gradient = average_gradient(&sv, depth, constants.water_gradient_fallback_psi_ft);

    debug!(
        samples = sv.len(),
        held_over = held_over_samples.len(),
        gradient,
        "Vertical stress integrated"
    );

    Ok(VerticalStressResult {
        sv,
        gradient,
        held_over_samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants() -> ConstantsConfig {
        ConstantsConfig::default()
    }

    #[test]
    fn test_constant_density_scales_linearly() {
        let result =
            compute_vertical_stress(&[0.0, 100.0, 200.0], &[2.3, 2.3, 2.3], &constants()).unwrap();
        assert_eq!(result.sv[0], 0.0);
        assert!((result.sv[1] - 99.59).abs() < 1e-9, "got {}", result.sv[1]);
        assert!((result.sv[2] - 199.18).abs() < 1e-9, "got {}", result.sv[2]);
        assert!((result.gradient - 0.9959).abs() < 1e-9);
        assert!(result.held_over_samples.is_empty());
    }

    #[test]
    fn test_trapezoidal_average() {
        let result = compute_vertical_stress(&[1000.0, 1100.0], &[2.0, 2.4], &constants()).unwrap();
        // avg 2.2 × 0.433 × 100
        assert!((result.sv[1] - 95.26).abs() < 1e-9);
    }

    #[test]
    fn test_nan_density_holds_previous_value() {
        let depth = [0.0, 100.0, 200.0, 300.0];
        let density = [2.3, 2.3, f64::NAN, 2.3];
        let result = compute_vertical_stress(&depth, &density, &constants()).unwrap();
        assert_eq!(result.sv[2], result.sv[1]);
        assert_eq!(result.sv[3], result.sv[2]);
        assert_eq!(result.held_over_samples, vec![2, 3]);
    }

    #[test]
    fn test_non_positive_step_holds_previous_value() {
        let depth = [0.0, 100.0, 100.0, 50.0];
        let density = [2.3; 4];
        let result = compute_vertical_stress(&depth, &density, &constants()).unwrap();
        assert_eq!(result.sv[2], result.sv[1]);
        assert_eq!(result.sv[3], result.sv[1]);
        assert_eq!(result.held_over_samples, vec![2, 3]);
    }

    #[test]
    fn test_negative_density_holds() {
        let result =
            compute_vertical_stress(&[0.0, 100.0], &[-1.0, -1.0], &constants()).unwrap();
        assert_eq!(result.sv, vec![0.0, 0.0]);
        assert_eq!(result.held_over_samples, vec![1]);
    }

    #[test]
    fn test_monotonic_for_positive_density() {
        let depth: Vec<f64> = (0..50).map(|i| f64::from(i) * 10.0).collect();
        let density: Vec<f64> = (0..50).map(|i| 2.0 + f64::from(i % 7) * 0.08).collect();
        let result = compute_vertical_stress(&depth, &density, &constants()).unwrap();
        assert!(result.sv.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_length_mismatch_fails() {
        let err = compute_vertical_stress(&[0.0, 100.0], &[2.3], &constants()).unwrap_err();
        assert!(matches!(err, PipelineError::LengthMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_gradient_falls_back_to_water() {
        let result = compute_vertical_stress(&[-200.0, -100.0, 0.0], &[2.3; 3], &constants()).unwrap();
        assert_eq!(result.gradient, 0.433);
    }
}

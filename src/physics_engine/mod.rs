//! Physics Engine Module
//!
//! Deterministic geomechanics for the 1D Mechanical Earth Model.
//! Every stage is a pure function of its input arrays and config section.
//!
//! ## Stages (strict dependency order)
//! - `compute_vertical_stress()` - density → Sv
//! - `compute_pore_pressure()` - Sv (+ sonic) → Pp
//! - `compute_horizontal_stress()` - Sv + Pp + rock properties → Shmin / SHmax
//! - `compute_fracture_gradient()` - Sv + Pp → Fg

pub mod fracture_gradient;
pub mod horizontal_stress;
pub mod pore_pressure;
pub mod units;
pub mod vertical_stress;

pub use fracture_gradient::{compute_fracture_gradient, FractureGradientMethod, FractureGradientResult};
pub use horizontal_stress::{
    compute_horizontal_stress, horizontal_stress_at, FrictionalLimits, HorizontalStressResult,
};
pub use pore_pressure::{compute_pore_pressure, PorePressureMethod, PorePressureResult};
pub use units::{ppg_to_psi_ft, psi_ft_to_ppg};
pub use vertical_stress::{compute_vertical_stress, VerticalStressResult};

/// Average gradient of a profile: value at the deepest sample divided by
/// its depth. Returns `fallback` when the deepest depth is not positive or
/// either array is empty.
pub fn average_gradient(values: &[f64], depth: &[f64], fallback: f64) -> f64 {
    match (values.last(), depth.last()) {
        (Some(&v), Some(&z)) if z > 0.0 => v / z,
        _ => fallback,
    }
}

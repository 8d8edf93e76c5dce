//! System-wide default constants.
//!
//! Centralises the physical constants and method defaults used by the
//! pipeline stages. Each one is overridable through `MemConfig`.

// ============================================================================
// Physical constants
// ============================================================================

/// Fresh-water hydrostatic gradient (psi/ft). Also converts density in g/cm³
/// to an overburden gradient.
pub const HYDROSTATIC_GRADIENT_PSI_FT: f64 = 0.433;

/// Sv gradient reported when the deepest sample is at or above datum (psi/ft).
pub const WATER_GRADIENT_FALLBACK_PSI_FT: f64 = 0.433;

/// psi/ft per ppg of mud weight.
pub const PSI_FT_PER_PPG: f64 = 0.052;

// ============================================================================
// Pore pressure
// ============================================================================

/// Default gradient for the ConstantGradient method (psi/ft).
pub const DEFAULT_CONSTANT_GRADIENT_PSI_FT: f64 = 0.45;

/// Gradient substituted when Eaton has no sonic curve or Hottman-Johnson is
/// requested (psi/ft).
pub const PORE_PRESSURE_FALLBACK_GRADIENT_PSI_FT: f64 = 0.465;

/// Default Eaton exponent for sonic data.
pub const DEFAULT_EATON_EXPONENT: f64 = 3.0;

/// Normal-compaction-trend sonic slowness (µs/ft).
pub const NORMAL_COMPACTION_DT_US_FT: f64 = 100.0;

// ============================================================================
// Horizontal stress
// ============================================================================

/// Normal faulting: SHmax is raised to this multiple of Shmin when the
/// k0 estimate falls below Shmin.
pub const SHMAX_FLOOR_FACTOR: f64 = 1.1;

// ============================================================================
// Fracture gradient
// ============================================================================

/// Default Matthews-Kelly matrix stress coefficient Ki.
pub const DEFAULT_MATTHEWS_KELLY_COEFF: f64 = 0.7;

/// Fg gradient reported when the deepest sample is at or above datum (psi/ft).
pub const FRACTURE_GRADIENT_FALLBACK_PSI_FT: f64 = 1.0;

// ============================================================================
// Quality scoring
// ============================================================================

pub const QUALITY_MAX_SCORE: f64 = 100.0;

/// Deduction for any mud-window inversion (Pp > Fg).
pub const MUD_WINDOW_INVERSION_PENALTY: f64 = 30.0;

/// Deduction for any negative value or stress-ordering violation.
pub const STRESS_ANOMALY_PENALTY: f64 = 20.0;

/// Deduction scaled by the NaN fraction across the five output curves.
pub const MISSING_DATA_PENALTY: f64 = 15.0;

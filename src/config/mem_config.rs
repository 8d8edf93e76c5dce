//! MEM Configuration - pipeline constants as operator-tunable TOML values
//!
//! Every constant the stages use lives in one of these sections. Each struct
//! implements `Default` with the reference values, so running without a
//! config file reproduces the reference behaviour exactly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the MEM pipeline.
///
/// Load with `MemConfig::load()` which searches:
/// 1. `$MEM_CONFIG` env var
/// 2. `./mem_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemConfig {
    #[serde(default)]
    pub constants: ConstantsConfig,

    #[serde(default)]
    pub pore_pressure: PorePressureConfig,

    #[serde(default)]
    pub horizontal_stress: HorizontalStressConfig,

    #[serde(default)]
    pub fracture_gradient: FractureGradientConfig,

    /// Quality scorer deductions
    #[serde(default)]
    pub quality: QualityConfig,
}

impl MemConfig {
    /// Load configuration using the standard search order:
    /// 1. `$MEM_CONFIG` environment variable
    /// 2. `./mem_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("MEM_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded MEM config from MEM_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from MEM_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "MEM_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("mem_config.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded MEM config from ./mem_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./mem_config.toml, using defaults");
                }
            }
        }

        info!("No mem_config.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys only warn.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "MEM config saved");
        Ok(())
    }

    /// Validate all constants for internal consistency.
    ///
    /// Rules:
    /// - Every value must be finite
    /// - Gradients and the Eaton exponent must be positive
    /// - Matthews-Kelly Ki must be in (0, 1]
    /// - SHmax floor factor must be >= 1
    /// - Penalties must keep inversion > anomaly > missing data > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let c = &self.constants;
        Self::check_positive(c.hydrostatic_gradient_psi_ft, "constants.hydrostatic_gradient_psi_ft", &mut errors);
        Self::check_positive(c.water_gradient_fallback_psi_ft, "constants.water_gradient_fallback_psi_ft", &mut errors);

        let pp = &self.pore_pressure;
        Self::check_positive(pp.default_constant_gradient_psi_ft, "pore_pressure.default_constant_gradient_psi_ft", &mut errors);
        Self::check_positive(pp.fallback_gradient_psi_ft, "pore_pressure.fallback_gradient_psi_ft", &mut errors);
        Self::check_positive(pp.default_eaton_exponent, "pore_pressure.default_eaton_exponent", &mut errors);
        Self::check_positive(pp.normal_compaction_dt_us_ft, "pore_pressure.normal_compaction_dt_us_ft", &mut errors);

        let hs = &self.horizontal_stress;
        if !hs.normal_faulting_shmax_floor_factor.is_finite() || hs.normal_faulting_shmax_floor_factor < 1.0 {
            errors.push(format!(
                "horizontal_stress.normal_faulting_shmax_floor_factor ({}) must be >= 1.0",
                hs.normal_faulting_shmax_floor_factor
            ));
        }

        let fg = &self.fracture_gradient;
        let ki = fg.default_matthews_kelly_coeff;
        if !ki.is_finite() || ki <= 0.0 || ki > 1.0 {
            errors.push(format!(
                "fracture_gradient.default_matthews_kelly_coeff ({ki}) must be in (0, 1]"
            ));
        }
        Self::check_positive(fg.gradient_fallback_psi_ft, "fracture_gradient.gradient_fallback_psi_ft", &mut errors);

        let q = &self.quality;
        Self::check_positive(q.missing_data_penalty, "quality.missing_data_penalty", &mut errors);
        if q.mud_window_inversion_penalty <= q.stress_anomaly_penalty {
            errors.push(format!(
                "quality.mud_window_inversion_penalty ({:.1}) must be > stress_anomaly_penalty ({:.1})",
                q.mud_window_inversion_penalty, q.stress_anomaly_penalty
            ));
        }
        if q.stress_anomaly_penalty <= q.missing_data_penalty {
            errors.push(format!(
                "quality.stress_anomaly_penalty ({:.1}) must be > missing_data_penalty ({:.1})",
                q.stress_anomaly_penalty, q.missing_data_penalty
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN fails every comparison below
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
        } else if value <= 0.0 {
            errors.push(format!("{name} ({value}) must be > 0"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),
    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantsConfig {
    /// Hydrostatic gradient and density-to-stress conversion (psi/ft per g/cm³)
    pub hydrostatic_gradient_psi_ft: f64,
    /// Sv gradient when the deepest depth is <= 0
    pub water_gradient_fallback_psi_ft: f64,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            hydrostatic_gradient_psi_ft: defaults::HYDROSTATIC_GRADIENT_PSI_FT,
            water_gradient_fallback_psi_ft: defaults::WATER_GRADIENT_FALLBACK_PSI_FT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorePressureConfig {
    pub default_constant_gradient_psi_ft: f64,
    /// Substitute gradient for Eaton-without-sonic and Hottman-Johnson
    pub fallback_gradient_psi_ft: f64,
    pub default_eaton_exponent: f64,
    /// Normal-compaction-trend slowness (dtNormal)
    pub normal_compaction_dt_us_ft: f64,
}

impl Default for PorePressureConfig {
    fn default() -> Self {
        Self {
            default_constant_gradient_psi_ft: defaults::DEFAULT_CONSTANT_GRADIENT_PSI_FT,
            fallback_gradient_psi_ft: defaults::PORE_PRESSURE_FALLBACK_GRADIENT_PSI_FT,
            default_eaton_exponent: defaults::DEFAULT_EATON_EXPONENT,
            normal_compaction_dt_us_ft: defaults::NORMAL_COMPACTION_DT_US_FT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalStressConfig {
    /// SHmax floor, as a multiple of Shmin, in the normal faulting regime
    pub normal_faulting_shmax_floor_factor: f64,
}

impl Default for HorizontalStressConfig {
    fn default() -> Self {
        Self {
            normal_faulting_shmax_floor_factor: defaults::SHMAX_FLOOR_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractureGradientConfig {
    pub default_matthews_kelly_coeff: f64,
    /// Fg gradient when the deepest depth is <= 0
    pub gradient_fallback_psi_ft: f64,
}

impl Default for FractureGradientConfig {
    fn default() -> Self {
        Self {
            default_matthews_kelly_coeff: defaults::DEFAULT_MATTHEWS_KELLY_COEFF,
            gradient_fallback_psi_ft: defaults::FRACTURE_GRADIENT_FALLBACK_PSI_FT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub mud_window_inversion_penalty: f64,
    pub stress_anomaly_penalty: f64,
    pub missing_data_penalty: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            mud_window_inversion_penalty: defaults::MUD_WINDOW_INVERSION_PENALTY,
            stress_anomaly_penalty: defaults::STRESS_ANOMALY_PENALTY,
            missing_data_penalty: defaults::MISSING_DATA_PENALTY,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

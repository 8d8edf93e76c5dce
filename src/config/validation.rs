//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for MemConfig.
///
/// Any new field added to MemConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [constants]
        "constants",
        "constants.hydrostatic_gradient_psi_ft",
        "constants.water_gradient_fallback_psi_ft",
        // [pore_pressure]
        "pore_pressure",
        "pore_pressure.default_constant_gradient_psi_ft",
        "pore_pressure.fallback_gradient_psi_ft",
        "pore_pressure.default_eaton_exponent",
        "pore_pressure.normal_compaction_dt_us_ft",
        // [horizontal_stress]
        "horizontal_stress",
        "horizontal_stress.normal_faulting_shmax_floor_factor",
        // [fracture_gradient]
        "fracture_gradient",
        "fracture_gradient.default_matthews_kelly_coeff",
        "fracture_gradient.gradient_fallback_psi_ft",
        // [quality]
        "quality",
        "quality.mud_window_inversion_penalty",
        "quality.stress_anomaly_penalty",
        "quality.missing_data_penalty",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so output is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed MemConfig.
///
/// Returns (errors, warnings): errors are impossible values, warnings are
/// suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::MemConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Hydrostatic gradient: fresh water 0.433, saturated brine ~0.52
    let hydro = config.constants.hydrostatic_gradient_psi_ft;
    if hydro.is_finite() && !(0.3..=0.6).contains(&hydro) {
        errors.push(format!(
            "constants.hydrostatic_gradient_psi_ft = {hydro:.3} is outside physical range (0.3-0.6 psi/ft)"
        ));
    }

    // Pore-pressure gradients below fresh water or above typical overburden are suspicious
    for (field, value) in [
        (
            "pore_pressure.default_constant_gradient_psi_ft",
            config.pore_pressure.default_constant_gradient_psi_ft,
        ),
        (
            "pore_pressure.fallback_gradient_psi_ft",
            config.pore_pressure.fallback_gradient_psi_ft,
        ),
    ] {
        if value.is_finite() && !(0.4..=1.0).contains(&value) {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!("{field} = {value:.3} is outside typical range (0.4-1.0 psi/ft)"),
                suggestion: None,
            });
        }
    }

    // Eaton exponent: 3.0 for sonic, 1.2 for resistivity; far outside is suspicious
    let n = config.pore_pressure.default_eaton_exponent;
    if n.is_finite() && !(0.5..=5.0).contains(&n) {
        warnings.push(ValidationWarning {
            field: "pore_pressure.default_eaton_exponent".to_string(),
            message: format!("default_eaton_exponent = {n:.2} is outside typical range (0.5-5.0)"),
            suggestion: None,
        });
    }

    // Shale normal-trend slowness: 50-200 µs/ft
    let dt = config.pore_pressure.normal_compaction_dt_us_ft;
    if dt.is_finite() && !(40.0..=240.0).contains(&dt) {
        warnings.push(ValidationWarning {
            field: "pore_pressure.normal_compaction_dt_us_ft".to_string(),
            message: format!(
                "normal_compaction_dt_us_ft = {dt:.1} is outside typical range (40-240 us/ft)"
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

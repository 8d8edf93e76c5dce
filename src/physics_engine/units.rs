//! Oilfield unit conversions

use crate::config::defaults::PSI_FT_PER_PPG;

/// Convert a pressure gradient in psi/ft to equivalent mud weight in ppg.
pub fn psi_ft_to_ppg(gradient_psi_ft: f64) -> f64 {
    gradient_psi_ft / PSI_FT_PER_PPG
}

/// Convert a mud weight in ppg to a pressure gradient in psi/ft.
pub fn ppg_to_psi_ft(mud_weight_ppg: f64) -> f64 {
    mud_weight_ppg * PSI_FT_PER_PPG
}

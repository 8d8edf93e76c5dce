//! Serde helpers for numeric curves with gaps.
//!
//! JSON has no NaN, so gaps travel as `null` and become `f64::NAN` in memory.
//! Non-finite values are written back out as `null`.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        values
            .iter()
            .map(|v| if v.is_finite() { Some(*v) } else { None }),
    )
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

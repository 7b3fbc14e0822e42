//! Magnitude to decibel conversion

/// Smallest magnitude fed to the logarithm; keeps exact zeros finite
pub const DB_FLOOR: f64 = 1e-12;

/// `20 * log10(max(|x|, 1e-12))`
#[inline]
pub fn to_db(x: f64) -> f64 {
    20.0 * x.abs().max(DB_FLOOR).log10()
}

/// dB value every exact-zero (or NaN) magnitude maps to: -240 dB
pub fn floor_db() -> f64 {
    to_db(0.0)
}

pub fn to_db_vec(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&x| to_db(x)).collect()
}

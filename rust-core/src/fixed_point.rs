//! Fixed-point to float conversion for captured I2S sample codes
//!
//! Every capture is normalized with the symmetric full-scale divisor
//! `2^(b-1) - 1`, so the most negative code lands slightly below -1.0.

use crate::error::{AnalysisError, Result};

/// Widest code the normalizer accepts
pub const MAX_BIT_WIDTH: u32 = 64;

fn check_bits(bits: u32) -> Result<()> {
    if bits <= 1 || bits > MAX_BIT_WIDTH {
        return Err(AnalysisError::InvalidParameter(format!(
            "bit width must be in 2..={MAX_BIT_WIDTH}, got {bits}"
        )));
    }
    Ok(())
}

/// Full-scale divisor `2^(bits-1) - 1`
pub fn full_scale(bits: u32) -> Result<f64> {
    check_bits(bits)?;
    Ok(2f64.powi(bits as i32 - 1) - 1.0)
}

/// Smallest and largest two's-complement code for `bits`
pub fn code_range(bits: u32) -> Result<(f64, f64)> {
    check_bits(bits)?;
    let half = 2f64.powi(bits as i32 - 1);
    Ok((-half, half - 1.0))
}

/// Normalize a single integer code
pub fn normalize_sample(code: i64, bits: u32) -> Result<f64> {
    Ok(code as f64 / full_scale(bits)?)
}

/// Normalize a column of codes (already widened to f64 by the loader)
pub fn normalize_codes(codes: &[f64], bits: u32) -> Result<Vec<f64>> {
    let scale = full_scale(bits)?;
    Ok(codes.iter().map(|&c| c / scale).collect())
}

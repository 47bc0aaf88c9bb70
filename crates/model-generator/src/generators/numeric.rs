//! Numeric value generators.

use crate::error::ProviderError;
use rand::Rng;

/// Default upper bound for 32-bit integers.
pub const DEFAULT_INT_MAX: i32 = i32::MAX;

/// Default upper bound for 64-bit integers.
pub const DEFAULT_INT64_MAX: i64 = i64::MAX;

/// Default upper bound for floats.
pub const DEFAULT_FLOAT_MAX: f64 = 2_147_483_647.0;

/// Default number of decimal digits kept on floats.
pub const DEFAULT_FLOAT_PRECISION: u32 = 5;

// f64 carries ~15 significant decimal digits.
const MAX_FLOAT_PRECISION: u32 = 15;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i32, max: i32) -> Result<i32, ProviderError> {
    if min > max {
        return Err(ProviderError::invalid_range(min, max));
    }
    Ok(rng.random_range(min..=max))
}

/// Generate a random 64-bit integer in the given range (inclusive).
pub fn generate_int64_range<R: Rng>(
    rng: &mut R,
    min: i64,
    max: i64,
) -> Result<i64, ProviderError> {
    if min > max {
        return Err(ProviderError::invalid_range(min, max));
    }
    Ok(rng.random_range(min..=max))
}

/// Generate a random float in the given range (inclusive), rounded to
/// `precision` decimal digits.
pub fn generate_float_range<R: Rng>(
    rng: &mut R,
    min: f64,
    max: f64,
    precision: u32,
) -> Result<f64, ProviderError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ProviderError::InvalidArgument(format!(
            "float bounds must be finite, got [{min}, {max}]"
        )));
    }
    if min > max {
        return Err(ProviderError::invalid_range(min, max));
    }

    // `max - min` overflows for far-apart bounds, so interpolate.
    let t: f64 = rng.random();
    let value = min * (1.0 - t) + max * t;
    // Rounding may step just outside the range.
    Ok(round_to(value, precision).clamp(min, max))
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_FLOAT_PRECISION) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // Too large to carry any decimals.
        return value;
    }
    scaled.round() / factor
}

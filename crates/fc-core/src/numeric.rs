use crate::FcError;

/// Floating point type used throughout system
pub type Real = f64;

/// Discrete simulation tick index, starting at zero.
pub type TimeStep = u64;

/// Reject negative or non-finite configuration values.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, FcError> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(FcError::InvalidConfiguration { what, value: v })
    }
}

/// Round to the nearest integer, halves to even (`2.5 -> 2`, `3.5 -> 4`).
pub fn round_half_even(v: Real) -> Real {
    v.round_ties_even()
}

/// Round `v` half-to-even and saturate into `[0, max]`.
///
/// NaN maps to zero, like any other input below the lower bound.
pub fn round_to_count(v: Real, max: u64) -> u64 {
    let rounded = round_half_even(v);
    if rounded.is_nan() || rounded <= 0.0 {
        return 0;
    }
    if rounded >= max as Real {
        return max;
    }
    rounded as u64
}

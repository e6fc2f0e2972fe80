//! Numeric helpers: per-cell coercion and rounding.

// =============================================================================
// Coercion
// =============================================================================

/// Coerce a raw text cell to an integer.
///
/// Returns `None` (missing) for anything that is not an integer literal or a
/// finite float with no fractional part. Never fails.
///
/// # Example
///
/// ```rust,ignore
/// use demographic_analyzer::numeric::coerce_integer;
///
/// assert_eq!(coerce_integer(" 39"), Some(39));
/// assert_eq!(coerce_integer("40.0"), Some(40));
/// assert_eq!(coerce_integer("?"), None);
/// ```
pub fn coerce_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Normalize a categorical cell: trimmed, empty means missing.
pub fn normalize_category(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// Rounding
// =============================================================================

#[inline]
fn scale(decimals: u32) -> f64 {
    10f64.powi(decimals as i32)
}

/// Round half to even on the value scaled by `10^decimals`.
///
/// Exact ties go to the even neighbour, so `35.25` becomes `35.2`.
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    let factor = scale(decimals);
    (value * factor).round_ties_even() / factor
}

/// Round half away from zero on the value scaled by `10^decimals`.
pub fn round_half_away_from_zero(value: f64, decimals: u32) -> f64 {
    let factor = scale(decimals);
    (value * factor).round() / factor
}

/// `part / whole * 100`, or `None` when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

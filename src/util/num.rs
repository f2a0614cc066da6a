/// Truncates a float toward zero to an `i64`.
///
/// Returns `None` for NaN; values beyond the `i64` range saturate at the
/// bounds.
///
/// # Example
/// ```
/// use datable::util::num::f64_to_i64;
///
/// assert_eq!(f64_to_i64(2.9), Some(2));
/// assert_eq!(f64_to_i64(-2.9), Some(-2));
/// assert_eq!(f64_to_i64(f64::NAN), None);
/// ```
#[must_use]
pub fn f64_to_i64(value: f64) -> Option<i64> {
    if value.is_nan() {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Floors a float to a 0-based index.
///
/// Returns `None` for NaN and negative values.
#[must_use]
pub fn index_from_f64(value: f64) -> Option<usize> {
    if value.is_nan() {
        return None;
    }
    let floored = value.floor();
    if floored < 0.0 {
        return None;
    }
    Some(floored as usize)
}

/// Floors a float to a 1-based position (row or column).
///
/// Returns `None` for NaN and anything below 1.
#[must_use]
pub fn index1_from_f64(value: f64) -> Option<usize> {
    if value.is_nan() {
        return None;
    }
    let floored = value.floor();
    if floored < 1.0 {
        return None;
    }
    Some(floored as usize)
}

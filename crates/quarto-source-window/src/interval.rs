/*
 * interval.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Small numeric helpers shared by the window algebra and the line reader.
//!
//! Offsets are plain `usize` values that are allowed to point past the end of
//! a buffer, so every helper here saturates instead of wrapping.

/// Returns `true` when `value` lies in `[low, high]`.
///
/// The bounds may be given in either order.
pub fn in_range_inclusive(value: usize, low: usize, high: usize) -> bool {
    let (low, high) = ordered_pair(low, high);
    low <= value && value <= high
}

/// Orders two unordered indices ascending.
pub fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Clamps `value` into `[low, high]`. Assumes `low <= high`.
pub fn clamp(value: usize, low: usize, high: usize) -> usize {
    value.max(low).min(high)
}

/// Number of decimal digits needed to print `n`.
pub fn decimal_width(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

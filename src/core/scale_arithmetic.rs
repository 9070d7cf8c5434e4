//! Floating point helpers shared by the linear and the calendar scale engines.

use std::cmp::Ordering;

/// Relative tolerance used when aligning and comparing scale values.
pub const SCALE_EPS: f64 = 1.0e-6;

/// Compares two values with a tolerance relative to `interval_size`.
#[must_use]
pub fn compare_eps(value1: f64, value2: f64, interval_size: f64) -> Ordering {
    let eps = (SCALE_EPS * interval_size).abs();
    if value2 - value1 > eps {
        Ordering::Less
    } else if value1 - value2 > eps {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Relative equality with 12 significant digits.
#[must_use]
pub fn fuzzy_eq(left: f64, right: f64) -> bool {
    (left - right).abs() * 1.0e12 <= left.abs().min(right.abs())
}

/// Rounds `value` up to a multiple of `interval_size`, ignoring overshoots
/// below the relative tolerance.
#[must_use]
pub fn ceil_eps(value: f64, interval_size: f64) -> f64 {
    let eps = SCALE_EPS * interval_size;
    ((value - eps) / interval_size).ceil() * interval_size
}

/// Rounds `value` down to a multiple of `interval_size`, ignoring undershoots
/// below the relative tolerance.
#[must_use]
pub fn floor_eps(value: f64, interval_size: f64) -> f64 {
    let eps = SCALE_EPS * interval_size;
    ((value + eps) / interval_size).floor() * interval_size
}

/// Divides an interval into steps, shrinking it by the relative tolerance first.
#[must_use]
pub fn divide_eps(interval_size: f64, num_steps: f64) -> f64 {
    if num_steps == 0.0 || interval_size == 0.0 {
        return 0.0;
    }
    (interval_size - SCALE_EPS * interval_size) / num_steps
}

/// Picks a "nice" step size (`n * base^p` with `n` one of `base`, `base/2`, ...)
/// that divides `interval_size` into at most `num_steps` steps.
///
/// Returns `0.0` for degenerate input.
#[must_use]
pub fn divide_interval(interval_size: f64, num_steps: i32, base: u32) -> f64 {
    if num_steps <= 0 || base < 2 || !interval_size.is_finite() {
        return 0.0;
    }

    let v = divide_eps(interval_size, f64::from(num_steps));
    if v == 0.0 {
        return 0.0;
    }

    let base_f = f64::from(base);
    let lx = v.abs().ln() / base_f.ln();
    let p = lx.floor();
    let fraction = base_f.powf(lx - p);

    let mut n = base;
    while n > 1 && fraction <= f64::from(n / 2) {
        n /= 2;
    }

    let step_size = f64::from(n) * base_f.powf(p);
    if v < 0.0 { -step_size } else { step_size }
}

//! Major and minor step selection per calendar granularity.
//!
//! Step sizes are expressed in units of the granularity (e.g. a month step
//! of 3 means quarterly ticks).

use crate::core::scale_arithmetic::{divide_interval, fuzzy_eq};
use crate::core::types::Granularity;

const SECOND_MINUTE_STEPS: [i64; 8] = [1, 2, 5, 10, 15, 20, 30, 60];
const HOUR_STEPS: [i64; 7] = [1, 2, 3, 4, 6, 12, 24];
const WEEK_STEPS: [i64; 7] = [1, 2, 4, 8, 12, 26, 52];
const MONTH_STEPS: [i64; 6] = [1, 2, 3, 4, 6, 12];

const HOUR_MINOR_STEPS: [i64; 9] = [1, 2, 3, 4, 6, 12, 24, 48, 72];
const DAY_MINOR_STEPS: [i64; 6] = [1, 2, 3, 7, 14, 28];

/// Major step for an interval `width` wide (in units of `granularity`).
///
/// Year and millisecond steps come from the base-10 divider; the other
/// granularities pick from fixed candidate tables.
#[must_use]
pub fn select_major_step(width: f64, granularity: Granularity, max_major_steps: i32) -> f64 {
    let num_steps = max_major_steps.max(1);
    let steps = f64::from(num_steps);

    if granularity != Granularity::Day && width > steps && width <= 2.0 * steps {
        return 2.0;
    }

    match granularity {
        Granularity::Second | Granularity::Minute => {
            step_from_candidates(width, steps, &SECOND_MINUTE_STEPS)
        }
        Granularity::Hour => step_from_candidates(width, steps, &HOUR_STEPS),
        Granularity::Day => {
            let v = width / steps;
            if v <= 5.0 {
                v.ceil()
            } else {
                (v / 7.0).ceil() * 7.0
            }
        }
        Granularity::Week => step_from_candidates(width, steps, &WEEK_STEPS),
        Granularity::Month => step_from_candidates(width, steps, &MONTH_STEPS),
        Granularity::Year | Granularity::Millisecond => divide_interval(width, num_steps, 10),
    }
}

/// Minor step for a given major step, `0.0` meaning no minor ticks.
///
/// Falls back to half the major step when no candidate divides it evenly,
/// except for months where fractional months are never used. A single-month
/// step always yields `0.0`: its minor ticks are placed on days of the month
/// instead, see [`month_day_minor_step`].
#[must_use]
pub fn select_minor_step(major_step: f64, max_minor_steps: i32, granularity: Granularity) -> f64 {
    if max_minor_steps <= 1 || !(major_step > 0.0) {
        return 0.0;
    }

    let max_minor = i64::from(max_minor_steps);
    let step = major_step as i64;
    let split = |num_steps: i64| {
        if num_steps > 0 {
            major_step / num_steps as f64
        } else {
            0.0
        }
    };

    let minor_step = match granularity {
        Granularity::Millisecond | Granularity::Second => {
            nice_divisor_step(major_step, max_minor_steps, 10)
        }
        Granularity::Minute => {
            if step > max_minor {
                split(step_count(step, max_minor, &SECOND_MINUTE_STEPS))
            } else {
                split(step_count(step * 60, max_minor, &SECOND_MINUTE_STEPS))
            }
        }
        Granularity::Hour => {
            if step > max_minor {
                split(step_count(step, max_minor, &HOUR_MINOR_STEPS))
            } else {
                split(step_count(step * 60, max_minor, &SECOND_MINUTE_STEPS))
            }
        }
        Granularity::Day => {
            if step > max_minor {
                split(step_count(step, max_minor, &DAY_MINOR_STEPS))
            } else {
                split(step_count(step * 24, max_minor, &HOUR_MINOR_STEPS))
            }
        }
        Granularity::Week => {
            let days_in_step = (major_step * 7.0) as i64;
            if max_minor >= days_in_step {
                1.0 / 7.0
            } else if step <= max_minor {
                1.0
            } else {
                divide_interval(step as f64, max_minor_steps, 10)
            }
        }
        Granularity::Month => {
            let budget = max_minor.min(step);
            split(step_count(step, budget, &MONTH_STEPS))
        }
        Granularity::Year => {
            if major_step >= f64::from(max_minor_steps) {
                divide_interval(major_step, max_minor_steps, 10)
            } else {
                split(step_count(step * 12, max_minor, &MONTH_STEPS))
            }
        }
    };

    if granularity != Granularity::Month && minor_step == 0.0 {
        0.5 * major_step
    } else {
        minor_step
    }
}

/// Day spacing of the minor ticks inside a single-month major step, `0`
/// when the minor budget allows no subdivision.
#[must_use]
pub fn month_day_minor_step(max_minor_steps: i32) -> i64 {
    match max_minor_steps {
        i32::MIN..=1 => 0,
        30.. => 1,
        6..=29 => 5,
        3..=5 => 10,
        _ => 15,
    }
}

/// Smallest candidate that covers `width / steps` (largest candidate otherwise).
fn step_from_candidates(width: f64, steps: f64, candidates: &[i64]) -> f64 {
    let v = (width / steps).ceil();
    candidates
        .iter()
        .copied()
        .find(|candidate| v <= *candidate as f64)
        .or_else(|| candidates.last().copied())
        .map_or(0.0, |candidate| candidate as f64)
}

/// Number of steps (`2..=max_steps`) that split `interval` into whole
/// multiples of one of the `candidates`, `0` when none fits.
fn step_count(interval: i64, max_steps: i64, candidates: &[i64]) -> i64 {
    candidates
        .iter()
        .map(|candidate| (interval / candidate, candidate))
        .find(|(num_steps, candidate)| {
            *num_steps > 1 && *num_steps <= max_steps && num_steps * **candidate == interval
        })
        .map_or(0, |(num_steps, _)| num_steps)
}

/// Largest step count whose step is a round `n * base^p` value.
fn nice_divisor_step(interval: f64, max_steps: i32, base: u32) -> f64 {
    if max_steps <= 2 {
        return 0.0;
    }

    let base_f = f64::from(base);
    for num_steps in (2..=max_steps).rev() {
        let step = interval / f64::from(num_steps);
        let p = (step.ln() / base_f.ln()).floor();
        let fraction = base_f.powf(p);

        let mut n = base;
        while n >= 1 {
            if fuzzy_eq(step, f64::from(n) * fraction) {
                return step;
            }
            n /= 2;
        }
    }
    0.0
}

use chrono::Weekday;

use crate::core::calendar::CalendarInstant;
use crate::core::types::Granularity;

/// Width of `[from, to]` in whole units of `granularity` (milliseconds and
/// seconds are exact).
///
/// Month and year widths count complete units only. Day and week widths count
/// calendar-date differences, so 23/25-hour days still count as one day.
/// Requires `from <= to`.
#[must_use]
pub fn interval_width(from: &CalendarInstant, to: &CalendarInstant, granularity: Granularity) -> f64 {
    match granularity {
        Granularity::Millisecond => to.to_time_value() - from.to_time_value(),
        Granularity::Second => elapsed_seconds(from, to),
        Granularity::Minute => (elapsed_seconds(from, to) / 60.0).floor(),
        Granularity::Hour => (elapsed_seconds(from, to) / 3_600.0).floor(),
        Granularity::Day => calendar_days(from, to),
        Granularity::Week => (calendar_days(from, to) / 7.0).floor(),
        Granularity::Month => {
            let years = f64::from(to.astronomical_year()) - f64::from(from.astronomical_year());
            let mut months = f64::from(to.month()) - f64::from(from.month());
            if to.day() < from.day() {
                months -= 1.0;
            }
            years * 12.0 + months
        }
        Granularity::Year => {
            let mut years = f64::from(to.astronomical_year()) - f64::from(from.astronomical_year());
            if to.month() < from.month() {
                years -= 1.0;
            }
            years
        }
    }
}

/// [`interval_width`] after flooring `from` and ceiling `to` to `granularity`,
/// so partial units at either end count as whole ones.
#[must_use]
pub fn rounded_interval_width(
    from: &CalendarInstant,
    to: &CalendarInstant,
    granularity: Granularity,
    week_start: Weekday,
) -> f64 {
    let floored = from.floor(granularity, week_start);
    let ceiled = to.ceil(granularity, week_start);
    interval_width(&floored, &ceiled, granularity)
}

fn elapsed_seconds(from: &CalendarInstant, to: &CalendarInstant) -> f64 {
    ((to.to_time_value() - from.to_time_value()) / 1_000.0).trunc()
}

fn calendar_days(from: &CalendarInstant, to: &CalendarInstant) -> f64 {
    (to.local().date() - from.local().date()).num_days() as f64
}

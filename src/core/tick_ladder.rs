//! Calendar walks producing major/medium/minor tick values.

use chrono::{NaiveTime, Weekday};
use tracing::trace;

use crate::core::calendar::{
    CalendarInstant, MAX_ASTRONOMICAL_YEAR, Week0Type, date_of_week0,
};
use crate::core::step_size::month_day_minor_step;
use crate::core::tick_table::TickTable;
use crate::core::types::{Granularity, StepPlan};
use crate::error::{ScaleError, ScaleResult};

/// Upper bound on major steps walked by one ladder.
pub const MAX_LADDER_STEPS: usize = 10_000;

const MILLIS_PER_HOUR_I64: i64 = 3_600_000;

fn align_value(value: f64, step: f64, up: bool) -> i64 {
    let d = value / step;
    let d = if up { d.ceil() } else { d.floor() };
    (d * step) as i64
}

/// Aligns `instant` to a multiple of `step` units within the enclosing
/// coarser unit: seconds within the minute, hours within the day, days
/// within the year, weeks since week 0, months within the year, years since
/// year 1. A year aligned onto 0 becomes -1 (down) or 1 (up).
pub fn align_date(
    instant: &CalendarInstant,
    step: f64,
    granularity: Granularity,
    up: bool,
    week_start: Weekday,
    week0: Week0Type,
) -> ScaleResult<CalendarInstant> {
    let step = if step > 0.0 { step } else { 1.0 };
    let millisecond = instant.millisecond();
    let second = instant.second();
    let minute = instant.minute();

    match granularity {
        Granularity::Millisecond => {
            let ms = align_value(f64::from(millisecond), step, up);
            instant
                .try_floor(Granularity::Second, week_start)?
                .add_milliseconds(ms)
        }
        Granularity::Second => {
            let mut value = second;
            if up && millisecond > 0 {
                value += 1;
            }
            let s = align_value(f64::from(value), step, up);
            instant
                .try_floor(Granularity::Minute, week_start)?
                .add_seconds(s)
        }
        Granularity::Minute => {
            let mut value = minute;
            if up && (millisecond > 0 || second > 0) {
                value += 1;
            }
            let m = align_value(f64::from(value), step, up);
            instant
                .try_floor(Granularity::Hour, week_start)?
                .add_seconds(m * 60)
        }
        Granularity::Hour => {
            let mut value = instant.hour();
            if up && (millisecond > 0 || second > 0 || minute > 0) {
                value += 1;
            }
            let h = align_value(f64::from(value), step, up);
            instant
                .try_floor(Granularity::Day, week_start)?
                .add_seconds(h * 3_600)
        }
        Granularity::Day => {
            let mut value = instant.day_of_year();
            if up && !instant.is_midnight() {
                value += 1;
            }
            let d = align_value(f64::from(value), step, up);
            instant
                .try_floor(Granularity::Year, week_start)?
                .add_days(d - 1)
        }
        Granularity::Week => {
            let date0 = date_of_week0(instant.year(), week0, week_start)?;
            let days = (instant.local().date() - date0).num_days();
            let mut weeks = days.div_euclid(7);
            if up && (!instant.is_midnight() || days.rem_euclid(7) != 0) {
                weeks += 1;
            }
            let d = align_value(weeks as f64, step, up) * 7;
            CalendarInstant::from_local(date0.and_time(NaiveTime::MIN), instant.basis())?
                .add_days(d)
        }
        Granularity::Month => {
            let mut value = instant.month();
            if up && (instant.day() > 1 || !instant.is_midnight()) {
                value += 1;
            }
            let m = align_value(f64::from(value - 1), step, up);
            instant
                .try_floor(Granularity::Year, week_start)?
                .add_months(m)
        }
        Granularity::Year => {
            let mut value = i64::from(instant.year());
            if up && (instant.day_of_year() > 1 || !instant.is_midnight()) {
                value += 1;
            }
            let mut y = align_value(value as f64, step, up);
            if y == 0 {
                y = if up { 1 } else { -1 };
            }
            let year = i32::try_from(y).map_err(|_| {
                ScaleError::DateOutOfRange(format!("year {y}"))
            })?;
            CalendarInstant::from_date(year, 1, 1, instant.basis())
        }
    }
}

/// Builds the tick ladder for one [`StepPlan`] between an aligned start and an end instant.
///
/// Up to `Week` the walk advances by elapsed time, shifting ticks by the UTC
/// offset change when the plan asks for daylight-saving correction. Months and
/// years are walked with calendar arithmetic. The result is not clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickLadderBuilder {
    plan: StepPlan,
    max_minor_steps: i32,
}

impl TickLadderBuilder {
    #[must_use]
    pub fn new(plan: StepPlan, max_minor_steps: i32) -> Self {
        Self {
            plan,
            max_minor_steps: max_minor_steps.max(0),
        }
    }

    #[must_use]
    pub fn plan(&self) -> StepPlan {
        self.plan
    }

    #[must_use]
    pub fn build(&self, start: &CalendarInstant, end: &CalendarInstant) -> TickTable {
        let mut table = match self.plan.granularity {
            Granularity::Month => self.build_months(start, end),
            Granularity::Year => self.build_years(start, end),
            _ => self.build_equidistant(start, end),
        };
        table.normalize();
        trace!(
            granularity = ?self.plan.granularity,
            major = table.major().len(),
            medium = table.medium().len(),
            minor = table.minor().len(),
            "built tick ladder"
        );
        table
    }

    fn build_equidistant(&self, start: &CalendarInstant, end: &CalendarInstant) -> TickTable {
        let unit_millis = self.plan.granularity.millis();
        let major_millis = (self.plan.major_step.abs() * unit_millis).round() as i64;
        let minor_millis = self.plan.minor_step.abs() * unit_millis;
        let dst = self.plan.daylight_saving_correction;

        let mut major = Vec::new();
        let mut medium = Vec::new();
        let mut minor = Vec::new();
        if major_millis <= 0 {
            return TickTable::new(start.to_time_value(), end.to_time_value());
        }

        let end_value = end.to_time_value();
        let offset0 = start.utc_offset_seconds();
        let mut dst_offset = 0;
        let mut dt = *start;
        for _ in 0..MAX_LADDER_STEPS {
            let offset = if dst { offset0 - dt.utc_offset_seconds() } else { 0 };
            let major_value = dt.to_time_value() + offset as f64 * 1_000.0;
            if major_value > end_value {
                break;
            }

            if offset > dst_offset {
                // the repeated hour gets its own minor ticks, otherwise they end up unaligned
                minor.extend(dst_hour_ticks(&dt, major_millis, minor_millis.round() as i64));
            }
            dst_offset = offset;
            if major.last() != Some(&major_value) {
                major.push(major_value);
            }

            if minor_millis > 0.0 {
                let num_minor = (major_millis as f64 / minor_millis).floor() as i64;
                for i in 1..num_minor {
                    let Ok(tick) = dt.add_milliseconds((i as f64 * minor_millis).round() as i64)
                    else {
                        break;
                    };
                    let mut minor_value = tick.to_time_value();
                    if dst {
                        minor_value += (offset0 - tick.utc_offset_seconds()) as f64 * 1_000.0;
                    }
                    let is_medium = num_minor % 2 == 0 && i != 1 && i == num_minor / 2;
                    if is_medium {
                        medium.push(minor_value);
                    } else {
                        minor.push(minor_value);
                    }
                }
            }

            match dt.add_milliseconds(major_millis) {
                Ok(next) => dt = next,
                Err(err) => {
                    trace!(error = %err, "tick ladder truncated at representable range");
                    break;
                }
            }
        }

        TickTable::with_ticks(start.to_time_value(), end.to_time_value(), major, medium, minor)
    }

    fn build_months(&self, start: &CalendarInstant, end: &CalendarInstant) -> TickTable {
        let step = self.plan.major_step.abs().round().max(1.0) as i64;
        let mut minor_step_days = 0;
        let mut minor_step_months = 0.0;
        if self.max_minor_steps > 1 {
            if step == 1 {
                minor_step_days = month_day_minor_step(self.max_minor_steps);
            } else {
                minor_step_months = self.plan.minor_step.abs();
            }
        }

        let mut major = Vec::new();
        let mut medium = Vec::new();
        let mut minor = Vec::new();

        for k in 0..MAX_LADDER_STEPS as i64 {
            let dt = match start.add_months(k * step) {
                Ok(dt) => dt,
                Err(err) => {
                    trace!(error = %err, "month ladder truncated at representable range");
                    break;
                }
            };
            if dt > *end {
                break;
            }
            major.push(dt.to_time_value());

            if minor_step_days > 0 {
                let next_major = start.add_months((k + 1) * step).ok();
                let mut days = minor_step_days;
                while days < 30 {
                    let Ok(tick) = dt.add_days(days) else {
                        break;
                    };
                    if next_major.is_some_and(|next| tick >= next) {
                        break;
                    }
                    if days == 15 && minor_step_days != 15 {
                        medium.push(tick.to_time_value());
                    } else {
                        minor.push(tick.to_time_value());
                    }
                    days += minor_step_days;
                }
            } else if minor_step_months > 0.0 {
                let num_minor = (step as f64 / minor_step_months).round() as i64;
                for i in 1..num_minor {
                    let months = (i as f64 * minor_step_months).round() as i64;
                    let Ok(tick) = dt.add_months(months) else {
                        break;
                    };
                    let is_medium = num_minor % 2 == 0 && i != 1 && i == num_minor / 2;
                    if is_medium {
                        medium.push(tick.to_time_value());
                    } else {
                        minor.push(tick.to_time_value());
                    }
                }
            }
        }

        TickTable::with_ticks(start.to_time_value(), end.to_time_value(), major, medium, minor)
    }

    fn build_years(&self, start: &CalendarInstant, end: &CalendarInstant) -> TickTable {
        let step = self.plan.major_step.abs().round().max(1.0) as i64;
        let minor_step = self.plan.minor_step.abs();
        let num_minor = if minor_step > 0.0 {
            (step as f64 / minor_step).floor() as i64
        } else {
            0
        };

        let mut major: Vec<f64> = Vec::new();
        let mut medium = Vec::new();
        let mut minor = Vec::new();

        let first_year = i64::from(start.year());
        for k in 0..MAX_LADDER_STEPS as i64 {
            // nominal years count through 0, the ticks do not
            let nominal = first_year + k * step;
            let year = if nominal == 0 { 1 } else { nominal };
            let dt = match i32::try_from(year)
                .map_err(|_| ScaleError::DateOutOfRange(format!("year {year}")))
                .and_then(|year| start.with_year(year))
            {
                Ok(dt) => dt,
                Err(err) => {
                    trace!(error = %err, "year ladder truncated at representable range");
                    break;
                }
            };
            if dt > *end {
                break;
            }

            let major_value = dt.to_time_value();
            if major.last() == Some(&major_value) {
                continue;
            }
            major.push(major_value);

            for i in 1..num_minor {
                let years = i as f64 * minor_step;
                let tick = if years.round() >= f64::from(i32::MAX / 12) {
                    dt.add_years(years.round() as i64)
                } else {
                    dt.add_months((years * 12.0).round() as i64)
                };
                let Ok(tick) = tick else {
                    break;
                };
                let is_medium = num_minor > 2 && num_minor % 2 == 0 && i == num_minor / 2;
                if is_medium {
                    medium.push(tick.to_time_value());
                } else {
                    minor.push(tick.to_time_value());
                }
            }

            if i64::from(dt.astronomical_year()) + step > i64::from(MAX_ASTRONOMICAL_YEAR) {
                break;
            }
        }

        TickTable::with_ticks(start.to_time_value(), end.to_time_value(), major, medium, minor)
    }
}

/// Minor ticks for the hour preceding `dt` once the UTC offset has grown.
fn dst_hour_ticks(dt: &CalendarInstant, major_millis: i64, minor_millis: i64) -> Vec<f64> {
    if minor_millis < 1_000 {
        return Vec::new();
    }
    let Ok(before) = dt.add_milliseconds(-major_millis) else {
        return Vec::new();
    };

    let utc_offset = dt.utc_offset_seconds();
    let mut hour = before.floor(Granularity::Hour, Weekday::Mon);
    let mut dst_min = hour.to_time_value();
    while hour < *dt && hour.utc_offset_seconds() != utc_offset {
        match hour.add_milliseconds(MILLIS_PER_HOUR_I64) {
            Ok(next) => hour = next,
            Err(_) => break,
        }
        dst_min += MILLIS_PER_HOUR_I64 as f64;
    }

    (0..MILLIS_PER_HOUR_I64)
        .step_by(minor_millis as usize)
        .map(|millis| dst_min + millis as f64)
        .collect()
}

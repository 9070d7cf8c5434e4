use chrono::Weekday;

use crate::core::calendar::{CalendarInstant, TimeBasis};
use crate::core::calendar_width::rounded_interval_width;
use crate::core::types::{Granularity, MILLIS_PER_YEAR};
use crate::error::ScaleResult;

pub const DEFAULT_MAX_WEEKS: i32 = 4;

/// Picks the coarsest calendar granularity whose whole units still give
/// round step sizes for a tick budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalClassifier {
    max_weeks: i32,
    week_start: Weekday,
}

impl Default for IntervalClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WEEKS, Weekday::Mon)
    }
}

impl IntervalClassifier {
    #[must_use]
    pub fn new(max_weeks: i32, week_start: Weekday) -> Self {
        Self {
            max_weeks: max_weeks.max(0),
            week_start,
        }
    }

    #[must_use]
    pub fn max_weeks(self) -> i32 {
        self.max_weeks
    }

    #[must_use]
    pub fn week_start(self) -> Weekday {
        self.week_start
    }

    /// Classifies `[min, max]` given as time values.
    ///
    /// Intervals wider than `max_major_steps` nominal years are classified as
    /// `Year` before any calendar conversion happens.
    pub fn classify(
        self,
        min: f64,
        max: f64,
        max_major_steps: i32,
        basis: TimeBasis,
    ) -> ScaleResult<Granularity> {
        let max_major_steps = max_major_steps.max(1);
        let (min, max) = (min.min(max), min.max(max));
        if (max - min) / MILLIS_PER_YEAR > f64::from(max_major_steps) {
            return Ok(Granularity::Year);
        }

        let from = CalendarInstant::from_time_value(min, basis)?;
        let to = CalendarInstant::from_time_value(max, basis)?;
        Ok(self.classify_instants(&from, &to, max_major_steps))
    }

    /// Classifies `[from, to]`; requires `from <= to`.
    #[must_use]
    pub fn classify_instants(
        self,
        from: &CalendarInstant,
        to: &CalendarInstant,
        max_major_steps: i32,
    ) -> Granularity {
        let steps = f64::from(max_major_steps.max(1));
        if (to.to_time_value() - from.to_time_value()) / MILLIS_PER_YEAR > steps {
            return Granularity::Year;
        }

        let width = |granularity| rounded_interval_width(from, to, granularity, self.week_start);

        let months = width(Granularity::Month);
        if months > steps * 6.0 {
            return Granularity::Year;
        }

        let days = width(Granularity::Day);
        let weeks = width(Granularity::Week);
        if weeks > f64::from(self.max_weeks) && days > 4.0 * steps * 7.0 {
            return Granularity::Month;
        }

        if days > steps * 7.0 {
            return Granularity::Week;
        }

        let hours = width(Granularity::Hour);
        if hours > steps * 24.0 {
            return Granularity::Day;
        }

        let seconds = width(Granularity::Second);
        if seconds >= steps * 3_600.0 {
            Granularity::Hour
        } else if seconds >= steps * 60.0 {
            Granularity::Minute
        } else if seconds >= steps {
            Granularity::Second
        } else {
            Granularity::Millisecond
        }
    }
}

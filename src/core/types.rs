use serde::{Deserialize, Serialize};

pub const MILLIS_PER_SECOND: f64 = 1_000.0;
pub const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: f64 = 7.0 * MILLIS_PER_DAY;
pub const MILLIS_PER_MONTH: f64 = 30.0 * MILLIS_PER_DAY;
pub const MILLIS_PER_YEAR: f64 = 365.0 * MILLIS_PER_DAY;

/// Calendar unit used for labeling an axis interval.
///
/// The declaration order is the coarseness order: classification and step
/// division branch on comparisons between variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Granularity {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 8] = [
        Granularity::Millisecond,
        Granularity::Second,
        Granularity::Minute,
        Granularity::Hour,
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    /// Nominal length of one unit in milliseconds.
    ///
    /// Month and year are approximations (30 and 365 days); only the
    /// granularities up to `Week` are equidistant.
    #[must_use]
    pub fn millis(self) -> f64 {
        match self {
            Self::Millisecond => 1.0,
            Self::Second => MILLIS_PER_SECOND,
            Self::Minute => MILLIS_PER_MINUTE,
            Self::Hour => MILLIS_PER_HOUR,
            Self::Day => MILLIS_PER_DAY,
            Self::Week => MILLIS_PER_WEEK,
            Self::Month => MILLIS_PER_MONTH,
            Self::Year => MILLIS_PER_YEAR,
        }
    }

    #[must_use]
    pub fn is_equidistant(self) -> bool {
        self <= Self::Week
    }

    /// Next finer granularity, `None` for `Millisecond`.
    #[must_use]
    pub fn finer(self) -> Option<Self> {
        match self {
            Self::Millisecond => None,
            Self::Second => Some(Self::Millisecond),
            Self::Minute => Some(Self::Second),
            Self::Hour => Some(Self::Minute),
            Self::Day => Some(Self::Hour),
            Self::Week => Some(Self::Day),
            Self::Month => Some(Self::Week),
            Self::Year => Some(Self::Month),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickType {
    Minor,
    Medium,
    Major,
}

/// Step sizes chosen for one scale division.
///
/// `major_step` and `minor_step` are expressed in units of `granularity`;
/// a `minor_step` of `0.0` means no evenly spaced minor ticks. Single-month
/// steps report `0.0` even when the ladder adds day-of-month minor ticks
/// (see [`crate::core::step_size::month_day_minor_step`]). The major step is
/// negated when the division was requested for a descending interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepPlan {
    pub granularity: Granularity,
    pub major_step: f64,
    pub minor_step: f64,
    pub daylight_saving_correction: bool,
}

impl StepPlan {
    #[must_use]
    pub fn new(granularity: Granularity, major_step: f64, minor_step: f64) -> Self {
        Self {
            granularity,
            major_step,
            minor_step,
            daylight_saving_correction: needs_daylight_saving_correction(granularity, major_step),
        }
    }

    /// Major step converted to (nominal) milliseconds, sign preserved.
    #[must_use]
    pub fn major_step_millis(self) -> f64 {
        self.major_step * self.granularity.millis()
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.major_step = -self.major_step;
        self
    }
}

/// Hour ladders are corrected only for multi-hour steps, day and week
/// ladders always. Month and year ladders use wall-clock arithmetic and
/// finer ones elapsed time, so neither is corrected.
#[must_use]
pub fn needs_daylight_saving_correction(granularity: Granularity, major_step: f64) -> bool {
    match granularity {
        Granularity::Hour => major_step.abs() > 1.0,
        Granularity::Day | Granularity::Week => true,
        Granularity::Millisecond
        | Granularity::Second
        | Granularity::Minute
        | Granularity::Month
        | Granularity::Year => false,
    }
}

/// Axis bounds and step size produced by an autoscale pass.
///
/// When the engine is configured as inverted, `x1 > x2` and `step_size` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoScale {
    pub x1: f64,
    pub x2: f64,
    pub step_size: f64,
}

//! Calendar arithmetic on top of `chrono`.
//!
//! Time values are `f64` milliseconds since 1970-01-01T00:00:00Z. A
//! [`CalendarInstant`] pairs such an absolute instant with its wall-clock
//! reading in a [`TimeBasis`]. Years are exposed in historical numbering
//! (there is no year 0: year -1 is followed by year 1) while chrono's
//! astronomical years are used internally, so unit arithmetic never lands
//! on year 0.

use std::cmp::Ordering;

use chrono::{
    Datelike, Days, FixedOffset, Local, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeDelta, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{Granularity, MILLIS_PER_DAY};
use crate::error::{ScaleError, ScaleResult};

pub const MIN_ASTRONOMICAL_YEAR: i32 = -262_000;
pub const MAX_ASTRONOMICAL_YEAR: i32 = 262_000;

const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;
const MILLIS_PER_DAY_I64: i64 = 86_400_000;

/// Time basis used to read wall-clock fields from absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeBasis {
    #[default]
    Utc,
    FixedOffset {
        seconds: i32,
    },
    /// Host time zone, daylight saving included.
    Local,
    /// IANA time zone, daylight saving included.
    Zone(Tz),
}

impl TimeBasis {
    /// `true` when the UTC offset cannot change between instants.
    #[must_use]
    pub fn has_fixed_offset(self) -> bool {
        matches!(self, Self::Utc | Self::FixedOffset { .. })
    }

    #[must_use]
    pub fn offset_from_utc(self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Self::Utc => Utc.fix(),
            Self::FixedOffset { seconds } => fixed_offset(seconds),
            Self::Local => Local.offset_from_utc_datetime(utc),
            Self::Zone(tz) => tz.offset_from_utc_datetime(utc).fix(),
        }
    }

    /// Offset for a wall-clock reading.
    ///
    /// Ambiguous readings resolve to the earlier instant; readings inside a
    /// spring-forward gap use the offset in effect before the gap, which moves
    /// them forward past the gap.
    #[must_use]
    pub fn offset_from_local(self, local: &NaiveDateTime) -> FixedOffset {
        match self {
            Self::Utc => Utc.fix(),
            Self::FixedOffset { seconds } => fixed_offset(seconds),
            Self::Local => resolve_local_offset(&Local, local),
            Self::Zone(tz) => resolve_local_offset(&tz, local),
        }
    }
}

fn fixed_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

fn resolve_local_offset<Z: TimeZone>(zone: &Z, local: &NaiveDateTime) -> FixedOffset {
    match zone.offset_from_local_datetime(local) {
        LocalResult::Single(offset) => offset.fix(),
        LocalResult::Ambiguous(earliest, _) => earliest.fix(),
        LocalResult::None => {
            let before_gap = local
                .checked_sub_signed(TimeDelta::days(1))
                .unwrap_or(*local);
            zone.offset_from_utc_datetime(&before_gap).fix()
        }
    }
}

/// Rule selecting the first week of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Week0Type {
    /// ISO 8601: the first week contains the first Thursday of the year.
    #[default]
    FirstThursday,
    /// The first week contains January 1st.
    FirstDay,
}

#[must_use]
pub fn historical_year(astronomical: i32) -> i32 {
    if astronomical <= 0 {
        astronomical - 1
    } else {
        astronomical
    }
}

pub fn astronomical_year(historical: i32) -> ScaleResult<i32> {
    match historical {
        0 => Err(ScaleError::NoYearZero),
        year if year < 0 => Ok(year + 1),
        year => Ok(year),
    }
}

#[must_use]
pub fn min_date() -> NaiveDate {
    NaiveDate::from_yo_opt(MIN_ASTRONOMICAL_YEAR, 1).unwrap_or(NaiveDate::MIN)
}

#[must_use]
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(MAX_ASTRONOMICAL_YEAR, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Smallest representable time value (midnight of [`min_date`], UTC).
#[must_use]
pub fn min_time_value() -> f64 {
    days_since_epoch(min_date()) as f64 * MILLIS_PER_DAY
}

/// Largest representable time value (last millisecond of [`max_date`], UTC).
#[must_use]
pub fn max_time_value() -> f64 {
    (days_since_epoch(max_date()) + 1) as f64 * MILLIS_PER_DAY - 1.0
}

fn days_since_epoch(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

/// Days to step back from `weekday` to reach the preceding `week_start`.
#[must_use]
pub fn days_since_week_start(weekday: Weekday, week_start: Weekday) -> u64 {
    let days = (7 + weekday.num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    u64::from(days)
}

/// First day of week 0 of a (historical) year.
pub fn date_of_week0(year: i32, week0: Week0Type, week_start: Weekday) -> ScaleResult<NaiveDate> {
    let astronomical = astronomical_year(year)?;
    let jan1 = NaiveDate::from_ymd_opt(astronomical, 1, 1)
        .ok_or_else(|| ScaleError::DateOutOfRange(format!("January 1st of year {year}")))?;

    let back = days_since_week_start(jan1.weekday(), week_start);
    let mut date0 = jan1
        .checked_sub_days(Days::new(back))
        .ok_or_else(|| ScaleError::DateOutOfRange(format!("week 0 of year {year}")))?;

    if week0 == Week0Type::FirstThursday {
        let to_thursday = days_since_week_start(Weekday::Thu, week_start);
        let thursday = date0 + Days::new(to_thursday);
        if thursday.year() < astronomical {
            date0 = date0 + Days::new(7);
        }
    }

    Ok(date0)
}

/// An absolute instant together with its wall-clock reading in a time basis.
///
/// Equality and ordering compare the absolute instant only.
#[derive(Debug, Clone, Copy)]
pub struct CalendarInstant {
    utc: NaiveDateTime,
    local: NaiveDateTime,
    basis: TimeBasis,
}

impl PartialEq for CalendarInstant {
    fn eq(&self, other: &Self) -> bool {
        self.utc == other.utc
    }
}

impl Eq for CalendarInstant {}

impl PartialOrd for CalendarInstant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarInstant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc.cmp(&other.utc)
    }
}

impl CalendarInstant {
    /// Converts a time value, truncating sub-millisecond fractions.
    pub fn from_time_value(value: f64, basis: TimeBasis) -> ScaleResult<Self> {
        if !value.is_finite() {
            return Err(ScaleError::InvalidInterval(format!(
                "time value must be finite, got {value}"
            )));
        }
        if value < min_time_value() || value > max_time_value() {
            return Err(ScaleError::DateOutOfRange(format!("time value {value}")));
        }

        let millis = value.floor() as i64;
        let days = millis.div_euclid(MILLIS_PER_DAY_I64);
        let millis_of_day = millis.rem_euclid(MILLIS_PER_DAY_I64);

        let date = i32::try_from(days + UNIX_EPOCH_DAYS_FROM_CE)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("time value {value}")))?;
        let utc = date
            .and_time(NaiveTime::MIN)
            .checked_add_signed(TimeDelta::milliseconds(millis_of_day))
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("time value {value}")))?;

        Self::from_utc(utc, basis)
    }

    /// Like [`Self::from_time_value`], but clamps finite and infinite values to
    /// the representable range. Only NaN is rejected.
    pub fn from_time_value_clamped(value: f64, basis: TimeBasis) -> ScaleResult<Self> {
        if value.is_nan() {
            return Err(ScaleError::InvalidInterval(
                "time value must not be NaN".to_owned(),
            ));
        }
        Self::from_time_value(value.clamp(min_time_value(), max_time_value()), basis)
    }

    /// Builds an instant from wall-clock fields; `year` uses historical numbering.
    #[allow(clippy::too_many_arguments)]
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
        basis: TimeBasis,
    ) -> ScaleResult<Self> {
        let astronomical = astronomical_year(year)?;
        let date = NaiveDate::from_ymd_opt(astronomical, month, day).ok_or_else(|| {
            ScaleError::InvalidDate(format!("{year:04}-{month:02}-{day:02}"))
        })?;
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond)
            .ok_or_else(|| {
                ScaleError::InvalidDate(format!(
                    "{hour:02}:{minute:02}:{second:02}.{millisecond:03}"
                ))
            })?;
        Self::from_local(date.and_time(time), basis)
    }

    /// Midnight of a (historical) calendar date.
    pub fn from_date(year: i32, month: u32, day: u32, basis: TimeBasis) -> ScaleResult<Self> {
        Self::from_calendar(year, month, day, 0, 0, 0, 0, basis)
    }

    pub fn from_utc(utc: NaiveDateTime, basis: TimeBasis) -> ScaleResult<Self> {
        let date = utc.date();
        if date < min_date() || date > max_date() {
            return Err(ScaleError::DateOutOfRange(format!("{utc} UTC")));
        }

        let offset = basis.offset_from_utc(&utc);
        let local = utc
            .checked_add_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("{utc} UTC")))?;

        Ok(Self { utc, local, basis })
    }

    pub fn from_local(local: NaiveDateTime, basis: TimeBasis) -> ScaleResult<Self> {
        let offset = basis.offset_from_local(&local);
        let utc = local
            .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("{local} local")))?;
        Self::from_utc(utc, basis)
    }

    /// Earliest representable instant; used when flooring underflows.
    #[must_use]
    pub fn clamped_min(basis: TimeBasis) -> Self {
        Self::unchecked(min_date().and_time(NaiveTime::MIN), basis)
    }

    /// Latest representable instant; used when ceiling overflows.
    #[must_use]
    pub fn clamped_max(basis: TimeBasis) -> Self {
        let utc = max_date()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or_else(|| max_date().and_time(NaiveTime::MIN));
        Self::unchecked(utc, basis)
    }

    fn unchecked(utc: NaiveDateTime, basis: TimeBasis) -> Self {
        let offset = basis.offset_from_utc(&utc);
        let local = utc
            .checked_add_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .unwrap_or(utc);
        Self { utc, local, basis }
    }

    #[must_use]
    pub fn to_time_value(&self) -> f64 {
        self.utc.and_utc().timestamp_millis() as f64
    }

    #[must_use]
    pub fn basis(&self) -> TimeBasis {
        self.basis
    }

    /// Wall-clock reading in the instant's basis.
    #[must_use]
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    #[must_use]
    pub fn utc(&self) -> NaiveDateTime {
        self.utc
    }

    /// Historical year (never 0).
    #[must_use]
    pub fn year(&self) -> i32 {
        historical_year(self.local.year())
    }

    #[must_use]
    pub fn astronomical_year(&self) -> i32 {
        self.local.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.local.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.local.day()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    #[must_use]
    pub fn second(&self) -> u32 {
        self.local.second()
    }

    #[must_use]
    pub fn millisecond(&self) -> u32 {
        (self.local.nanosecond() / 1_000_000).min(999)
    }

    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.local.weekday()
    }

    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        self.local.ordinal()
    }

    /// `true` when the wall-clock time of day is exactly 00:00:00.000.
    #[must_use]
    pub fn is_midnight(&self) -> bool {
        self.local.time() == NaiveTime::MIN
    }

    #[must_use]
    pub fn utc_offset_seconds(&self) -> i64 {
        (self.local - self.utc).num_seconds()
    }

    /// Elapsed-time addition.
    pub fn add_milliseconds(&self, millis: i64) -> ScaleResult<Self> {
        let delta = TimeDelta::try_milliseconds(millis)
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("{millis} ms offset")))?;
        let utc = self
            .utc
            .checked_add_signed(delta)
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("{} + {millis} ms", self.utc)))?;
        Self::from_utc(utc, self.basis)
    }

    /// Elapsed-time addition.
    pub fn add_seconds(&self, seconds: i64) -> ScaleResult<Self> {
        let millis = seconds
            .checked_mul(1_000)
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("{seconds} s offset")))?;
        self.add_milliseconds(millis)
    }

    /// Wall-clock addition of calendar days, keeping the time of day.
    pub fn add_days(&self, days: i64) -> ScaleResult<Self> {
        let delta = TimeDelta::try_days(days)
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("{days} days offset")))?;
        let local = self
            .local
            .checked_add_signed(delta)
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("{} + {days} days", self.local)))?;
        Self::from_local(local, self.basis)
    }

    /// Wall-clock addition of months; the day is clamped to the target month length.
    pub fn add_months(&self, months: i64) -> ScaleResult<Self> {
        let out_of_range =
            || ScaleError::DateOutOfRange(format!("{} + {months} months", self.local));
        let magnitude = u32::try_from(months.unsigned_abs()).map_err(|_| out_of_range())?;
        let local = if months >= 0 {
            self.local.checked_add_months(Months::new(magnitude))
        } else {
            self.local.checked_sub_months(Months::new(magnitude))
        }
        .ok_or_else(out_of_range)?;
        Self::from_local(local, self.basis)
    }

    /// Adds elapsed calendar years (February 29th clamps to the 28th).
    pub fn add_years(&self, years: i64) -> ScaleResult<Self> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| ScaleError::DateOutOfRange(format!("{years} years offset")))?;
        self.add_months(months)
    }

    /// Replaces the (historical) year, keeping month, day and time of day.
    pub fn with_year(&self, year: i32) -> ScaleResult<Self> {
        let astronomical = astronomical_year(year)?;
        let month = self.local.month();
        let mut day = self.local.day();
        let date = loop {
            if let Some(date) = NaiveDate::from_ymd_opt(astronomical, month, day) {
                break date;
            }
            if day <= 28 {
                return Err(ScaleError::DateOutOfRange(format!("year {year}")));
            }
            day -= 1;
        };
        Self::from_local(date.and_time(self.local.time()), self.basis)
    }

    /// Truncates to the start of the enclosing `granularity` unit; clamps to
    /// the representable minimum on underflow.
    #[must_use]
    pub fn floor(&self, granularity: Granularity, week_start: Weekday) -> Self {
        self.try_floor(granularity, week_start).unwrap_or_else(|err| {
            debug!(error = %err, ?granularity, "floor underflow, clamping to minimum date");
            Self::clamped_min(self.basis)
        })
    }

    /// Rounds up to the next `granularity` boundary (identity on a boundary);
    /// clamps to the representable maximum on overflow.
    #[must_use]
    pub fn ceil(&self, granularity: Granularity, week_start: Weekday) -> Self {
        self.try_ceil(granularity, week_start).unwrap_or_else(|err| {
            debug!(error = %err, ?granularity, "ceil overflow, clamping to maximum date");
            Self::clamped_max(self.basis)
        })
    }

    pub fn try_floor(&self, granularity: Granularity, week_start: Weekday) -> ScaleResult<Self> {
        let local = self.local;
        let millis_of_second = i64::from(self.millisecond());
        match granularity {
            Granularity::Millisecond => Ok(*self),
            Granularity::Second => self.add_milliseconds(-millis_of_second),
            Granularity::Minute => {
                self.add_milliseconds(-(millis_of_second + i64::from(local.second()) * 1_000))
            }
            Granularity::Hour => self.add_milliseconds(
                -(millis_of_second
                    + i64::from(local.second()) * 1_000
                    + i64::from(local.minute()) * 60_000),
            ),
            Granularity::Day => Self::from_local(local.date().and_time(NaiveTime::MIN), self.basis),
            Granularity::Week => {
                let back = days_since_week_start(local.weekday(), week_start);
                let date = local.date().checked_sub_days(Days::new(back)).ok_or_else(|| {
                    ScaleError::DateOutOfRange(format!("week start before {local}"))
                })?;
                Self::from_local(date.and_time(NaiveTime::MIN), self.basis)
            }
            Granularity::Month => {
                let date = local.date().with_day(1).ok_or_else(|| {
                    ScaleError::DateOutOfRange(format!("month start of {local}"))
                })?;
                Self::from_local(date.and_time(NaiveTime::MIN), self.basis)
            }
            Granularity::Year => {
                let date = NaiveDate::from_ymd_opt(local.year(), 1, 1).ok_or_else(|| {
                    ScaleError::DateOutOfRange(format!("year start of {local}"))
                })?;
                Self::from_local(date.and_time(NaiveTime::MIN), self.basis)
            }
        }
    }

    pub fn try_ceil(&self, granularity: Granularity, week_start: Weekday) -> ScaleResult<Self> {
        let floored = self.try_floor(granularity, week_start)?;
        if floored >= *self {
            return Ok(floored);
        }

        match granularity {
            Granularity::Millisecond => Ok(*self),
            Granularity::Second => floored.add_seconds(1),
            Granularity::Minute => floored.add_seconds(60),
            Granularity::Hour => floored.add_seconds(3_600),
            Granularity::Day => floored.add_days(1),
            Granularity::Week => floored.add_days(7),
            Granularity::Month => floored.add_months(1),
            // Astronomical arithmetic: historical -1 is followed by 1.
            Granularity::Year => floored.add_years(1),
        }
    }
}

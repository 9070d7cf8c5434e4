use chrono::Weekday;

use crate::core::{CalendarInstant, Granularity, TickTable, TimeBasis};

use super::AxisLabelLocale;

/// `chrono` format pattern for labels at `granularity`.
///
/// `%Y` is substituted with the historical year before formatting, so
/// labels never show year 0.
#[must_use]
pub fn label_pattern(granularity: Granularity, locale: AxisLabelLocale) -> &'static str {
    match (locale, granularity) {
        (AxisLabelLocale::EnUs, Granularity::Year) => "%Y",
        (AxisLabelLocale::EnUs, Granularity::Month) => "%b %Y",
        (AxisLabelLocale::EnUs, Granularity::Week | Granularity::Day) => "%a %d %b %Y",
        (AxisLabelLocale::EnUs, Granularity::Hour | Granularity::Minute) => "%H:%M\n%a %d %b %Y",
        (AxisLabelLocale::EnUs, Granularity::Second) => "%H:%M:%S\n%a %d %b %Y",
        (AxisLabelLocale::EnUs, Granularity::Millisecond) => "%H:%M:%S:%3f\n%a %d %b %Y",
        (AxisLabelLocale::EsEs, Granularity::Year) => "%Y",
        (AxisLabelLocale::EsEs, Granularity::Month) => "%m/%Y",
        (AxisLabelLocale::EsEs, Granularity::Week | Granularity::Day) => "%d/%m/%Y",
        (AxisLabelLocale::EsEs, Granularity::Hour | Granularity::Minute) => "%H:%M\n%d/%m/%Y",
        (AxisLabelLocale::EsEs, Granularity::Second) => "%H:%M:%S\n%d/%m/%Y",
        (AxisLabelLocale::EsEs, Granularity::Millisecond) => "%H:%M:%S,%3f\n%d/%m/%Y",
    }
}

/// Formats a tick value as a wall-clock label in `basis`.
///
/// Values that cannot be converted to a calendar instant fall back to a
/// plain decimal rendering.
#[must_use]
pub fn format_tick_label(
    value: f64,
    granularity: Granularity,
    basis: TimeBasis,
    locale: AxisLabelLocale,
) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let Ok(instant) = CalendarInstant::from_time_value(value, basis) else {
        return format!("{value:.0}");
    };

    let pattern =
        label_pattern(granularity, locale).replace("%Y", &historical_year_text(instant.year()));
    instant.local().format(&pattern).to_string()
}

/// Coarsest granularity to which every major tick of `table` is aligned.
///
/// Week alignment is checked separately: ticks that are aligned to days but
/// not to week starts report `Day`.
#[must_use]
pub fn label_granularity(table: &TickTable, basis: TimeBasis, week_start: Weekday) -> Granularity {
    let mut granularity = Granularity::Year;
    let mut aligned_to_weeks = true;

    for &tick in table.major() {
        let Ok(instant) = CalendarInstant::from_time_value(tick, basis) else {
            continue;
        };

        let coarsest = granularity;
        for candidate in Granularity::ALL
            .into_iter()
            .filter(|candidate| *candidate >= Granularity::Second && *candidate <= coarsest)
        {
            if instant.floor(candidate, week_start) == instant {
                continue;
            }
            if candidate == Granularity::Week {
                aligned_to_weeks = false;
            } else {
                granularity = candidate.finer().unwrap_or(Granularity::Millisecond);
                break;
            }
        }

        if granularity == Granularity::Millisecond {
            break;
        }
    }

    if granularity == Granularity::Week && !aligned_to_weeks {
        Granularity::Day
    } else {
        granularity
    }
}

fn historical_year_text(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    }
}

use approx::assert_relative_eq;
use chrono::{NaiveDate, Weekday};
use chrono_tz::Europe::Berlin;
use time_scale_rs::api::{AxisLabelLocale, DateScaleEngine, DateScaleEngineConfig, ScaleEngine};
use time_scale_rs::core::{CalendarInstant, Granularity, ScaleAttributes, TimeBasis};

const HOUR: f64 = 3_600_000.0;

fn utc_millis(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> f64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid date")
        .and_utc()
        .timestamp_millis() as f64
}

fn year_start(year: i32) -> f64 {
    CalendarInstant::from_date(year, 1, 1, TimeBasis::Utc)
        .expect("valid date")
        .to_time_value()
}

fn berlin_engine() -> DateScaleEngine {
    DateScaleEngine::with_config(DateScaleEngineConfig::new(TimeBasis::Zone(Berlin)))
        .expect("valid config")
}

#[test]
fn eight_years_divide_into_yearly_ticks() {
    let engine = DateScaleEngine::default();
    let division = engine.divide(
        utc_millis(2005, 1, 1, 0, 0),
        utc_millis(2012, 12, 31, 0, 0),
        10,
        8,
        0.0,
    );

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Year);
    assert_eq!(plan.major_step, 1.0);

    let expected: Vec<f64> = (2005..=2012).map(year_start).collect();
    assert_eq!(division.ticks.major(), expected.as_slice());
    assert_eq!(
        division.ticks.interval(),
        (utc_millis(2005, 1, 1, 0, 0), utc_millis(2012, 12, 31, 0, 0))
    );
}

#[test]
fn one_day_divides_into_four_hour_ticks() {
    let engine = DateScaleEngine::default();
    let min = utc_millis(2021, 6, 1, 0, 0);
    let max = utc_millis(2021, 6, 2, 0, 0);
    let division = engine.divide(min, max, 6, 4, 0.0);

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Hour);
    assert_eq!(plan.major_step, 4.0);
    assert_eq!(plan.minor_step, 1.0);

    let expected: Vec<f64> = (0..=6).map(|i| min + f64::from(i) * 4.0 * HOUR).collect();
    assert_eq!(division.ticks.major(), expected.as_slice());

    let medium: Vec<f64> = (0..6).map(|i| min + (f64::from(i) * 4.0 + 2.0) * HOUR).collect();
    assert_eq!(division.ticks.medium(), medium.as_slice());
    assert_eq!(division.ticks.minor().len(), 12);
}

#[test]
fn identical_bounds_give_an_empty_table() {
    let engine = DateScaleEngine::default();
    let value = utc_millis(2021, 6, 1, 12, 0);
    let division = engine.divide(value, value, 10, 5, 0.0);

    assert!(division.ticks.is_empty());
    assert!(division.plan.is_none());
    assert_eq!(division.ticks.interval(), (value, value));
}

#[test]
fn single_hour_steps_ignore_spring_forward() {
    let engine = berlin_engine();
    let min = utc_millis(2021, 3, 27, 23, 0);
    let max = utc_millis(2021, 3, 28, 4, 0);
    let division = engine.divide(min, max, 5, 0, 0.0);

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Hour);
    assert_eq!(plan.major_step, 1.0);
    assert!(!plan.daylight_saving_correction);

    let major = division.ticks.major();
    assert_eq!(major.len(), 6);
    for pair in major.windows(2) {
        assert_eq!(pair[1] - pair[0], HOUR);
    }
}

#[test]
fn day_ticks_stay_on_local_midnight_across_spring_forward() {
    let engine = berlin_engine();
    let basis = engine.time_basis();
    let min = CalendarInstant::from_date(2021, 3, 25, basis)
        .expect("valid")
        .to_time_value();
    let max = CalendarInstant::from_date(2021, 3, 31, basis)
        .expect("valid")
        .to_time_value();
    let division = engine.divide(min, max, 5, 0, 0.0);

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Day);
    assert!(plan.daylight_saving_correction);

    let days: Vec<u32> = division
        .ticks
        .major()
        .iter()
        .map(|value| {
            let instant = engine.to_instant(*value).expect("in range");
            assert!(instant.is_midnight());
            instant.day()
        })
        .collect();
    assert_eq!(days, vec![25, 27, 29, 31]);
}

#[test]
fn year_ticks_never_land_on_year_zero() {
    let engine = DateScaleEngine::default();
    let division = engine.divide(year_start(-5), year_start(5), 10, 0, 0.0);

    let years: Vec<i32> = division
        .ticks
        .major()
        .iter()
        .map(|value| engine.to_instant(*value).expect("in range").year())
        .collect();
    assert_eq!(years, vec![-5, -4, -3, -2, -1, 1, 2, 3, 4, 5]);
}

#[test]
fn descending_input_inverts_ticks_and_step() {
    let engine = DateScaleEngine::default();
    let min = utc_millis(2021, 6, 1, 0, 0);
    let max = utc_millis(2021, 6, 2, 0, 0);

    let ascending = engine.divide(min, max, 6, 0, 0.0);
    let descending = engine.divide(max, min, 6, 0, 0.0);

    let mut reversed = ascending.ticks.major().to_vec();
    reversed.reverse();
    assert_eq!(descending.ticks.major(), reversed.as_slice());
    assert_eq!(descending.ticks.interval(), (max, min));
    assert_eq!(descending.plan.expect("plan").major_step, -4.0);
}

#[test]
fn step_hint_limits_the_major_step_count() {
    let engine = DateScaleEngine::default();
    let min = utc_millis(2021, 6, 1, 0, 0);
    let max = utc_millis(2021, 6, 2, 0, 0);
    let ticks = engine.divide_scale(min, max, 10, 0, 6.0 * HOUR);

    let expected: Vec<f64> = (0..=4).map(|i| min + f64::from(i) * 6.0 * HOUR).collect();
    assert_eq!(ticks.major(), expected.as_slice());
}

#[test]
fn week_ticks_start_on_the_locale_week_start() {
    let engine = DateScaleEngine::default();
    let division = engine.divide(
        utc_millis(2021, 1, 4, 0, 0),
        utc_millis(2021, 3, 1, 0, 0),
        5,
        0,
        0.0,
    );

    assert_eq!(division.granularity(), Some(Granularity::Week));
    assert_eq!(
        division.ticks.major(),
        &[
            utc_millis(2021, 1, 17, 0, 0),
            utc_millis(2021, 1, 31, 0, 0),
            utc_millis(2021, 2, 14, 0, 0),
            utc_millis(2021, 2, 28, 0, 0),
        ]
    );
    for value in division.ticks.major() {
        let instant = engine.to_instant(*value).expect("in range");
        assert_eq!(instant.weekday(), Weekday::Sun);
    }
}

#[test]
fn two_month_steps_put_the_interior_month_on_a_minor_tick() {
    let engine = DateScaleEngine::default();
    let division = engine.divide(
        utc_millis(2021, 1, 15, 0, 0),
        utc_millis(2021, 12, 15, 0, 0),
        6,
        4,
        0.0,
    );

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Month);
    assert_eq!(plan.major_step, 2.0);
    assert_eq!(plan.minor_step, 1.0);
    assert!(!plan.daylight_saving_correction);

    let major: Vec<f64> = [3, 5, 7, 9, 11]
        .into_iter()
        .map(|month| utc_millis(2021, month, 1, 0, 0))
        .collect();
    assert_eq!(division.ticks.major(), major.as_slice());

    let minor: Vec<f64> = [2, 4, 6, 8, 10, 12]
        .into_iter()
        .map(|month| utc_millis(2021, month, 1, 0, 0))
        .collect();
    assert_eq!(division.ticks.minor(), minor.as_slice());
    assert!(division.ticks.medium().is_empty());
}

#[test]
fn single_month_steps_report_no_minor_step_but_place_day_ticks() {
    let engine = DateScaleEngine::default();
    let division = engine.divide(
        utc_millis(2021, 1, 1, 0, 0),
        utc_millis(2021, 4, 1, 0, 0),
        3,
        8,
        0.0,
    );

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Month);
    assert_eq!(plan.major_step, 1.0);
    assert_eq!(plan.minor_step, 0.0);

    assert_eq!(division.ticks.major().len(), 4);
    assert!(division.ticks.minor().contains(&utc_millis(2021, 1, 6, 0, 0)));
    assert!(division.ticks.medium().contains(&utc_millis(2021, 1, 16, 0, 0)));
}

#[test]
fn year_steps_report_no_daylight_saving_correction() {
    let engine = berlin_engine();
    let division = engine.divide(year_start(2005), year_start(2013), 10, 0, 0.0);

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Year);
    assert!(!plan.daylight_saving_correction);
}

#[test]
fn sub_second_intervals_use_the_linear_divider() {
    let engine = DateScaleEngine::default();
    let division = engine.divide(0.0, 1_000.0, 10, 0, 0.0);

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Millisecond);
    assert_relative_eq!(plan.major_step, 100.0);

    let expected: Vec<f64> = (0..=10).map(|i| f64::from(i) * 100.0).collect();
    assert_eq!(division.ticks.major(), expected.as_slice());
}

#[test]
fn sub_second_epoch_intervals_keep_ticks_on_step_multiples() {
    let engine = DateScaleEngine::default();
    let x1 = 1_620_142_244_020.0;
    let x2 = 1_620_142_244_037.0;
    let division = engine.divide(x1, x2, 14, 2, 0.0);

    let plan = division.plan.expect("non-empty division");
    assert_eq!(plan.granularity, Granularity::Millisecond);
    assert_relative_eq!(plan.major_step, 2.0);

    let expected: Vec<f64> = (0..9).map(|i| x1 + f64::from(i) * 2.0).collect();
    assert_eq!(division.ticks.major(), expected.as_slice());

    let medium: Vec<f64> = (0..9).map(|i| x1 + 1.0 + f64::from(i) * 2.0).collect();
    assert_eq!(division.ticks.medium(), medium.as_slice());
    assert!(
        division
            .ticks
            .medium()
            .iter()
            .all(|tick| !division.ticks.major().contains(tick))
    );
}

#[test]
fn sub_millisecond_intervals_far_from_the_epoch_stay_strictly_increasing() {
    let engine = DateScaleEngine::default();
    let ticks = engine.divide_scale(-1_715_689_247_416_589.0, -1_715_689_247_416_588.0, 14, 2, 0.0);

    assert!(ticks.major().windows(2).all(|pair| pair[0] < pair[1]));
    assert!(ticks.medium().iter().all(|tick| !ticks.major().contains(tick)));
}

#[test]
fn invalid_intervals_give_empty_tables() {
    let engine = DateScaleEngine::default();

    let nan = engine.divide_scale(f64::NAN, 1.0, 10, 5, 0.0);
    assert!(nan.is_empty());

    let unrepresentable = engine.divide_scale(0.0, 1.0e300, 10, 5, 0.0);
    assert!(unrepresentable.is_empty());
    assert_eq!(unrepresentable.interval(), (0.0, 1.0e300));
}

#[test]
fn auto_scale_aligns_bounds_to_the_step() {
    let engine = DateScaleEngine::default();
    let x1 = utc_millis(2021, 6, 1, 1, 20);
    let x2 = utc_millis(2021, 6, 1, 17, 50);

    let scale = engine.auto_scale(8, x1, x2);
    assert_eq!(scale.x1, utc_millis(2021, 6, 1, 0, 0));
    assert_eq!(scale.x2, utc_millis(2021, 6, 1, 18, 0));
    assert_relative_eq!(scale.step_size, 2.0 * HOUR);
}

#[test]
fn auto_scale_honours_floating_and_inverted_attributes() {
    let mut engine = DateScaleEngine::default();
    let x1 = utc_millis(2021, 6, 1, 1, 20);
    let x2 = utc_millis(2021, 6, 1, 17, 50);

    engine.set_attributes(ScaleAttributes::default().with_floating(true));
    let floating = engine.auto_scale(8, x1, x2);
    assert_eq!((floating.x1, floating.x2), (x1, x2));
    assert_relative_eq!(floating.step_size, 2.0 * HOUR);

    engine.set_attributes(ScaleAttributes::default().with_inverted(true));
    let inverted = engine.auto_scale(8, x1, x2);
    assert_eq!(inverted.x1, utc_millis(2021, 6, 1, 18, 0));
    assert_eq!(inverted.x2, utc_millis(2021, 6, 1, 0, 0));
    assert_relative_eq!(inverted.step_size, -2.0 * HOUR);
}

#[test]
fn tick_labels_follow_the_coarsest_common_alignment() {
    let mut engine = DateScaleEngine::default();
    let ticks = engine.divide_scale(
        utc_millis(2021, 6, 1, 0, 0),
        utc_millis(2021, 6, 2, 0, 0),
        6,
        0,
        0.0,
    );

    let labels = engine.tick_labels(&ticks);
    assert_eq!(labels.len(), 7);
    assert_eq!(labels[0], "00:00\nTue 01 Jun 2021");
    assert_eq!(labels[1], "04:00\nTue 01 Jun 2021");
    assert_eq!(labels[6], "00:00\nWed 02 Jun 2021");

    engine.set_locale(AxisLabelLocale::EsEs);
    assert_eq!(engine.tick_labels(&ticks)[1], "04:00\n01/06/2021");

    let years = engine.divide_scale(year_start(2005), year_start(2008), 3, 0, 0.0);
    assert_eq!(engine.tick_labels(&years), vec!["2005", "2006", "2007", "2008"]);
}

#[test]
fn setters_clamp_and_store_configuration() {
    let mut engine = DateScaleEngine::new(TimeBasis::FixedOffset { seconds: 3_600 });
    engine.set_max_weeks(-3);
    assert_eq!(engine.max_weeks(), 0);

    engine.set_locale(AxisLabelLocale::EsEs);
    assert_eq!(engine.week_start(), Weekday::Mon);
    assert_eq!(engine.time_basis(), TimeBasis::FixedOffset { seconds: 3_600 });
}

#[test]
fn scale_engine_dispatches_to_the_selected_strategy() {
    let date: ScaleEngine = DateScaleEngine::default().into();
    let linear = ScaleEngine::default();
    assert!(date.is_calendar());
    assert!(!linear.is_calendar());

    let min = utc_millis(2021, 6, 1, 0, 0);
    let max = utc_millis(2021, 6, 2, 0, 0);
    assert_eq!(date.divide_scale(min, max, 6, 0, 0.0).major().len(), 7);

    let linear_ticks = linear.divide_scale(0.0, 10.0, 5, 0, 0.0);
    assert_eq!(linear_ticks.major(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
}

use time_scale_rs::core::Granularity;
use time_scale_rs::core::step_size::{select_major_step, select_minor_step};

#[test]
fn major_steps_come_from_candidate_tables() {
    assert_eq!(select_major_step(24.0, Granularity::Hour, 6), 4.0);
    assert_eq!(select_major_step(25.0, Granularity::Hour, 6), 6.0);
    assert_eq!(select_major_step(200.0, Granularity::Minute, 5), 60.0);
    assert_eq!(select_major_step(30.0, Granularity::Week, 5), 8.0);
    assert_eq!(select_major_step(30.0, Granularity::Month, 10), 3.0);
}

#[test]
fn narrow_widths_force_a_step_of_two() {
    assert_eq!(select_major_step(10.0, Granularity::Month, 6), 2.0);
    assert_eq!(select_major_step(9.0, Granularity::Week, 5), 2.0);
    assert_eq!(select_major_step(12.0, Granularity::Second, 6), 2.0);
}

#[test]
fn day_steps_round_up_then_snap_to_weeks() {
    assert_eq!(select_major_step(20.0, Granularity::Day, 4), 5.0);
    assert_eq!(select_major_step(60.0, Granularity::Day, 4), 21.0);
    // Day is exempt from the step-of-two rule
    assert_eq!(select_major_step(6.0, Granularity::Day, 5), 2.0);
    assert_eq!(select_major_step(9.0, Granularity::Day, 5), 2.0);
}

#[test]
fn year_steps_use_base_ten_division() {
    assert_eq!(select_major_step(8.0, Granularity::Year, 10).round(), 1.0);
    assert_eq!(select_major_step(45.0, Granularity::Year, 10), 5.0);
    assert_eq!(select_major_step(300.0, Granularity::Year, 5), 100.0);
}

#[test]
fn minor_steps_split_majors_evenly() {
    assert_eq!(select_minor_step(4.0, 8, Granularity::Hour), 0.5);
    assert_eq!(select_minor_step(4.0, 4, Granularity::Hour), 1.0);
    assert_eq!(select_minor_step(12.0, 4, Granularity::Month), 3.0);
    assert_eq!(select_minor_step(8.0, 10, Granularity::Year), 1.0);
    assert_eq!(select_minor_step(10.0, 5, Granularity::Year), 2.0);
}

#[test]
fn week_minor_steps_prefer_days() {
    assert_eq!(select_minor_step(1.0, 10, Granularity::Week), 1.0 / 7.0);
    assert_eq!(select_minor_step(2.0, 5, Granularity::Week), 1.0);
    assert_eq!(select_minor_step(4.0, 3, Granularity::Week), 2.0);
}

#[test]
fn minor_step_fallbacks() {
    assert_eq!(select_minor_step(4.0, 1, Granularity::Hour), 0.0);
    assert_eq!(select_minor_step(5.0, 4, Granularity::Hour), 2.5);
    assert_eq!(select_minor_step(1.0, 8, Granularity::Month), 0.0);
    assert_eq!(select_minor_step(5.0, 3, Granularity::Month), 0.0);
}

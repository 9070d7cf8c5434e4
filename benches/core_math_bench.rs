use chrono_tz::Europe::Berlin;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use time_scale_rs::api::{DateScaleEngine, DateScaleEngineConfig};
use time_scale_rs::core::{CalendarInstant, LinearScaleEngine, TimeBasis};

fn time_value(year: i32, month: u32, day: u32) -> f64 {
    CalendarInstant::from_date(year, month, day, TimeBasis::Utc)
        .expect("valid date")
        .to_time_value()
}

fn bench_linear_divide_scale(c: &mut Criterion) {
    let engine = LinearScaleEngine::new();

    c.bench_function("linear_divide_scale", |b| {
        b.iter(|| {
            let _ = engine.divide_scale(
                black_box(-1_234.5),
                black_box(98_765.4),
                black_box(10),
                black_box(5),
                0.0,
            );
        })
    });
}

fn bench_date_divide_scale_years(c: &mut Criterion) {
    let engine = DateScaleEngine::default();
    let x1 = time_value(1900, 3, 14);
    let x2 = time_value(2024, 11, 2);

    c.bench_function("date_divide_scale_years", |b| {
        b.iter(|| {
            let _ = engine.divide_scale(black_box(x1), black_box(x2), 10, 5, 0.0);
        })
    });
}

fn bench_date_divide_scale_days_dst(c: &mut Criterion) {
    let config = DateScaleEngineConfig::new(TimeBasis::Zone(Berlin));
    let engine = DateScaleEngine::with_config(config).expect("valid config");
    let x1 = time_value(2021, 3, 1);
    let x2 = time_value(2021, 4, 30);

    c.bench_function("date_divide_scale_days_dst", |b| {
        b.iter(|| {
            let _ = engine.divide_scale(black_box(x1), black_box(x2), 12, 24, 0.0);
        })
    });
}

fn bench_date_auto_scale_hours(c: &mut Criterion) {
    let engine = DateScaleEngine::default();
    let x1 = time_value(2021, 6, 1) + 1_234.0;
    let x2 = x1 + 17.5 * 3_600_000.0;

    c.bench_function("date_auto_scale_hours", |b| {
        b.iter(|| {
            let _ = engine.auto_scale(black_box(8), black_box(x1), black_box(x2));
        })
    });
}

criterion_group!(
    benches,
    bench_linear_divide_scale,
    bench_date_divide_scale_years,
    bench_date_divide_scale_days_dst,
    bench_date_auto_scale_hours
);
criterion_main!(benches);

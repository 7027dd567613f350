use criterion::{Criterion, criterion_group, criterion_main};
use showings::prelude::*;
use std::{hint::black_box, time::Duration as StdDuration};

// Spread around lower Manhattan
fn stops(n: usize) -> Vec<Stop> {
    (0..n)
        .map(|i| {
            let offset = i as f64 * 0.003;
            Stop::new(
                &format!("mls-{i}"),
                &format!("{i} Broadway"),
                Coordinate::from((40.70 + offset, -74.01 + offset / 2.0)),
            )
        })
        .collect()
}

fn short_tour(scheduler: &TourScheduler<EstimatedTravel>, stops: &[Stop], config: &TourConfig) {
    let _ = black_box(scheduler.compute_schedule(stops, config));
}

fn cached_tour(
    scheduler: &TourScheduler<CachedTravel<EstimatedTravel>>,
    stops: &[Stop],
    config: &TourConfig,
) {
    let _ = black_box(scheduler.compute_schedule(stops, config));
}

fn criterion_benchmark(c: &mut Criterion) {
    let config = TourConfig::new(Time::from_hm(8, 0), Time::from_hm(20, 0))
        .with_default_showing_duration(Duration::from_minutes(15));
    let scheduler = TourScheduler::new(EstimatedTravel::new());
    let cached = TourScheduler::new(CachedTravel::new(EstimatedTravel::new()));
    let few = stops(6);
    let many = stops(40);

    let mut group = c.benchmark_group("Scheduling");

    group.warm_up_time(StdDuration::from_secs(3));

    group.measurement_time(StdDuration::from_secs(10));

    group.bench_function("6 stop tour", |b| {
        b.iter(|| short_tour(&scheduler, &few, &config))
    });

    group.bench_function("40 stop tour", |b| {
        b.iter(|| short_tour(&scheduler, &many, &config))
    });

    group.bench_function("40 stop tour cached", |b| {
        b.iter(|| cached_tour(&cached, &many, &config))
    });

    group.bench_function("Booking rounding, full day", |b| {
        b.iter(|| {
            for minutes in 0..24 * 60 {
                black_box(round_for_booking(
                    Time::from_minutes(minutes),
                    Granularity::OnTheHalfHour,
                ));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

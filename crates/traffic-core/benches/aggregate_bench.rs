use chrono::{DateTime, Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use traffic_core::{aggregate, decode_series, Observation, StatisticsStore, Window};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2023-11-13T12:00:00Z").unwrap().with_timezone(&Utc)
}

// one sample every five minutes for a year
fn year_of_samples() -> Vec<Observation> {
    let n = 365 * 24 * 12;
    (0..n).map(|i| Observation::new(now() - Duration::minutes(5 * i + 1), (i * 37) % 41)).collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let raw = year_of_samples();
    let mut group = c.benchmark_group("aggregate");
    for window in Window::ALL {
        group.bench_function(format!("{window}"), |b| {
            b.iter(|| black_box(aggregate(black_box(&raw), window, now())))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut store = StatisticsStore::new();
    for o in year_of_samples() {
        store.insert("cam", o.timestamp, o.count).unwrap();
    }
    let payload = store.payload("cam");
    c.bench_function("decode_series_year", |b| b.iter(|| black_box(decode_series(black_box(&payload)))));
}

criterion_group!(benches, bench_aggregate, bench_decode);
criterion_main!(benches);

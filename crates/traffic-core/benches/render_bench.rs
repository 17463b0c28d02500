use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use traffic_core::{aggregate, Observation, RenderOptions, TimeChart, Window};

fn build_chart(window: Window, n: i64) -> TimeChart {
    let now = DateTime::parse_from_rfc3339("2023-11-13T12:00:00Z").unwrap().with_timezone(&Utc);
    let step = window.lookback().num_seconds() / n;
    let raw: Vec<Observation> = (0..n)
        .map(|i| Observation::new(now - Duration::seconds(i * step + 1), ((i as f64 * 0.05).sin() * 20.0 + 25.0) as i64))
        .collect();
    TimeChart::for_window(&aggregate(&raw, window, now), now)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for window in [Window::Hour, Window::Day, Window::Year] {
        group.bench_function(format!("{window}"), |b| {
            let ch = build_chart(window, 20_000);
            let mut opts = RenderOptions::default();
            opts.draw_labels = false;
            b.iter(|| -> Result<()> {
                let bytes = ch.render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);

use criterion::{Criterion, criterion_group, criterion_main};
use linechart_rs::api::{ChartEngine, ChartState};
use linechart_rs::core::{ChartPoint, ContainerSize, LinearScale, Series, find_selected_series};
use linechart_rs::render::NullRenderer;
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (0.0, 1920.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let pixel = scale.map(black_box(4_321.123));
            let _ = scale.invert(black_box(pixel));
        })
    });
}

fn bench_selection_100_series(c: &mut Criterion) {
    let data: Vec<Series> = (0..100)
        .map(|series_index| {
            let points = (0..100)
                .map(|i| ChartPoint::new(i as f64, (series_index + i) as f64 * 0.5))
                .collect();
            Series::new(format!("series-{series_index}"), points)
        })
        .collect();

    c.bench_function("selection_100_series_100_points", |b| {
        b.iter(|| {
            let _ = find_selected_series(black_box(&data), black_box(42.3));
        })
    });
}

fn bench_reconcile_50_series(c: &mut Criterion) {
    let data: Vec<Series> = (0..50)
        .map(|series_index| {
            let points = (0..200)
                .map(|i| ChartPoint::new(i as f64, ((series_index * 7 + i) % 31) as f64))
                .collect();
            Series::new(format!("series-{series_index}"), points)
        })
        .collect();
    let state = ChartState::new(ContainerSize::new(1600.0, 900.0))
        .with_data(data)
        .with_transition_duration(0.0);
    let mut engine = ChartEngine::create(NullRenderer::default(), &state).expect("engine init");

    c.bench_function("reconcile_50_series_200_points", |b| {
        b.iter(|| {
            let _ = engine.update(black_box(&state)).expect("update");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_selection_100_series,
    bench_reconcile_50_series
);
criterion_main!(benches);

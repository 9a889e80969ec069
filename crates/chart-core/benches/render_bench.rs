// File: crates/chart-core/benches/render_bench.rs
// Summary: Criterion benchmark for PNG rendering at report size.

use chart_core::{Axis, Chart, RenderOptions, Series, SeriesType};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_chart(series: usize, points: usize) -> Chart {
    let mut ch = Chart::new().with_title("bench");
    for s in 0..series {
        let data = (0..points)
            .map(|i| {
                let x = i as f64 * 60_000.0;
                (x, (i as f64 * 0.01 + s as f64).sin() * 10.0)
            })
            .collect();
        ch.add_series(Series::with_data(SeriesType::Line, data).named(format!("series {s}")));
    }
    ch.y_axis = Axis::new("Y", -12.0, 12.0);
    ch.autoscale_axes(0.02);
    ch
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &(series, points) in &[(1usize, 240usize), (8, 240), (8, 2_000)] {
        group.bench_function(format!("{series}x{points}"), |b| {
            let ch = build_chart(series, points);
            let opts = RenderOptions::default();
            b.iter(|| black_box(ch.render_to_png_bytes(&opts).expect("render")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);

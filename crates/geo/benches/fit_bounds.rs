//! Benchmarks for view resolution.

use clipmap_geo::{fit_bounds, BoundingRegion, Coordinate, FitOptions, Viewport, ViewportResolver};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn juneau() -> BoundingRegion {
    BoundingRegion::new(Coordinate::new(58.45, -134.75), Coordinate::new(58.25, -134.30))
}

fn bench_fit_bounds(c: &mut Criterion) {
    let region = juneau();
    let options = FitOptions::default();

    let mut group = c.benchmark_group("fit_bounds");

    for (width, height) in [(320u32, 480u32), (1280, 800), (3840, 2160)] {
        let viewport = Viewport::new(width, height);
        group.bench_with_input(
            BenchmarkId::new("viewport", format!("{}x{}", width, height)),
            &viewport,
            |b, viewport| b.iter(|| fit_bounds(black_box(&region), black_box(*viewport), &options)),
        );
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = ViewportResolver::default();
    let region = juneau();
    let viewport = Viewport::new(1280, 800);
    let selected = Coordinate::new(58.3019, -134.4197);

    let mut group = c.benchmark_group("resolve");

    group.bench_function("region", |b| {
        b.iter(|| resolver.resolve(black_box(viewport), Some(black_box(&region)), None, 9.0))
    });

    group.bench_function("selection", |b| {
        b.iter(|| resolver.resolve(black_box(viewport), Some(&region), Some(black_box(selected)), 9.0))
    });

    group.finish();
}

criterion_group!(benches, bench_fit_bounds, bench_resolve);
criterion_main!(benches);

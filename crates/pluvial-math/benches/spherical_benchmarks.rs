use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pluvial_math::*;

fn bench_angular_distance(c: &mut Criterion) {
    let a = black_box(SpherePoint::new(0.3, 0.7));
    let b = black_box(SpherePoint::new(-1.2, -0.4));
    c.bench_function("angular_distance", |bencher| {
        bencher.iter(|| black_box(angular_distance(a, b)))
    });
}

fn bench_midpoint(c: &mut Criterion) {
    let a = black_box(SpherePoint::new(0.3, 0.7));
    let b = black_box(SpherePoint::new(0.35, 0.72));
    c.bench_function("midpoint", |bencher| bencher.iter(|| black_box(midpoint(a, b))));
}

fn bench_spherical_excess(c: &mut Criterion) {
    let a = black_box(SpherePoint::new(0.0, 0.0));
    let b = black_box(SpherePoint::new(0.01, 0.0));
    let p = black_box(SpherePoint::new(0.005, 0.008));
    c.bench_function("spherical_excess", |bencher| {
        bencher.iter(|| black_box(spherical_excess(a, b, p)))
    });
}

fn bench_barycentric(c: &mut Criterion) {
    let corners = black_box([
        SpherePoint::new(0.0, 0.0),
        SpherePoint::new(0.01, 0.0),
        SpherePoint::new(0.005, 0.008),
    ]);
    let at = black_box(SpherePoint::new(0.004, 0.003));
    c.bench_function("barycentric", |bencher| {
        bencher.iter(|| black_box(barycentric(at, corners, [1.0, 2.0, 3.0])))
    });
}

fn bench_tricubic(c: &mut Criterion) {
    let mut samples = [[[0.0; 4]; 4]; 4];
    for (i, slab) in samples.iter_mut().enumerate() {
        for (j, row) in slab.iter_mut().enumerate() {
            for (k, v) in row.iter_mut().enumerate() {
                *v = (i * 16 + j * 4 + k) as f64;
            }
        }
    }
    let samples = black_box(samples);
    c.bench_function("tricubic", |bencher| {
        bencher.iter(|| black_box(tricubic(12.3, -4.6, 7.9, &samples)))
    });
}

fn bench_closest_n_points(c: &mut Criterion) {
    let candidates = dodecahedron_vertices();
    let origin = black_box(icosahedron_vertices()[0]);
    c.bench_function("closest_3_of_20", |bencher| {
        bencher.iter(|| black_box(closest_n_points(origin, 3, &candidates)))
    });
}

criterion_group!(
    benches,
    bench_angular_distance,
    bench_midpoint,
    bench_spherical_excess,
    bench_barycentric,
    bench_tricubic,
    bench_closest_n_points,
);
criterion_main!(benches);

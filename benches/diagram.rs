use criterion::{
    criterion_group, criterion_main, black_box, BatchSize, Criterion,
};

use voronoi_hds::prelude::*;


/// Element `i` of the Van der Corput sequence in base `base`.
fn radical_inverse(mut i: u32, base: u32) -> f64 {
    let mut out = 0.0;
    let mut f = 1.0 / base as f64;
    while i > 0 {
        out += f * (i % base) as f64;
        i /= base;
        f /= base as f64;
    }
    out
}

/// Well spread points in the square `[0, 1000)²` (a Halton sequence).
fn sites(n: u32) -> Vec<(f64, f64)> {
    (1..=n)
        .map(|i| (1000.0 * radical_inverse(i, 2), 1000.0 * radical_inverse(i, 3)))
        .collect()
}


// ===============================================================================================
// ===== Benchmarks
// ===============================================================================================

fn insert_2000(c: &mut Criterion) {
    let points = sites(2000);
    c.bench_function("insert_2000", |b| {
        b.iter_batched(
            || points.clone(),
            |points| VoronoiDiagram::<DefaultConfig>::from_points(black_box(points)),
            BatchSize::SmallInput,
        )
    });
}

fn locate_in_2000(c: &mut Criterion) {
    let diagram = VoronoiDiagram::<DefaultConfig>::from_points(sites(2000));
    let queries = (0..500)
        .map(|i| (1000.0 * radical_inverse(i, 5), 1000.0 * radical_inverse(i, 7)))
        .collect::<Vec<_>>();

    c.bench_function("locate_in_2000", |b| {
        b.iter(|| {
            for &q in &queries {
                black_box(diagram.locate(q).ok());
            }
        })
    });
}

fn walk_all_boundaries(c: &mut Criterion) {
    let diagram = VoronoiDiagram::<DefaultConfig>::from_points(sites(2000));

    c.bench_function("walk_all_boundaries", |b| {
        b.iter(|| {
            let mut count = 0;
            for f in diagram.faces() {
                if let Some(ccb) = diagram.ccb_halfedges(f) {
                    count += ccb.lap().count();
                }
            }
            black_box(count)
        })
    });
}


criterion_group!(benches,
    insert_2000,
    locate_in_2000,
    walk_all_boundaries,
);
criterion_main!(benches);

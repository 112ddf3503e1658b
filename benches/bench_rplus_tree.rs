use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rplus_tree::geometry::Point2D;
use rplus_tree::r_plus_tree::RPlusTree;
use rplus_tree::range_search::RangeSearch;
use tracing::{debug, info};

const BENCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
const BENCH_NODE_CAPACITY: usize = 32;
const BENCH_RANGE_RADIUS: f64 = 30.0;

fn configure_criterion() -> Criterion {
    Criterion::default().measurement_time(BENCH_TIMEOUT)
}

fn generate_2d_data(count: usize) -> Vec<Point2D<usize>> {
    info!("Generating 2D data with {} points", count);
    let data: Vec<Point2D<usize>> = (0..count)
        .map(|i| {
            let pt = Point2D::new(i as f64, (i % 997) as f64, Some(i));
            debug!("Generated 2D point: {:?}", pt);
            pt
        })
        .collect();
    info!("Finished generating 2D data ({} points)", data.len());
    data
}

fn benchmark_bulk_load(_c: &mut Criterion) {
    let mut cc = configure_criterion();
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = generate_2d_data(n);
        cc.bench_function(&format!("assign_{n}"), |b| {
            b.iter(|| {
                let mut tree: RPlusTree<Point2D<usize>> = RPlusTree::new(BENCH_NODE_CAPACITY);
                tree.assign(black_box(points.clone()));
                black_box(tree.len())
            })
        });
    }
}

fn benchmark_report_range(_c: &mut Criterion) {
    let mut cc = configure_criterion();
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = generate_2d_data(n);
        let mut tree: RPlusTree<Point2D<usize>> = RPlusTree::new(BENCH_NODE_CAPACITY);
        tree.assign(points);

        let mid = (n / 2) as f64;
        let min = Point2D::new(mid - BENCH_RANGE_RADIUS, -BENCH_RANGE_RADIUS, None);
        let max = Point2D::new(mid + BENCH_RANGE_RADIUS, BENCH_RANGE_RADIUS, None);

        cc.bench_function(&format!("report_range_{n}"), |b| {
            b.iter(|| {
                let mut out = Vec::new();
                tree.report_range(black_box(&min), black_box(&max), &mut out);
                black_box(out.len())
            })
        });
    }
}

fn benchmark_count_range(_c: &mut Criterion) {
    let mut cc = configure_criterion();
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = generate_2d_data(n);
        let mut tree: RPlusTree<Point2D<usize>> = RPlusTree::new(BENCH_NODE_CAPACITY);
        tree.assign(points);

        let min = Point2D::new(-1.0, -1.0, None);
        let max = Point2D::new(n as f64 + 1.0, 1000.0, None);

        cc.bench_function(&format!("count_range_full_domain_{n}"), |b| {
            b.iter(|| black_box(tree.count_range(black_box(&min), black_box(&max))))
        });
    }
}

criterion_group!(
    benches,
    benchmark_bulk_load,
    benchmark_report_range,
    benchmark_count_range,
);
criterion_main!(benches);

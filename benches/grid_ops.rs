//! Benchmarks for grid sorting and view building.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridbook::source::StructuredSource;
use gridbook::{CellValue, Grid, GridOptions, TableSource};

/// A `rows` x `cols` grid with a numeric first column and text elsewhere.
fn large_grid(rows: usize, cols: usize) -> Grid {
    let source = StructuredSource {
        title: Some("bench".into()),
        headers: (1..=cols).map(|c| format!("Column {c}")).collect(),
        rows: (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| match c {
                        0 => CellValue::Number(((r * 7919) % rows) as f64),
                        _ => CellValue::text(format!("r{}c{c}", (r * 31) % rows)),
                    })
                    .collect()
            })
            .collect(),
    };
    Grid::from_source(&TableSource::from(source), &GridOptions::default())
        .expect("Failed to build grid")
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for rows in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("numeric", rows), &rows, |b, &rows| {
            let mut grid = large_grid(rows, 10);
            b.iter(|| grid.sort(black_box(1)).expect("Failed to sort"));
        });
        group.bench_with_input(BenchmarkId::new("text", rows), &rows, |b, &rows| {
            let mut grid = large_grid(rows, 10);
            b.iter(|| grid.sort(black_box(2)).expect("Failed to sort"));
        });
    }
    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let grid = large_grid(5_000, 20);

    c.bench_function("view_5000x20", |b| b.iter(|| black_box(grid.view())));

    c.bench_function("view_to_html_5000x20", |b| {
        b.iter(|| black_box(grid.view().to_html()))
    });
}

fn bench_move_column(c: &mut Criterion) {
    let mut grid = large_grid(5_000, 20);

    c.bench_function("move_column_5000x20", |b| {
        b.iter(|| grid.move_column(black_box(1), black_box(20)).expect("Failed to move"))
    });
}

criterion_group!(benches, bench_sort, bench_view, bench_move_column);
criterion_main!(benches);

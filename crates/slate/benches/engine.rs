/// Benchmarks for the two costs a caller actually feels:
/// 1) Writing a column of chained formulas (graph growth + cycle checks)
/// 2) Rewriting the base of a populated chain (invalidation fan-out) and
///    pulling the top value again (full re-evaluation)
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use slate::prelude::*;

const CHAIN_LENGTHS: [u32; 3] = [100, 1_000, 5_000];

fn build_chain(len: u32) -> Sheet {
    let mut sheet = Sheet::new();
    sheet.set_cell(Position::new(0, 0), "1").expect("base write");
    for row in 1..len {
        sheet
            .set_cell(Position::new(row, 0), format!("=A{}+1", row))
            .expect("chain write");
    }
    sheet
}

fn bench_chain_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_write");
    for len in CHAIN_LENGTHS {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| build_chain(len));
        });
    }
    group.finish();
}

fn bench_invalidate_and_reread(c: &mut Criterion) {
    let mut group = c.benchmark_group("invalidate_and_reread");
    for len in CHAIN_LENGTHS {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let top = Position::new(len - 1, 0);
            b.iter_batched_ref(
                || {
                    let sheet = build_chain(len);
                    sheet.value(top).expect("warm the caches");
                    sheet
                },
                |sheet| {
                    sheet.set_cell(Position::new(0, 0), "2").expect("rewrite");
                    sheet.value(top).expect("re-read")
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_cached_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_read");
    for len in CHAIN_LENGTHS {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let sheet = build_chain(len);
            let top = Position::new(len - 1, 0);
            sheet.value(top).expect("warm the caches");
            b.iter(|| sheet.value(top).expect("cached read"));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_chain_write,
    bench_invalidate_and_reread,
    bench_cached_read
);
criterion_main!(benches);

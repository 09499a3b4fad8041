use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sim_core::HistoryEntry;
use sim_econ::StandardCatalog;
use sim_strategy::{BestValue, Strategy};

fn bench_best_value_choose(c: &mut Criterion) {
    let catalog = StandardCatalog::classic();
    let history: Vec<HistoryEntry> = Vec::new();
    let mut strategy = BestValue;
    c.bench_function("best_value_choose_classic", |b| {
        b.iter(|| {
            black_box(strategy.choose(
                black_box(1_000.0),
                black_box(10.0),
                &history,
                black_box(3_600.0),
                &catalog,
            ))
        })
    });
}

criterion_group!(benches, bench_best_value_choose);
criterion_main!(benches);

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use stackmine_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in [
        ("compact", GameConfig::compact()),
        ("standard", GameConfig::standard()),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(RandomGridGenerator::new(seed).generate(black_box(&config)))
            })
        });
    }
    group.finish();
}

fn bench_full_round(c: &mut Criterion) {
    let config = GameConfig {
        deferred: None,
        ..GameConfig::standard()
    };
    c.bench_function("reveal_until_end", |b| {
        let mut engine = WagerEngine::new(config.clone(), 7).expect("valid config");
        b.iter(|| {
            engine.begin_round();
            for index in 0..config.total_cells() {
                let outcome = engine.reveal(index).expect("index in range");
                if matches!(outcome, RevealOutcome::Rejected(_)) || outcome.ends_round() {
                    break;
                }
                black_box(outcome);
            }
            if engine.balance() < 500.0 {
                // keep the ledger solvent across iterations
                engine = WagerEngine::new(config.clone(), 7).expect("valid config");
            }
            engine.drain_events()
        })
    });
}

criterion_group!(benches, bench_generate, bench_full_round);
criterion_main!(benches);

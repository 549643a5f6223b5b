use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use vote_core::{now_millis, Block, Fingerprint, Ledger};

const CANDIDATES: [&str; 4] = ["Bob", "Carol", "Dave", "Eve"];

fn filled_ledger(votes: usize, rng: &mut StdRng) -> Ledger {
    let mut ledger = Ledger::new();
    for i in 0..votes {
        let candidate = CANDIDATES[rng.gen_range(0..CANDIDATES.len())];
        let block = Block::vote(0, now_millis(), Fingerprint::of_voter(&format!("voter-{i}")), candidate);
        ledger.append(block).expect("fresh fingerprint");
    }
    ledger
}

fn bench_ledger(c: &mut Criterion) {
    c.bench_function("append_1000_votes", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            filled_ledger(1_000, &mut rng)
        });
    });

    let mut rng = StdRng::seed_from_u64(42);
    let ledger = filled_ledger(10_000, &mut rng);
    c.bench_function("verify_10000_blocks", |b| {
        b.iter(|| ledger.is_valid());
    });
}

criterion_group!(benches, bench_ledger);
criterion_main!(benches);

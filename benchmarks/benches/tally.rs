use cr_election::{
    election::{compile_results, compute_winners, voter_stats},
    types::{Candidate, Gender, VoteRecord},
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .map(|i| Candidate {
            id: format!("c{i}"),
            name: format!("Candidate {i}"),
            stream: "Commerce".to_string(),
            division: "B".to_string(),
            gender: Gender::ALL[i % Gender::ALL.len()],
            // Every third candidate ties at the top
            votes: if i % 3 == 0 { 50 } else { (i % 50) as u64 },
        })
        .collect()
}

fn history(voters: usize) -> Vec<VoteRecord> {
    (0..voters)
        .flat_map(|v| {
            Gender::ALL.into_iter().map(move |gender| VoteRecord {
                roll_no: format!("S{v}"),
                voted_for: gender,
            })
        })
        .collect()
}

fn bench_winners(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_winners");

    for count in [10usize, 100, 1000] {
        let candidates = candidates(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &candidates, |b, candidates| {
            b.iter(|| compute_winners(black_box(candidates)))
        });
    }

    group.finish();
}

fn bench_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("results");
    let candidates = candidates(100);

    for voters in [100usize, 1000] {
        let history = history(voters);
        group.bench_with_input(BenchmarkId::new("voter_stats", voters), &history, |b, history| {
            b.iter(|| voter_stats(black_box(history), black_box(&candidates)))
        });
        group.bench_with_input(BenchmarkId::new("compile_results", voters), &history, |b, history| {
            b.iter(|| compile_results(black_box(&candidates), black_box(history)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_winners, bench_results);
criterion_main!(benches);

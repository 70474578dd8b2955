use criterion::{criterion_group, criterion_main, Criterion};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::generator::{pigeonhole, random_3sat, DEFAULT_3SAT_RATIO};
use dpll_sat::sat::preprocessing::PreprocessorChain;
use dpll_sat::sat::variable_selection::{FirstUnassigned, LowestIndex, VariableSelection};
use dpll_sat::{Dpll, Solver};
use std::hint::black_box;
use std::time::Duration;

fn solve_all<S: VariableSelection>(cnfs: &[Cnf]) {
    for cnf in cnfs {
        let mut state: Dpll<S> = Solver::new(cnf.clone());
        black_box(state.solve());
    }
}

fn random_batch(num_vars: u32, count: u64) -> Vec<Cnf> {
    (0..count)
        .map(|seed| random_3sat(num_vars, DEFAULT_3SAT_RATIO, seed).unwrap())
        .collect()
}

fn bench_3sat(c: &mut Criterion) {
    let cnfs = random_batch(20, 50);

    let mut group = c.benchmark_group("3sat - variable selection");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("FirstUnassigned", |b| {
        b.iter(|| solve_all::<FirstUnassigned>(&cnfs));
    });

    group.bench_function("LowestIndex", |b| {
        b.iter(|| solve_all::<LowestIndex>(&cnfs));
    });

    group.finish();
}

fn bench_3sat_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("3sat - variables");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    for num_vars in [10, 20, 30] {
        let cnfs = random_batch(num_vars, 10);
        group.bench_function(format!("{num_vars} vars"), |b| {
            b.iter(|| solve_all::<FirstUnassigned>(&cnfs));
        });
    }

    group.finish();
}

fn bench_pigeonhole(c: &mut Criterion) {
    let mut group = c.benchmark_group("pigeonhole");
    group.sample_size(20);

    for holes in [3, 4, 5] {
        let cnf = pigeonhole(holes).unwrap();
        group.bench_function(format!("{holes} holes"), |b| {
            b.iter(|| {
                let mut state: Dpll = Solver::new(cnf.clone());
                black_box(state.solve());
            });
        });
    }

    group.finish();
}

fn bench_preprocessing(c: &mut Criterion) {
    let cnf = random_3sat(200, DEFAULT_3SAT_RATIO, 7).unwrap();
    let chain = PreprocessorChain::standard();

    c.bench_function("preprocessing - standard chain", |b| {
        b.iter(|| black_box(chain.apply(&cnf)));
    });
}

criterion_group!(
    benches,
    bench_3sat,
    bench_3sat_scaling,
    bench_pigeonhole,
    bench_preprocessing
);

criterion_main!(benches);

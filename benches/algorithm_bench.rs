//! Benchmarks for the iterated local search.

#[cfg(feature = "bench")]
extern crate criterion;

#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ils_solver::config::Config;
use ils_solver::local_search::LocalSearch;
use ils_solver::problem::Problem;
use ils_solver::solution::Solution;
use ils_solver::tour::hcp::HcpInstance;
use ils_solver::tour::tsp::TspInstance;
use ils_solver::tour::{Point, TourProblem};
use ils_solver::IlsAlgorithm;
use std::time::Duration;

/// Create a benchmark TSP of specified size on a jittered grid.
fn create_benchmark_problem(size: usize) -> TourProblem {
    let grid_size = (size as f64).sqrt().ceil() as usize;
    let points = (0..size)
        .map(|i| {
            let row = (i / grid_size) as i64;
            let col = (i % grid_size) as i64;
            Point::new(col * 10 + (i as i64 * 7) % 5, row * 10 + (i as i64 * 3) % 5)
        })
        .collect();
    TspInstance::new(format!("bench_{}", size), points).to_problem()
}

#[cfg(feature = "bench")]
fn benchmark_descent(c: &mut Criterion) {
    let mut group = c.benchmark_group("descent");

    for size in [50, 100, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let local_search = LocalSearch::new();
            let start = Solution::new(&problem, (0..size).rev().collect());

            b.iter(|| {
                let mut solution = start.clone();
                local_search.improve(&problem, &mut solution);
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_hcp(c: &mut Criterion) {
    let mut group = c.benchmark_group("hcp");
    group.measurement_time(Duration::from_secs(20));

    for size in [50, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let (instance, _) = HcpInstance::generate(size, 0.01, 1).unwrap_or_else(|e| panic!("{}", e));
            let problem = instance.to_problem();
            let config = Config::new()
                .with_seed_budget(size)
                .with_time_limit(Duration::from_secs(10));

            b.iter(|| {
                let mut algorithm = IlsAlgorithm::new(problem.clone(), config.clone());
                algorithm.run()
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_seed_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed_cycle");
    group.measurement_time(Duration::from_secs(20));

    for size in [30, 60].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let config = Config::new().with_seed_budget(1);
            let seed = problem.seeds(1)[0];

            b.iter(|| ils_solver::run_seed(&problem, &LocalSearch::new(), &config, seed));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(benches, benchmark_descent, benchmark_hcp, benchmark_seed_cycle);

#[cfg(feature = "bench")]
criterion_main!(benches);

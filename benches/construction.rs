use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use frechet_bounds::{
    EmpDistrArray, ExtremeMeasureConfig, MarginalConfig, MonotonicityStructure, SignPattern,
    construct_extreme_measures, construct_measure, poiss_correlation_bounds_2d,
};
use statrs::distribution::Poisson;

/// Poisson marginals with intensities `base, base + 2, ...`.
fn poisson_marginals(n: usize, base: f64) -> EmpDistrArray {
    let dists: Vec<Poisson> = (0..n)
        .map(|i| Poisson::new(base + 2.0 * f64::from(u32::try_from(i).unwrap())).unwrap())
        .collect();
    EmpDistrArray::from_distributions(&dists, &MarginalConfig::default()).unwrap()
}

fn bench_single_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_measure");
    let config = ExtremeMeasureConfig::default();

    for base in [3.0, 30.0, 300.0] {
        let marginals = poisson_marginals(2, base);
        group.bench_with_input(BenchmarkId::from_parameter(base), &marginals, |b, m| {
            b.iter(|| {
                construct_measure(black_box(m), &SignPattern::countermonotone(), &config).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_all_extreme_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_extreme_measures");
    let config = ExtremeMeasureConfig::default();

    for n in [2, 4, 6, 8] {
        let marginals = poisson_marginals(n, 5.0);
        let means = marginals.means();
        let variances = marginals.variances();
        group.bench_with_input(BenchmarkId::from_parameter(n), &marginals, |b, m| {
            b.iter(|| construct_extreme_measures(black_box(m), &means, &variances, &config).unwrap());
        });
    }
    group.finish();
}

fn bench_structure(c: &mut Criterion) {
    c.bench_function("monotonicity_structure_12", |b| {
        b.iter(|| MonotonicityStructure::new(black_box(12)).unwrap());
    });
}

fn bench_bounds(c: &mut Criterion) {
    c.bench_function("poiss_correlation_bounds_2d", |b| {
        b.iter(|| poiss_correlation_bounds_2d(black_box(3.0), black_box(5.0)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_single_measure,
    bench_all_extreme_points,
    bench_structure,
    bench_bounds
);
criterion_main!(benches);

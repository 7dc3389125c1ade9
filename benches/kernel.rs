use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use condensed::linalg::{bidiagonal_qr, tridiagonal_qr, QrSettings};
use condensed::Mat;

// ---------------------------------------------------------------------------
// Helpers: deterministic test matrices
// ---------------------------------------------------------------------------

fn entry(i: usize, j: usize) -> f64 {
    ((i * 7 + j * 3) % 11) as f64 - 5.0 + if i == j { 0.5 } else { 0.0 }
}

fn condensed_general(n: usize) -> Mat<f64> {
    Mat::from_fn(n, n, entry)
}

fn nalgebra_general(n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(n, n, entry)
}

fn condensed_symmetric(n: usize) -> Mat<f64> {
    Mat::from_fn(n, n, |i, j| entry(i, j) + entry(j, i))
}

fn nalgebra_symmetric(n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(n, n, |i, j| entry(i, j) + entry(j, i))
}

fn bidiagonal(n: usize) -> (Vec<f64>, Vec<f64>) {
    let d = (0..n).map(|i| 1.0 + (i % 5) as f64).collect();
    let e = (0..n - 1).map(|i| 0.5 + (i % 3) as f64).collect();
    (d, e)
}

const SIZES: [usize; 4] = [4, 16, 64, 128];

// ---------------------------------------------------------------------------
// Full decompositions
// ---------------------------------------------------------------------------

fn svd(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd");
    for n in SIZES {
        g.bench_with_input(BenchmarkId::new("condensed", n), &n, |b, &n| {
            let a = condensed_general(n);
            b.iter(|| std::hint::black_box(&a).svd())
        });
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = nalgebra_general(n);
            b.iter(|| std::hint::black_box(&a).clone().svd(true, true))
        });
    }
    g.finish();
}

fn eigen_symmetric(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigen_symmetric");
    for n in SIZES {
        g.bench_with_input(BenchmarkId::new("condensed", n), &n, |b, &n| {
            let a = condensed_symmetric(n);
            b.iter(|| std::hint::black_box(&a).eig_symmetric())
        });
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = nalgebra_symmetric(n);
            b.iter(|| std::hint::black_box(&a).clone().symmetric_eigen())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Raw QR drivers on condensed forms
// ---------------------------------------------------------------------------

fn bidiagonal_driver(c: &mut Criterion) {
    let mut g = c.benchmark_group("bidiagonal_qr");
    for n in SIZES {
        let (d0, e0) = bidiagonal(n);
        g.bench_with_input(BenchmarkId::new("values", n), &n, |b, _| {
            b.iter(|| {
                let (mut d, mut e) = (d0.clone(), e0.clone());
                bidiagonal_qr::<f64, Mat<f64>, Mat<f64>>(
                    &mut d,
                    &mut e,
                    None,
                    None,
                    &QrSettings::default(),
                )
                .map(|_| d)
            })
        });
        g.bench_with_input(BenchmarkId::new("vectors", n), &n, |b, &n| {
            b.iter(|| {
                let (mut d, mut e) = (d0.clone(), e0.clone());
                let mut u = Mat::<f64>::identity(n);
                let mut v = Mat::<f64>::identity(n);
                bidiagonal_qr::<f64, _, _>(
                    &mut d,
                    &mut e,
                    Some(&mut u),
                    Some(&mut v),
                    &QrSettings::default(),
                )
                .map(|_| (d, u, v))
            })
        });
    }
    g.finish();
}

fn tridiagonal_driver(c: &mut Criterion) {
    let mut g = c.benchmark_group("tridiagonal_qr");
    for n in SIZES {
        let (d0, e0) = bidiagonal(n);
        g.bench_with_input(BenchmarkId::new("vectors", n), &n, |b, &n| {
            b.iter(|| {
                let (mut d, mut e) = (d0.clone(), e0.clone());
                let mut q = Mat::<f64>::identity(n);
                tridiagonal_qr::<f64, _>(&mut d, &mut e, Some(&mut q), &QrSettings::default())
                    .map(|_| (d, q))
            })
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    svd,
    eigen_symmetric,
    bidiagonal_driver,
    tridiagonal_driver,
);
criterion_main!(benches);

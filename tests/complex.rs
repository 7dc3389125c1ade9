#![cfg(feature = "complex")]

use condensed::linalg::{bidiagonal_qr, PlaneRotation, QrSettings, Svd, SymmetricEigen};
use condensed::{Complex, Mat};

type C = Complex<f64>;

fn c(re: f64, im: f64) -> C {
    Complex::new(re, im)
}

const TOL: f64 = 1e-12;

fn assert_complex_near(a: C, b: C, tol: f64, msg: &str) {
    assert!(
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
        "{}: {:?} vs {:?}",
        msg,
        a,
        b
    );
}

fn unitarity_error(q: &Mat<C>) -> f64 {
    (&(&q.adjoint() * q) - &Mat::identity(q.ncols())).norm_fro()
}

fn general(m: usize, n: usize) -> Mat<C> {
    Mat::from_fn(m, n, |i, j| {
        let (x, y) = (i as f64, j as f64);
        c((1.3 * x + 0.7 * y).sin() + 0.1, (0.4 * x - 1.1 * y).cos())
    })
}

fn hermitian(n: usize) -> Mat<C> {
    let a = general(n, n);
    Mat::from_fn(n, n, |i, j| (a[(i, j)] + a[(j, i)].conj()) * 0.5)
}

// ── Plane rotations ─────────────────────────────────────────────────

#[test]
fn complex_rotation_annihilates() {
    let x = c(1.0, 2.0);
    let y = c(-3.0, 0.5);
    let (g, r) = PlaneRotation::make(x, y);
    assert!(g.c >= 0.0);
    assert!((g.c * g.c + g.s.norm_sqr() - 1.0).abs() < 1e-15);

    let (top, bottom) = g.apply(x, y);
    assert_complex_near(top, r, 1e-14, "r");
    assert_complex_near(bottom, c(0.0, 0.0), 1e-14, "annihilated");

    // r keeps the phase of x.
    let norm = (x.norm_sqr() + y.norm_sqr()).sqrt();
    assert_complex_near(r, x / x.norm() * norm, 1e-14, "phase");
}

#[test]
fn complex_rotation_with_zero_first_entry() {
    let (g, r) = PlaneRotation::make(c(0.0, 0.0), c(0.0, 2.0));
    assert_eq!(g.c, 0.0);
    assert_complex_near(r, c(2.0, 0.0), 1e-15, "r is real");
    let (_, bottom) = g.apply(c(0.0, 0.0), c(0.0, 2.0));
    assert_complex_near(bottom, c(0.0, 0.0), 1e-15, "annihilated");
}

// ── Svd ─────────────────────────────────────────────────────────────

fn check_svd(a: &Mat<C>) {
    let (m, n) = (a.nrows(), a.ncols());
    let svd = Svd::new(a).unwrap();
    let s = svd.singular_values();
    assert_eq!(s.len(), m.min(n));
    assert!(s.iter().all(|&x| x >= 0.0));
    assert!(s.windows(2).all(|w| w[0] >= w[1]), "order: {:?}", s);

    let mut sigma = Mat::<C>::zeros(m, n);
    for (i, &x) in s.iter().enumerate() {
        sigma[(i, i)] = c(x, 0.0);
    }
    let r = &(svd.u() * &sigma) * svd.vt();
    assert!((&r - a).norm_fro() / a.norm_fro() < TOL, "{}x{} reconstruction", m, n);
    assert!(unitarity_error(svd.u()) < TOL, "{}x{} U", m, n);
    assert!(unitarity_error(&svd.vt().adjoint()) < TOL, "{}x{} V", m, n);
}

#[test]
fn complex_svd_square() {
    check_svd(&general(4, 4));
}

#[test]
fn complex_svd_tall_and_wide() {
    check_svd(&general(6, 3));
    check_svd(&general(3, 6));
}

#[test]
fn complex_svd_of_phase_diagonal() {
    // diag(2i, -3, 1 - i): singular values are the moduli.
    let mut a = Mat::<C>::zeros(3, 3);
    a[(0, 0)] = c(0.0, 2.0);
    a[(1, 1)] = c(-3.0, 0.0);
    a[(2, 2)] = c(1.0, -1.0);
    let s = a.singular_values().unwrap();
    assert!((s[0] - 3.0).abs() < 1e-14);
    assert!((s[1] - 2.0).abs() < 1e-14);
    assert!((s[2] - 2f64.sqrt()).abs() < 1e-14);
    check_svd(&a);
}

#[test]
fn complex_svd_frobenius_identity() {
    let a = general(5, 4);
    let s = a.singular_values().unwrap();
    let sum: f64 = s.iter().map(|x| x * x).sum();
    let fro = a.norm_fro();
    assert!((sum - fro * fro).abs() < 1e-12 * fro * fro);
}

// ── SymmetricEigen ──────────────────────────────────────────────────

#[test]
fn hermitian_eigen_reconstruction() {
    for n in [1usize, 2, 3, 5, 8] {
        let a = hermitian(n);
        let eig = SymmetricEigen::new(&a).unwrap();
        let l = eig.eigenvalues();
        let q = eig.eigenvectors();
        assert!(l.windows(2).all(|w| w[0].abs() >= w[1].abs()), "order: {:?}", l);

        let r = &q.mul_diag(l) * &q.adjoint();
        let scale = a.norm_fro().max(1.0);
        assert!((&r - &a).norm_fro() / scale < TOL, "n = {} reconstruction", n);
        assert!(unitarity_error(q) < TOL, "n = {} QᴴQ", n);
    }
}

#[test]
fn hermitian_2x2_closed_form() {
    // [[2, i], [-i, 2]] has eigenvalues 3 and 1.
    let a = Mat::from_rows(2, 2, &[c(2.0, 0.0), c(0.0, 1.0), c(0.0, -1.0), c(2.0, 0.0)]);
    let l = a.eigenvalues_symmetric().unwrap();
    assert!((l[0] - 3.0).abs() < 1e-14);
    assert!((l[1] - 1.0).abs() < 1e-14);
}

#[test]
fn hermitian_trace_is_real_sum() {
    let a = hermitian(6);
    let l = a.eigenvalues_symmetric().unwrap();
    let trace: f64 = (0..6).map(|i| a[(i, i)].re).sum();
    assert!((l.iter().sum::<f64>() - trace).abs() < 1e-12);
}

// ── Raw driver with complex accumulators ────────────────────────────

#[test]
fn real_bidiagonal_with_complex_accumulators() {
    // Real condensed entries, complex unitary accumulators: the update
    // U ← U·Gᵀ applied to a non-trivial complex U keeps U·B·Vᴴ invariant.
    let n = 4;
    let mut d = vec![1.0_f64, 2.0, -0.5, 3.0];
    let mut e = vec![0.7_f64, -1.2, 0.4];
    let b = Mat::from_bidiagonal(
        &d.iter().map(|&x| c(x, 0.0)).collect::<Vec<_>>(),
        &e.iter().map(|&x| c(x, 0.0)).collect::<Vec<_>>(),
    );

    let phases = [c(0.0, 1.0), c(-1.0, 0.0), c(0.6, 0.8), c(1.0, 0.0)];
    let mut u = Mat::from_fn(n, n, |i, j| if i == j { phases[i] } else { c(0.0, 0.0) });
    let mut v = Mat::<C>::identity(n);
    let before = &(&u * &b) * &v.adjoint();

    bidiagonal_qr::<C, _, _>(&mut d, &mut e, Some(&mut u), Some(&mut v), &QrSettings::default())
        .unwrap();
    assert!(e.iter().all(|&x| x == 0.0));

    let after = &u.mul_diag(&d) * &v.adjoint();
    assert!((&after - &before).norm_fro() < TOL);
    assert!(unitarity_error(&u) < TOL);
    assert!(unitarity_error(&v) < TOL);
}

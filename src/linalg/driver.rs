use core::ops::Range;

use num_traits::Zero;

use crate::linalg::deflate::{chop_small, find_active_block};
use crate::linalg::shift::{bidiagonal_shift, tridiagonal_shift};
use crate::linalg::sweep::{
    bidiagonal_exact_step, bidiagonal_sweep, chase_zero_diagonal_col, chase_zero_diagonal_row,
    tridiagonal_exact_step, tridiagonal_sweep,
};
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, LinalgScalar, MatrixMut};

const TARGET: &str = "condensed";

/// Settings for the implicit-shift QR drivers.
///
/// # Example
///
/// ```
/// use condensed::linalg::QrSettings;
///
/// let settings = QrSettings::<f64> {
///     max_sweeps_factor: 60,
///     ..Default::default()
/// };
/// assert_eq!(settings.epsilon, f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrSettings<R> {
    /// Relative deflation tolerance.
    pub epsilon: R,
    /// The driver gives up after `max_sweeps_factor · N²` steps
    /// (never fewer than `max_sweeps_factor`).
    pub max_sweeps_factor: usize,
}

impl<R: FloatScalar> Default for QrSettings<R> {
    fn default() -> Self {
        Self {
            epsilon: R::epsilon(),
            max_sweeps_factor: 30,
        }
    }
}

impl<R> QrSettings<R> {
    fn budget(&self, n: usize) -> usize {
        self.max_sweeps_factor
            .saturating_mul(n)
            .saturating_mul(n)
            .max(self.max_sweeps_factor)
    }
}

/// Work done by a driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QrStats {
    /// Shifted bulge-chasing sweeps.
    pub sweeps: usize,
    /// 2×2 blocks solved in closed form.
    pub exact_blocks: usize,
    /// Zero-diagonal annihilations (bidiagonal only).
    pub splits: usize,
}

/// Factor to divide a condensed form by so that squaring its entries
/// neither overflows nor loses the low-order entries to underflow.
///
/// `None` when the entries are already in a safe range, all zero, or
/// non-finite.
fn safe_scale<R: FloatScalar>(d: &[R], e: &[R]) -> Option<R> {
    let amax = d.iter().chain(e.iter()).fold(R::zero(), |acc, x| acc.max(x.abs()));
    if amax == R::zero() || !amax.is_finite() {
        return None;
    }
    let four = R::one() + R::one() + R::one() + R::one();
    let big = R::max_value().sqrt() / four;
    let small = R::min_positive_value().sqrt() / R::epsilon();
    if amax > big || amax < small {
        Some(amax)
    } else {
        None
    }
}

fn rescale<R: FloatScalar>(d: &mut [R], e: &mut [R], factor: R, unscale: bool) {
    for x in d.iter_mut().chain(e.iter_mut()) {
        *x = if unscale { *x * factor } else { *x / factor };
    }
}

fn check_accumulator<T, M: MatrixMut<T> + ?Sized>(m: &Option<&mut M>, n: usize, name: &str) {
    if let Some(m) = m {
        assert!(
            m.ncols() >= n,
            "accumulator {} has {} columns, need at least {}",
            name,
            m.ncols(),
            n
        );
    }
}

/// Shared loop state: one budget across the whole call, including recursion.
struct Budget {
    remaining: usize,
    stats: QrStats,
}

impl Budget {
    fn charge(&mut self) -> Result<(), LinalgError> {
        if self.remaining == 0 {
            log::warn!(
                target: TARGET,
                "sweep budget exhausted after {} sweeps, {} exact blocks, {} splits",
                self.stats.sweeps,
                self.stats.exact_blocks,
                self.stats.splits
            );
            return Err(LinalgError::ConvergenceFailure);
        }
        self.remaining -= 1;
        Ok(())
    }
}

// ── Bidiagonal ──────────────────────────────────────────────────────

struct BidiagonalQr<'a, T: LinalgScalar, U: ?Sized, V: ?Sized> {
    d: &'a mut [T::Real],
    e: &'a mut [T::Real],
    u: Option<&'a mut U>,
    v: Option<&'a mut V>,
    eps: T::Real,
    budget: Budget,
}

impl<T, U, V> BidiagonalQr<'_, T, U, V>
where
    T: LinalgScalar,
    U: MatrixMut<T> + ?Sized,
    V: MatrixMut<T> + ?Sized,
{
    /// Diagonalize the entries `range`, whose boundary off-diagonals are zero.
    fn run(&mut self, range: Range<usize>) -> Result<(), LinalgError> {
        let zero = <T::Real as Zero>::zero();
        let mut end = range.end;

        loop {
            chop_small(self.d, self.e, self.eps);
            let local = find_active_block(&self.e[range.start..], end - range.start);
            if local.is_empty() {
                return Ok(());
            }
            let block = (range.start + local.start)..(range.start + local.end);
            end = block.end;
            self.budget.charge()?;

            let last = block.end - 1;
            if let Some(i) = block.clone().rev().find(|&i| self.d[i] == zero) {
                self.budget.stats.splits += 1;
                if i == last {
                    log::debug!(target: TARGET, "zero diagonal at {} closes block {:?}", i, block);
                    chase_zero_diagonal_col::<T, V>(
                        self.d,
                        self.e,
                        block,
                        self.v.as_deref_mut(),
                    );
                } else {
                    log::debug!(target: TARGET, "zero diagonal at {} splits block {:?}", i, block);
                    chase_zero_diagonal_row::<T, U>(
                        self.d,
                        self.e,
                        i,
                        block.end,
                        self.u.as_deref_mut(),
                    );
                    self.run(block.start..i + 1)?;
                    self.run(i + 1..block.end)?;
                    end = block.start;
                }
                continue;
            }

            if block.len() == 2 {
                bidiagonal_exact_step::<T, U, V>(
                    self.d,
                    self.e,
                    block.start,
                    self.u.as_deref_mut(),
                    self.v.as_deref_mut(),
                );
                self.budget.stats.exact_blocks += 1;
            } else {
                let mu = bidiagonal_shift(self.d, self.e, block.clone());
                log::trace!(target: TARGET, "bidiagonal sweep on {:?}, shift {:?}", block, mu);
                bidiagonal_sweep::<T, U, V>(
                    self.d,
                    self.e,
                    block,
                    mu,
                    self.u.as_deref_mut(),
                    self.v.as_deref_mut(),
                );
                self.budget.stats.sweeps += 1;
            }
        }
    }
}

/// Diagonalize the upper bidiagonal matrix `B = bidiag(d, e)` by
/// implicit-shift QR iteration (Golub-Kahan).
///
/// On return `e` is zero and `d` holds the singular values of `B` up to sign,
/// in no particular order (see [`sort_singular_values`](super::sort_singular_values)).
/// If `U` and `V` are given, every left rotation is applied to the columns of
/// `U` and every right rotation to the columns of `V`, so `U · B · Vᴴ` is
/// unchanged. Passing the factors of a reduction `A = U · B · Vᴴ` therefore
/// yields the SVD of `A`.
///
/// # Panics
///
/// If `e.len() + 1 != d.len()` (for non-empty `d`) or an accumulator has
/// fewer than `d.len()` columns.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] when the sweep budget of
/// [`QrSettings`] runs out, which in practice only happens for NaN or
/// infinite input. `d` and `e` are left in a consistent, partially reduced
/// state.
///
/// # Example
///
/// ```
/// use condensed::linalg::{bidiagonal_qr, QrSettings};
/// use condensed::Mat;
///
/// let mut d = [3.0_f64, 1.0];
/// let mut e = [4.0];
/// bidiagonal_qr::<f64, Mat<f64>, Mat<f64>>(&mut d, &mut e, None, None, &QrSettings::default())
///     .unwrap();
/// assert_eq!(e[0], 0.0);
/// assert!((d[0] * d[0] + d[1] * d[1] - 26.0).abs() < 1e-12);
/// assert!(((d[0] * d[1]).abs() - 3.0).abs() < 1e-12);
/// ```
pub fn bidiagonal_qr<T, U, V>(
    d: &mut [T::Real],
    e: &mut [T::Real],
    u: Option<&mut U>,
    v: Option<&mut V>,
    settings: &QrSettings<T::Real>,
) -> Result<QrStats, LinalgError>
where
    T: LinalgScalar,
    U: MatrixMut<T> + ?Sized,
    V: MatrixMut<T> + ?Sized,
{
    let n = d.len();
    assert_eq!(
        e.len(),
        n.saturating_sub(1),
        "bidiagonal form needs len(e) = len(d) - 1"
    );
    check_accumulator::<T, U>(&u, n, "U");
    check_accumulator::<T, V>(&v, n, "V");
    if n <= 1 {
        return Ok(QrStats::default());
    }

    let scale = safe_scale(d, e);
    if let Some(s) = scale {
        log::debug!(target: TARGET, "scaling bidiagonal form by {:?}", s);
        rescale(d, e, s, false);
    }

    let mut qr = BidiagonalQr::<T, U, V> {
        d: &mut *d,
        e: &mut *e,
        u,
        v,
        eps: settings.epsilon,
        budget: Budget {
            remaining: settings.budget(n),
            stats: QrStats::default(),
        },
    };
    let result = qr.run(0..n);
    let stats = qr.budget.stats;

    if let Some(s) = scale {
        rescale(d, e, s, true);
    }
    result.map(|()| stats)
}

// ── Symmetric tridiagonal ───────────────────────────────────────────

/// Diagonalize the symmetric tridiagonal matrix `T = tridiag(e, d, e)` by
/// implicit-shift QR iteration.
///
/// On return `e` is zero and `d` holds the eigenvalues of `T` in no
/// particular order. If `Q` is given its columns receive every rotation, so
/// `Q · T · Qᴴ` is unchanged; starting from the factor of a reduction
/// `A = Q · T · Qᴴ` this yields the eigenvectors of `A`.
///
/// # Panics
///
/// If `e.len() + 1 != d.len()` (for non-empty `d`) or `Q` has fewer than
/// `d.len()` columns.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] when the sweep budget runs out.
///
/// # Example
///
/// ```
/// use condensed::linalg::{tridiagonal_qr, QrSettings};
/// use condensed::Mat;
///
/// // [[2, -1], [-1, 2]] has eigenvalues 1 and 3.
/// let mut d = [2.0_f64, 2.0];
/// let mut e = [-1.0];
/// let mut q = Mat::<f64>::identity(2);
/// tridiagonal_qr::<f64, _>(&mut d, &mut e, Some(&mut q), &QrSettings::default()).unwrap();
/// d.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert!((d[0] - 1.0).abs() < 1e-14);
/// assert!((d[1] - 3.0).abs() < 1e-14);
/// ```
pub fn tridiagonal_qr<T, Q>(
    d: &mut [T::Real],
    e: &mut [T::Real],
    mut q: Option<&mut Q>,
    settings: &QrSettings<T::Real>,
) -> Result<QrStats, LinalgError>
where
    T: LinalgScalar,
    Q: MatrixMut<T> + ?Sized,
{
    let n = d.len();
    assert_eq!(
        e.len(),
        n.saturating_sub(1),
        "tridiagonal form needs len(e) = len(d) - 1"
    );
    check_accumulator::<T, Q>(&q, n, "Q");
    if n <= 1 {
        return Ok(QrStats::default());
    }

    let scale = safe_scale(d, e);
    if let Some(s) = scale {
        log::debug!(target: TARGET, "scaling tridiagonal form by {:?}", s);
        rescale(d, e, s, false);
    }

    let mut budget = Budget {
        remaining: settings.budget(n),
        stats: QrStats::default(),
    };
    let mut end = n;
    let result = loop {
        chop_small(d, e, settings.epsilon);
        let block = find_active_block(e, end);
        if block.is_empty() {
            break Ok(());
        }
        end = block.end;
        if let Err(err) = budget.charge() {
            break Err(err);
        }

        if block.len() == 2 {
            tridiagonal_exact_step::<T, Q>(d, e, block.start, q.as_deref_mut());
            budget.stats.exact_blocks += 1;
        } else {
            let mu = tridiagonal_shift(d, e, block.clone());
            log::trace!(target: TARGET, "tridiagonal sweep on {:?}, shift {:?}", block, mu);
            tridiagonal_sweep::<T, Q>(d, e, block, mu, q.as_deref_mut());
            budget.stats.sweeps += 1;
        }
    };

    if let Some(s) = scale {
        rescale(d, e, s, true);
    }
    result.map(|()| budget.stats)
}

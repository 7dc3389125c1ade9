//! # condensed
//!
//! Implicit-shift QR iteration on real bidiagonal and symmetric tridiagonal
//! matrices, the kernel behind dense SVD and symmetric eigensolvers.
//! Pure Rust, no-std compatible.
//!
//! ## Quick start
//!
//! ```
//! use condensed::Mat;
//!
//! let a = Mat::from_rows(3, 2, &[3.0_f64, 0.0, 4.0, 5.0, 0.0, 0.0]);
//! let svd = a.svd().unwrap();
//! let s = svd.singular_values();
//! assert!(s[0] >= s[1]);
//! // ‖A‖²_F = Σ σ²
//! assert!((s[0] * s[0] + s[1] * s[1] - 50.0).abs() < 1e-12);
//! ```
//!
//! Working directly on a condensed form, without allocating:
//!
//! ```
//! use condensed::linalg::{bidiagonal_qr, sort_singular_values, QrSettings};
//! use condensed::Mat;
//!
//! let mut d = [3.0_f64, 1.0];
//! let mut e = [4.0];
//! bidiagonal_qr::<f64, Mat<f64>, Mat<f64>>(&mut d, &mut e, None, None, &QrSettings::default())
//!     .unwrap();
//! sort_singular_values::<f64, Mat<f64>, Mat<f64>>(&mut d, None, None);
//! assert!((d[0] * d[1] - 3.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`linalg`]: plane rotations, deflation, Wilkinson shifts, bulge-chasing
//!   sweeps and the bidiagonal / tridiagonal QR drivers. Free functions
//!   operate on `&mut [R]` plus any [`MatrixMut`] accumulator. With `alloc`:
//!   Householder reducers and the [`linalg::Svd`] / [`linalg::SymmetricEigen`]
//!   wrappers.
//!
//! - [`matrix`]: heap-allocated column-major [`Mat<T>`] (requires `alloc`,
//!   included with `std`).
//!
//! - [`view`]: the [`Transposed`] adapter, for accumulators stored in the
//!   opposite orientation. Allocation-free.
//!
//! - [`traits`]: element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats, the type of condensed-form entries
//!   - [`LinalgScalar`]: real floats and complex numbers, the accumulator element type
//!   - [`MatrixRef`] / [`MatrixMut`]: storage-agnostic element access
//!
//! ## Complex matrices
//!
//! Enable the `complex` feature to decompose `Complex<f32>` / `Complex<f64>`
//! matrices. The reducers move all complex phases into the unitary factors,
//! so the QR iteration itself always runs on real data.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade with target
//! `condensed`: sweeps at `trace`, block splits and input scaling at `debug`,
//! exhausted sweep budgets at `warn`. No logger is installed by the crate.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Implies `alloc`. Hardware FPU via system libm |
//! | `alloc`   | via std  | `Mat<T>`, reducers, `Svd`, `SymmetricEigen` |
//! | `complex` | no       | `Complex<f32>` / `Complex<f64>` support via `num-complex` |
//! | `all`     | no       | All features: `std` + `complex` |

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod linalg;
#[cfg(feature = "alloc")]
pub mod matrix;
pub mod traits;
pub mod view;

#[cfg(feature = "alloc")]
pub use matrix::Mat;
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};
pub use view::Transposed;

#[cfg(feature = "complex")]
pub use num_complex::Complex;

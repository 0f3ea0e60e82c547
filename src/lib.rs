//! # siglab - Spectral analysis and audio feature extraction for Rust
//!
//! A `no_std + alloc` Digital Signal Processing (DSP) library covering
//! spectral transforms (FFT, DCT, Hartley, Hilbert), statistical and
//! spectral feature extraction, and streaming fixed-window filters.
//!
//! ## Features
//!
//! - **Transforms**: complex FFT/IFFT for any length (radix-2 plus
//!   Bluestein chirp-z), real-input `rfft`/`irfft`, orthonormal DCT-II/III,
//!   Hartley, analytic signal via Hilbert, power spectrum
//! - **Spectral tools**: linear convolution and cross-correlation computed
//!   in the frequency domain
//! - **Features**: spectral centroid, spread, flux, rolloff, flatness,
//!   crest, entropy, plus time-domain energy, RMS and zero-crossing rate
//! - **Statistics**: moments, skewness, kurtosis, geometric/harmonic means,
//!   median and friends over sample slices
//! - **Streaming filters**: moving average, RMS and median over a
//!   fixed-capacity window with O(1)/O(log n) updates
//! - **`no_std` friendly**: transcendentals go through `libm`; the `std`
//!   feature only adds `std::error::Error` for [`DspError`]
//!
//! ## Cargo Features
//!
//! - `std` (default): implement `std::error::Error` for the error type
//!
//! ## Example
//!
//! ```
//! use siglab::{FftEngine, features};
//!
//! let engine = FftEngine::<f64>::new();
//! let signal = [1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0];
//! let power = engine.spectrum(&signal).unwrap();
//! let axis: Vec<f64> = (0..power.len()).map(|k| k as f64).collect();
//! let centroid = features::spectral_centroid(&power, &axis).unwrap();
//! assert!(centroid > 0.0);
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license (https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Scalar [`Float`] abstraction and the [`Complex`] type used by the
/// spectral engines.
pub mod num;

/// Crate-wide error taxonomy; every fallible operation returns
/// [`error::Result`].
pub mod error;

/// Complex and real-input Fourier transforms with cached plans.
pub mod fft;

/// Orthonormal discrete cosine transforms (DCT-II and DCT-III).
pub mod dct;

/// Frequency-domain convolution, correlation, Hilbert and Hartley
/// transforms, and the power spectrum.
pub mod spectral;

/// Descriptive statistics over sample slices.
pub mod stats;

/// Spectral and temporal feature extraction.
pub mod features;

/// Streaming fixed-window filters (moving average, RMS, median).
pub mod filters;

pub use dct::DctPlanner;
pub use error::{DspError, Result};
pub use fft::{FftEngine, FftStrategy};
pub use filters::{MovingAverage, MovingMedian, MovingRms, StreamingFilter};
pub use num::{Complex, Complex32, Complex64, Float};

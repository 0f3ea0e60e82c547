//! Spectral operations built on the complex FFT kernel: linear convolution,
//! cross-correlation, analytic signal (Hilbert), Hartley transform and the
//! periodogram.
//!
//! Convolution and correlation run through zero-padded frequency-domain
//! multiplication for larger inputs and fall back to direct summation when
//! the operands are short enough that padding overhead dominates.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::Result;
use crate::fft::FftEngine;
use crate::num::{Complex, Float};

/// Below this combined operand length, convolution and correlation use
/// direct summation instead of the FFT path.
const DIRECT_PATH_MAX: usize = 64;

impl<T: Float> FftEngine<T> {
    /// Full linear convolution of `a` and `b`, length `a.len() + b.len() - 1`.
    ///
    /// Callers wanting the reference prefix of `n` samples truncate the
    /// result. Either operand being empty yields an empty result.
    pub fn conv(&self, a: &[T], b: &[T]) -> Result<Vec<T>> {
        if a.is_empty() || b.is_empty() {
            return Ok(Vec::new());
        }
        let out_len = a.len() + b.len() - 1;
        if a.len() + b.len() <= DIRECT_PATH_MAX {
            return Ok(conv_direct(a, b, out_len));
        }

        let m = out_len.next_power_of_two();
        let fa = self.fft(&pad_real(a, m))?;
        let fb = self.fft(&pad_real(b, m))?;
        let product: Vec<Complex<T>> =
            fa.iter().zip(fb.iter()).map(|(&x, &y)| x * y).collect();
        let time = self.ifft(&product)?;
        Ok(time.into_iter().take(out_len).map(|c| c.re).collect())
    }

    /// Cross-correlation at non-negative lags, length `a.len()`.
    ///
    /// `out[k] = Σ a[i + k] · b[i]` over the overlap, so `out[0]` is the
    /// zero-lag dot product and the sequence equals the second half of the
    /// full correlation starting at zero lag.
    pub fn xcorr(&self, a: &[T], b: &[T]) -> Result<Vec<T>> {
        if a.is_empty() || b.is_empty() {
            return Ok(Vec::new());
        }
        if a.len() + b.len() <= DIRECT_PATH_MAX {
            return Ok(xcorr_direct(a, b));
        }

        let m = (a.len() + b.len()).next_power_of_two();
        let fa = self.fft(&pad_real(a, m))?;
        let fb = self.fft(&pad_real(b, m))?;
        let product: Vec<Complex<T>> = fa
            .iter()
            .zip(fb.iter())
            .map(|(&x, &y)| x * y.conj())
            .collect();
        let time = self.ifft(&product)?;
        Ok(time.into_iter().take(a.len()).map(|c| c.re).collect())
    }

    /// Analytic signal of a real sequence: same length, complex output.
    ///
    /// Positive-frequency bins are doubled and negative-frequency bins
    /// zeroed before the inverse transform, so the real part reproduces the
    /// input and the imaginary part carries its Hilbert transform.
    pub fn hilbert(&self, input: &[T]) -> Result<Vec<Complex<T>>> {
        let n = input.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut freq: Vec<Complex<T>> = input
            .iter()
            .map(|&x| Complex::new(x, T::zero()))
            .collect();
        self.forward_in_place(&mut freq)?;

        let two = T::from_f32(2.0);
        let positive_end = n.div_ceil(2);
        for bin in freq.iter_mut().take(positive_end).skip(1) {
            *bin = bin.scale(two);
        }
        let negative_start = n / 2 + 1;
        for bin in freq.iter_mut().skip(negative_start) {
            *bin = Complex::zero();
        }
        self.inverse_in_place(&mut freq)?;
        Ok(freq)
    }

    /// Discrete Hartley transform, `H[k] = Re(F[k]) − Im(F[k])`, length N.
    pub fn hartley(&self, input: &[T]) -> Result<Vec<T>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let mut freq: Vec<Complex<T>> = input
            .iter()
            .map(|&x| Complex::new(x, T::zero()))
            .collect();
        self.forward_in_place(&mut freq)?;
        Ok(freq.into_iter().map(|c| c.re - c.im).collect())
    }

    /// Periodogram: `|rfft(x)|²`, one value per non-redundant bin.
    pub fn spectrum(&self, input: &[T]) -> Result<Vec<T>> {
        let bins = self.rfft(input)?;
        Ok(bins.into_iter().map(|c| c.norm_sqr()).collect())
    }
}

fn pad_real<T: Float>(input: &[T], len: usize) -> Vec<Complex<T>> {
    let mut out = vec![Complex::zero(); len];
    for (slot, &x) in out.iter_mut().zip(input.iter()) {
        *slot = Complex::new(x, T::zero());
    }
    out
}

fn conv_direct<T: Float>(a: &[T], b: &[T], out_len: usize) -> Vec<T> {
    let mut out = vec![T::zero(); out_len];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

fn xcorr_direct<T: Float>(a: &[T], b: &[T]) -> Vec<T> {
    let mut out = vec![T::zero(); a.len()];
    for (k, slot) in out.iter_mut().enumerate() {
        let mut acc = T::zero();
        for (i, &bi) in b.iter().enumerate() {
            if let Some(&ai) = a.get(i + k) {
                acc += ai * bi;
            }
        }
        *slot = acc;
    }
    out
}

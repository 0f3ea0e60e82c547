//! Fast Fourier Transform engine.
//!
//! Complex forward/inverse transforms based on the iterative
//! [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! for power-of-two lengths and the Bluestein chirp-z algorithm for every
//! other length. An [`FftPlanner`] caches twiddle and chirp tables keyed by
//! transform length. The backend is selected explicitly at engine
//! construction through [`FftStrategy`]; there is no process-wide default.
//!
//! Public transforms are out-of-place and never mutate their inputs. Empty
//! inputs are valid and map to empty outputs.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;

use crate::error::{DspError, Result};
use crate::num::{Complex, Float};

type ChirpPair<T> = (Arc<[Complex<T>]>, Arc<[Complex<T>]>);

/// Cache of per-length twiddle and chirp tables.
///
/// The twiddle table for length `n` has `n/2` entries holding
/// `exp(-2πi k / n)` for `k = 0..n/2`; stage `len` of the radix-2 kernel
/// reads it with stride `n / len`.
pub struct FftPlanner<T: Float> {
    twiddles: HashMap<usize, Arc<[Complex<T>]>>,
    chirps: HashMap<usize, ChirpPair<T>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            twiddles: HashMap::new(),
            chirps: HashMap::new(),
        }
    }

    /// Retrieve the twiddle table for a power-of-two length `n`.
    pub fn get_twiddles(&mut self, n: usize) -> Arc<[Complex<T>]> {
        if let Some(table) = self.twiddles.get(&n) {
            return Arc::clone(table);
        }
        log::trace!("building twiddle table for n={}", n);
        let half = n / 2;
        let angle = -(T::from_f32(2.0) * T::pi()) / T::from_usize(n).unwrap_or_else(T::one);
        let (sin_step, cos_step) = angle.sin_cos();

        let mut table: Vec<Complex<T>> = Vec::with_capacity(half);
        let mut w_re = T::one();
        let mut w_im = T::zero();
        for _ in 0..half {
            table.push(Complex::new(w_re, w_im));
            let tmp = w_re;
            w_re = w_re.mul_add(cos_step, -(w_im * sin_step));
            w_im = w_im.mul_add(cos_step, tmp * sin_step);
        }
        let table: Arc<[Complex<T>]> = Arc::from(table);
        self.twiddles.insert(n, Arc::clone(&table));
        table
    }

    /// Retrieve the Bluestein chirp sequence and the FFT of its padded
    /// mirror for length `n`. The chirp angle is reduced modulo `2n` before
    /// evaluation so large indices keep full precision.
    pub fn get_chirp(&mut self, n: usize) -> ChirpPair<T> {
        if let Some(pair) = self.chirps.get(&n) {
            return (Arc::clone(&pair.0), Arc::clone(&pair.1));
        }
        log::debug!("building Bluestein chirp for n={}", n);
        let m = (2 * n - 1).next_power_of_two();
        let n_t = T::from_usize(n).unwrap_or_else(T::one);
        let mut chirp: Vec<Complex<T>> = Vec::with_capacity(n);
        let mut b: Vec<Complex<T>> = Vec::with_capacity(m);
        for i in 0..n {
            let reduced = (i * i) % (2 * n);
            let angle = T::pi() * T::from_usize(reduced).unwrap_or_else(T::zero) / n_t;
            chirp.push(Complex::expi(-angle));
            b.push(Complex::expi(angle));
        }
        b.resize(m, Complex::zero());
        for i in 1..n {
            b[m - i] = b[i];
        }
        let engine = FftEngine::with_strategy(FftStrategy::Radix2);
        let mut b_fft = b;
        // m is a power of two by construction; the radix-2 path cannot fail.
        engine
            .forward_in_place(&mut b_fft)
            .expect("power-of-two chirp length");
        let pair = (Arc::from(chirp), Arc::from(b_fft));
        self.chirps.insert(n, (Arc::clone(&pair.0), Arc::clone(&pair.1)));
        pair
    }
}

/// Backend selector injected at [`FftEngine`] construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FftStrategy {
    /// Radix-2 for power-of-two lengths, Bluestein otherwise.
    #[default]
    Auto,
    /// Power-of-two Cooley–Tukey only; other lengths are rejected.
    Radix2,
    /// Bluestein chirp-z for every length.
    Bluestein,
}

/// Spectral transform engine.
///
/// Holds a planner behind a `RefCell`, so one engine serves repeated
/// transforms without rebuilding tables but is not `Sync`; use one engine
/// per thread.
pub struct FftEngine<T: Float> {
    planner: RefCell<FftPlanner<T>>,
    strategy: FftStrategy,
}

impl<T: Float> Default for FftEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftEngine<T> {
    /// Engine with the [`FftStrategy::Auto`] backend.
    pub fn new() -> Self {
        Self::with_strategy(FftStrategy::Auto)
    }

    /// Engine with an explicitly selected backend.
    pub fn with_strategy(strategy: FftStrategy) -> Self {
        Self {
            planner: RefCell::new(FftPlanner::new()),
            strategy,
        }
    }

    pub fn strategy(&self) -> FftStrategy {
        self.strategy
    }

    /// Unnormalized forward transform of a complex sequence.
    pub fn fft(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        let mut data = input.to_vec();
        self.forward_in_place(&mut data)?;
        Ok(data)
    }

    /// `1/N`-normalized inverse transform, so `ifft(fft(x)) == x`.
    pub fn ifft(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        let mut data = input.to_vec();
        self.inverse_in_place(&mut data)?;
        Ok(data)
    }

    /// Forward transform of a real sequence, returning the `⌊N/2⌋ + 1`
    /// non-redundant bins from DC upward.
    ///
    /// `N = 0` is the one exception to the bin-count rule: an empty input
    /// yields an empty output rather than a lone DC bin.
    pub fn rfft(&self, input: &[T]) -> Result<Vec<Complex<T>>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let mut data: Vec<Complex<T>> = input
            .iter()
            .map(|&x| Complex::new(x, T::zero()))
            .collect();
        self.forward_in_place(&mut data)?;
        data.truncate(input.len() / 2 + 1);
        Ok(data)
    }

    /// Reconstruct a real sequence of `target_len` samples from its
    /// non-redundant spectrum.
    ///
    /// The target length is explicit because `⌊N/2⌋ + 1` bins cannot
    /// distinguish an even-length original from the odd length one bin
    /// shorter. Fails with [`DspError::MismatchedLengths`] unless
    /// `bins.len() == target_len / 2 + 1`.
    pub fn irfft(&self, bins: &[Complex<T>], target_len: usize) -> Result<Vec<T>> {
        if target_len == 0 {
            return if bins.is_empty() {
                Ok(Vec::new())
            } else {
                Err(DspError::MismatchedLengths)
            };
        }
        if bins.len() != target_len / 2 + 1 {
            return Err(DspError::MismatchedLengths);
        }
        let n = target_len;
        let mut full = vec![Complex::zero(); n];
        full[..bins.len()].copy_from_slice(bins);
        for (k, bin) in bins.iter().enumerate().skip(1) {
            let mirror = n - k;
            if mirror > n / 2 {
                full[mirror] = bin.conj();
            }
        }
        self.inverse_in_place(&mut full)?;
        Ok(full.into_iter().map(|c| c.re).collect())
    }

    pub(crate) fn forward_in_place(&self, data: &mut [Complex<T>]) -> Result<()> {
        let n = data.len();
        if n <= 1 {
            return Ok(());
        }
        match self.strategy {
            FftStrategy::Radix2 => {
                if !n.is_power_of_two() {
                    return Err(DspError::InvalidRange);
                }
                self.radix2_in_place(data);
                Ok(())
            }
            FftStrategy::Bluestein => {
                self.bluestein_in_place(data);
                Ok(())
            }
            FftStrategy::Auto => {
                if n.is_power_of_two() {
                    self.radix2_in_place(data);
                } else {
                    self.bluestein_in_place(data);
                }
                Ok(())
            }
        }
    }

    pub(crate) fn inverse_in_place(&self, data: &mut [Complex<T>]) -> Result<()> {
        let n = data.len();
        if n <= 1 {
            return Ok(());
        }
        for c in data.iter_mut() {
            *c = c.conj();
        }
        self.forward_in_place(data)?;
        let scale = T::one() / T::from_usize(n).unwrap_or_else(T::one);
        for c in data.iter_mut() {
            *c = c.conj().scale(scale);
        }
        Ok(())
    }

    /// Iterative decimation-in-time kernel over a bit-reversed permutation.
    fn radix2_in_place(&self, data: &mut [Complex<T>]) {
        let n = data.len();
        debug_assert!(n.is_power_of_two() && n > 1);
        let twiddles = self.planner.borrow_mut().get_twiddles(n);

        let mut j = 0usize;
        for i in 1..n {
            let mut bit = n >> 1;
            while j & bit != 0 {
                j ^= bit;
                bit >>= 1;
            }
            j |= bit;
            if i < j {
                data.swap(i, j);
            }
        }

        let mut len = 2usize;
        while len <= n {
            let half = len / 2;
            let stride = n / len;
            for base in (0..n).step_by(len) {
                for k in 0..half {
                    let w = twiddles[k * stride];
                    let u = data[base + k];
                    let v = data[base + k + half] * w;
                    data[base + k] = u + v;
                    data[base + k + half] = u - v;
                }
            }
            len <<= 1;
        }
    }

    /// Bluestein chirp-z transform: expresses the length-`n` DFT as a
    /// convolution of chirp-modulated sequences over a padded power of two.
    ///
    /// The inner transforms go through [`Self::radix2_in_place`] directly,
    /// so the padded-length twiddle tables live in this engine's planner
    /// cache. The inverse is inlined via the conjugation identity with a
    /// `1/m` scale.
    fn bluestein_in_place(&self, data: &mut [Complex<T>]) {
        let n = data.len();
        debug_assert!(n > 1);
        let (chirp, b_fft) = self.planner.borrow_mut().get_chirp(n);
        let m = b_fft.len();

        let mut a = vec![Complex::zero(); m];
        for i in 0..n {
            a[i] = data[i] * chirp[i];
        }

        self.radix2_in_place(&mut a);
        for (x, b) in a.iter_mut().zip(b_fft.iter()) {
            *x = *x * *b;
        }
        for c in a.iter_mut() {
            *c = c.conj();
        }
        self.radix2_in_place(&mut a);
        let scale = T::one() / T::from_usize(m).unwrap_or_else(T::one);
        for c in a.iter_mut() {
            *c = c.conj().scale(scale);
        }

        for k in 0..n {
            data[k] = a[k] * chirp[k];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex64;
    use proptest::prelude::*;

    fn assert_close(a: Complex64, b: Complex64, tol: f64) {
        assert!((a.re - b.re).abs() < tol, "re: {} vs {}", a.re, b.re);
        assert!((a.im - b.im).abs() < tol, "im: {} vs {}", a.im, b.im);
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let engine = FftEngine::<f64>::new();
        let mut input = vec![Complex64::zero(); 8];
        input[0] = Complex64::new(1.0, 0.0);
        let out = engine.fft(&input).unwrap();
        for bin in &out {
            assert_close(*bin, Complex64::new(1.0, 0.0), 1e-12);
        }
    }

    #[test]
    fn dc_input_concentrates_at_bin_zero() {
        let engine = FftEngine::<f64>::new();
        let input = vec![Complex64::new(1.0, 0.0); 8];
        let out = engine.fft(&input).unwrap();
        assert_close(out[0], Complex64::new(8.0, 0.0), 1e-12);
        for bin in &out[1..] {
            assert_close(*bin, Complex64::zero(), 1e-12);
        }
    }

    #[test]
    fn fft_does_not_mutate_input() {
        let engine = FftEngine::<f64>::new();
        let input = vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)];
        let _ = engine.fft(&input).unwrap();
        assert_eq!(input[0], Complex64::new(1.0, 0.0));
        assert_eq!(input[1], Complex64::new(2.0, 0.0));
    }

    #[test]
    fn roundtrip_non_power_of_two() {
        let engine = FftEngine::<f64>::new();
        let input: Vec<Complex64> = (0..7)
            .map(|i| Complex64::new(i as f64 + 0.5, -(i as f64)))
            .collect();
        let freq = engine.fft(&input).unwrap();
        let back = engine.ifft(&freq).unwrap();
        for (a, b) in input.iter().zip(back.iter()) {
            assert_close(*a, *b, 1e-9);
        }
    }

    #[test]
    fn bluestein_matches_radix2_on_pow2_lengths() {
        let radix = FftEngine::<f64>::with_strategy(FftStrategy::Radix2);
        let chirp = FftEngine::<f64>::with_strategy(FftStrategy::Bluestein);
        let input: Vec<Complex64> = (0..16)
            .map(|i| Complex64::new((i as f64).sin(), (i as f64).cos()))
            .collect();
        let a = radix.fft(&input).unwrap();
        let b = chirp.fft(&input).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_close(*x, *y, 1e-9);
        }
    }

    #[test]
    fn one_engine_serves_repeated_non_pow2_transforms() {
        // Cached chirp and twiddle tables must give the same answer on
        // every pass, and a warm engine must agree with a cold one.
        let engine = FftEngine::<f64>::new();
        let input: Vec<Complex64> = (0..12)
            .map(|i| Complex64::new((i as f64).cos(), 0.25 * i as f64))
            .collect();
        let first = engine.fft(&input).unwrap();
        let second = engine.fft(&input).unwrap();
        assert_eq!(first, second);
        let cold = FftEngine::<f64>::new().fft(&input).unwrap();
        for (a, b) in first.iter().zip(cold.iter()) {
            assert_close(*a, *b, 1e-12);
        }
        let back = engine.ifft(&second).unwrap();
        for (a, b) in input.iter().zip(back.iter()) {
            assert_close(*a, *b, 1e-9);
        }
    }

    #[test]
    fn radix2_strategy_rejects_other_lengths() {
        let engine = FftEngine::<f64>::with_strategy(FftStrategy::Radix2);
        let input = vec![Complex64::zero(); 6];
        assert_eq!(engine.fft(&input), Err(DspError::InvalidRange));
    }

    #[test]
    fn empty_and_singleton_are_identity() {
        let engine = FftEngine::<f64>::new();
        assert!(engine.fft(&[]).unwrap().is_empty());
        let single = [Complex64::new(3.0, -1.0)];
        assert_eq!(engine.fft(&single).unwrap(), single.to_vec());
        assert_eq!(engine.ifft(&single).unwrap(), single.to_vec());
    }

    #[test]
    fn rfft_bin_count_invariant() {
        let engine = FftEngine::<f64>::new();
        // Empty input is the documented exception: no bins, not one.
        assert!(engine.rfft(&[]).unwrap().is_empty());
        for n in 1..=9usize {
            let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
            assert_eq!(engine.rfft(&x).unwrap().len(), n / 2 + 1);
        }
    }

    #[test]
    fn irfft_requires_target_length() {
        let engine = FftEngine::<f64>::new();
        let x = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        let bins = engine.rfft(&x).unwrap();
        // 3 bins are compatible with length 4 and 5; only the explicit
        // target disambiguates.
        assert_eq!(engine.irfft(&bins, 3), Err(DspError::MismatchedLengths));
        let back = engine.irfft(&bins, 5).unwrap();
        for (a, b) in x.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    proptest! {
        #[test]
        fn prop_fft_ifft_roundtrip(
            len in 1usize..40,
            ref signal in proptest::collection::vec(-1000.0f64..1000.0, 40),
        ) {
            let data: Vec<Complex64> = signal
                .iter()
                .take(len)
                .map(|&x| Complex64::new(x, -x))
                .collect();
            let engine = FftEngine::<f64>::new();
            let back = engine.ifft(&engine.fft(&data).unwrap()).unwrap();
            for (a, b) in back.iter().zip(data.iter()) {
                prop_assert!((a.re - b.re).abs() < 1e-6);
                prop_assert!((a.im - b.im).abs() < 1e-6);
            }
        }

        #[test]
        fn prop_rfft_bin_count(len in 1usize..64) {
            let x: Vec<f64> = (0..len).map(|i| (i as f64).sin()).collect();
            let engine = FftEngine::<f64>::new();
            prop_assert_eq!(engine.rfft(&x).unwrap().len(), len / 2 + 1);
        }
    }

    #[test]
    fn rfft_irfft_roundtrip_even_and_odd() {
        let engine = FftEngine::<f64>::new();
        for n in [4usize, 5, 8, 11] {
            let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).sin()).collect();
            let bins = engine.rfft(&x).unwrap();
            let back = engine.irfft(&bins, n).unwrap();
            for (a, b) in x.iter().zip(back.iter()) {
                assert!((a - b).abs() < 1e-9, "n={}: {} vs {}", n, a, b);
            }
        }
    }
}

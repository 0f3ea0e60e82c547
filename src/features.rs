//! Scalar descriptors over raw signals and magnitude spectra.
//!
//! The spectral variants take a caller-supplied frequency axis (see
//! [`frequency_axis`] for the convention) and are the only functions in the
//! crate with a documented zero-energy fallback: centroid and spread of an
//! all-zero spectrum are defined as 0 rather than an error, so silent
//! analysis frames do not abort a feature pipeline. Everything else fails
//! loudly on degenerate input.

use alloc::vec::Vec;

use crate::error::{DspError, Result};
use crate::num::Float;
use crate::stats;

/// Frequency axis matching the non-redundant rFFT bin convention:
/// `axis[k-1] = k · sample_rate / (2 · n)` for `k ∈ [1..n]`.
pub fn frequency_axis<T: Float>(sample_rate: u32, n: usize) -> Vec<T> {
    let scale = T::from_f32(sample_rate as f32)
        / (T::from_f32(2.0) * T::from_usize(n).unwrap_or_else(T::one));
    (1..=n)
        .map(|k| T::from_usize(k).unwrap_or_else(T::zero) * scale)
        .collect()
}

/// Magnitude-weighted mean frequency, `Σ f·m / Σ m`; 0 on zero energy.
pub fn spectral_centroid<T: Float>(magnitudes: &[T], freqs: &[T]) -> Result<T> {
    match stats::weighted_centroid(magnitudes, freqs) {
        Err(DspError::NumericDegenerate) => Ok(T::zero()),
        other => other,
    }
}

/// Magnitude-weighted standard deviation of frequency around the centroid;
/// 0 on zero energy.
pub fn spectral_spread<T: Float>(magnitudes: &[T], freqs: &[T]) -> Result<T> {
    match stats::weighted_spread(magnitudes, freqs) {
        Err(DspError::NumericDegenerate) => Ok(T::zero()),
        other => other,
    }
}

/// Squared Euclidean distance between two equal-length magnitude frames,
/// `Σ (aᵢ − bᵢ)²`.
pub fn spectral_flux<T: Float>(a: &[T], b: &[T]) -> Result<T> {
    if a.is_empty() {
        return Err(DspError::EmptyInput);
    }
    if a.len() != b.len() {
        return Err(DspError::MismatchedLengths);
    }
    let mut acc = T::zero();
    for (&x, &y) in a.iter().zip(b.iter()) {
        let d = x - y;
        acc = d.mul_add(d, acc);
    }
    Ok(acc)
}

/// Normalized position in `[0, 1]` of the smallest bin index whose
/// cumulative magnitude reaches `fraction` of the total.
pub fn spectral_rolloff<T: Float>(magnitudes: &[T], fraction: T) -> Result<T> {
    if magnitudes.is_empty() {
        return Err(DspError::EmptyInput);
    }
    if !(fraction >= T::zero() && fraction <= T::one()) {
        return Err(DspError::InvalidRange);
    }
    let mut total = T::zero();
    for &m in magnitudes {
        total += m;
    }
    if total == T::zero() {
        return Err(DspError::NumericDegenerate);
    }
    let limit = fraction * total;
    let mut acc = T::zero();
    let mut index = magnitudes.len() - 1;
    for (k, &m) in magnitudes.iter().enumerate() {
        acc += m;
        if acc >= limit {
            index = k;
            break;
        }
    }
    Ok(T::from_usize(index).unwrap_or_else(T::zero) / T::from_usize(magnitudes.len()).unwrap_or_else(T::one))
}

/// Geometric mean over arithmetic mean; 1 for a flat (noise-like) spectrum,
/// towards 0 for tonal content. Fails on non-positive entries rather than
/// propagating NaN.
pub fn flatness<T: Float>(x: &[T]) -> Result<T> {
    let g = stats::geometric_mean(x)?;
    Ok(g / stats::mean(x)?)
}

/// Crest factor `max|x| / Σ|x|`, bounded by `[1/len, 1]`.
pub fn crest<T: Float>(x: &[T]) -> Result<T> {
    let peak = stats::max_abs(x)?;
    if peak == T::zero() {
        return Err(DspError::NumericDegenerate);
    }
    let mut total = T::zero();
    for &v in x {
        total += v.abs();
    }
    Ok(peak / total)
}

/// Shannon entropy of `x` normalized as a probability distribution, in
/// bits, scaled into `[0, 1]` by `log2(len)`. Zero-valued samples
/// contribute nothing. Fails for all-zero input or fewer than two samples.
pub fn entropy<T: Float>(x: &[T]) -> Result<T> {
    if x.is_empty() {
        return Err(DspError::EmptyInput);
    }
    if x.len() < 2 {
        return Err(DspError::NumericDegenerate);
    }
    let mut total = T::zero();
    for &v in x {
        total += v;
    }
    if total == T::zero() {
        return Err(DspError::NumericDegenerate);
    }
    let mut acc = T::zero();
    for &v in x {
        let p = v / total;
        if p > T::zero() {
            acc += p * p.log2();
        }
    }
    let bits = T::from_usize(x.len()).unwrap_or_else(T::one).log2();
    Ok(-acc / bits)
}

/// Signal energy `Σ x²`.
pub fn energy<T: Float>(x: &[T]) -> Result<T> {
    if x.is_empty() {
        return Err(DspError::EmptyInput);
    }
    let mut acc = T::zero();
    for &v in x {
        acc = v.mul_add(v, acc);
    }
    Ok(acc)
}

/// Root mean square, `sqrt(Σ x² / N)`.
pub fn rms<T: Float>(x: &[T]) -> Result<T> {
    let e = energy(x)?;
    Ok((e / T::from_usize(x.len()).unwrap_or_else(T::one)).sqrt())
}

/// Fraction of adjacent sample pairs with a sign change.
pub fn zero_crossing_rate<T: Float>(x: &[T]) -> Result<T> {
    if x.is_empty() {
        return Err(DspError::EmptyInput);
    }
    if x.len() == 1 {
        return Ok(T::zero());
    }
    let mut crossings = 0usize;
    for pair in x.windows(2) {
        let sign_change = (pair[0] < T::zero()) != (pair[1] < T::zero());
        if sign_change {
            crossings += 1;
        }
    }
    Ok(T::from_usize(crossings).unwrap_or_else(T::zero)
        / T::from_usize(x.len() - 1).unwrap_or_else(T::one))
}

/// Peak-to-RMS ratio; fails on an all-zero sequence.
pub fn peak_to_rms<T: Float>(x: &[T]) -> Result<T> {
    let r = rms(x)?;
    if r == T::zero() {
        return Err(DspError::NumericDegenerate);
    }
    Ok(stats::max_abs(x)? / r)
}

//! Descriptive statistics over real sequences.
//!
//! These free functions back the feature layer and are usable on their own.
//! All of them validate eagerly: empty input is rejected with
//! [`DspError::EmptyInput`], paired slices must match in length, and
//! denominators that collapse to zero surface
//! [`DspError::NumericDegenerate`] instead of a silent NaN.

use alloc::vec::Vec;

use crate::error::{DspError, Result};
use crate::num::Float;

fn require_non_empty<T>(x: &[T]) -> Result<()> {
    if x.is_empty() {
        Err(DspError::EmptyInput)
    } else {
        Ok(())
    }
}

fn require_paired<T>(x: &[T], w: &[T]) -> Result<()> {
    require_non_empty(x)?;
    if x.len() != w.len() {
        Err(DspError::MismatchedLengths)
    } else {
        Ok(())
    }
}

fn len_t<T: Float>(x: &[T]) -> T {
    T::from_usize(x.len()).unwrap_or_else(T::one)
}

pub fn mean<T: Float>(x: &[T]) -> Result<T> {
    require_non_empty(x)?;
    let mut sum = T::zero();
    for &v in x {
        sum += v;
    }
    Ok(sum / len_t(x))
}

/// Population variance (divides by N).
pub fn variance<T: Float>(x: &[T]) -> Result<T> {
    moment(x, 2)
}

pub fn standard_deviation<T: Float>(x: &[T]) -> Result<T> {
    Ok(variance(x)?.sqrt())
}

/// k-th central statistical moment, `Σ(xᵢ − mean)ᵏ / N`.
pub fn moment<T: Float>(x: &[T], k: u32) -> Result<T> {
    require_non_empty(x)?;
    let m = mean(x)?;
    let mut sum = T::zero();
    for &v in x {
        let d = v - m;
        let mut term = T::one();
        for _ in 0..k {
            term = term * d;
        }
        sum += term;
    }
    Ok(sum / len_t(x))
}

/// Third standardized moment, `m₃ / σ³`.
pub fn skewness<T: Float>(x: &[T]) -> Result<T> {
    let m2 = moment(x, 2)?;
    if m2 == T::zero() {
        return Err(DspError::NumericDegenerate);
    }
    let m3 = moment(x, 3)?;
    Ok(m3 / (m2 * m2.sqrt()))
}

/// Fourth standardized moment, `m₄ / σ⁴` (non-excess: a normal
/// distribution yields 3, not 0).
pub fn kurtosis<T: Float>(x: &[T]) -> Result<T> {
    let m2 = moment(x, 2)?;
    if m2 == T::zero() {
        return Err(DspError::NumericDegenerate);
    }
    let m4 = moment(x, 4)?;
    Ok(m4 / (m2 * m2))
}

/// Index-weighted center of mass, `Σ i·xᵢ / Σ xᵢ`.
pub fn centroid<T: Float>(x: &[T]) -> Result<T> {
    require_non_empty(x)?;
    let mut weighted = T::zero();
    let mut total = T::zero();
    for (i, &v) in x.iter().enumerate() {
        weighted += T::from_usize(i).unwrap_or_else(T::zero) * v;
        total += v;
    }
    if total == T::zero() {
        return Err(DspError::NumericDegenerate);
    }
    Ok(weighted / total)
}

/// Center of mass of `x` over a caller-supplied axis, `Σ wᵢ·xᵢ / Σ xᵢ`.
pub fn weighted_centroid<T: Float>(x: &[T], axis: &[T]) -> Result<T> {
    require_paired(x, axis)?;
    let mut weighted = T::zero();
    let mut total = T::zero();
    for (&v, &w) in x.iter().zip(axis.iter()) {
        weighted += w * v;
        total += v;
    }
    if total == T::zero() {
        return Err(DspError::NumericDegenerate);
    }
    Ok(weighted / total)
}

/// Standard deviation of the axis around [`weighted_centroid`], weighted
/// by `x`.
pub fn weighted_spread<T: Float>(x: &[T], axis: &[T]) -> Result<T> {
    let center = weighted_centroid(x, axis)?;
    let mut weighted = T::zero();
    let mut total = T::zero();
    for (&v, &w) in x.iter().zip(axis.iter()) {
        let d = w - center;
        weighted += d * d * v;
        total += v;
    }
    Ok((weighted / total).sqrt())
}

/// `exp(mean(ln x))`; requires strictly positive samples.
pub fn geometric_mean<T: Float>(x: &[T]) -> Result<T> {
    require_non_empty(x)?;
    let mut acc = T::zero();
    for &v in x {
        if v <= T::zero() {
            return Err(DspError::NumericDegenerate);
        }
        acc += v.ln();
    }
    Ok((acc / len_t(x)).exp())
}

/// `N / Σ(1/xᵢ)`; requires non-zero samples.
pub fn harmonic_mean<T: Float>(x: &[T]) -> Result<T> {
    require_non_empty(x)?;
    let mut acc = T::zero();
    for &v in x {
        if v == T::zero() {
            return Err(DspError::NumericDegenerate);
        }
        acc += T::one() / v;
    }
    Ok(len_t(x) / acc)
}

/// Median of a sequence (sorted copy; averages the two middle samples for
/// even lengths).
pub fn median<T: Float>(x: &[T]) -> Result<T> {
    require_non_empty(x)?;
    let mut sorted: Vec<T> = x.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(*b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / T::from_f32(2.0))
    }
}

/// Largest absolute sample value.
pub fn max_abs<T: Float>(x: &[T]) -> Result<T> {
    require_non_empty(x)?;
    let mut best = T::zero();
    for &v in x {
        let a = v.abs();
        if a > best {
            best = a;
        }
    }
    Ok(best)
}

/// Euclidean (ℓ²) norm.
pub fn norm<T: Float>(x: &[T]) -> Result<T> {
    require_non_empty(x)?;
    let mut acc = T::zero();
    for &v in x {
        acc = v.mul_add(v, acc);
    }
    Ok(acc.sqrt())
}

//! Orthonormal type-II Discrete Cosine Transform and its exact inverse.
//!
//! Cosine tables are cached per transform length by [`DctPlanner`] so
//! repeated calls over equally sized frames pay the trigonometry once. With
//! the orthonormal scaling the forward/inverse pair is an identity without
//! any caller-side factor: `idct(dct(x)) == x`.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::num::Float;

/// Cache of `n × n` cosine tables, `table[k * n + i] = cos(π (i + ½) k / n)`.
///
/// The same table serves the forward transform (rows indexed by `k`) and the
/// inverse (columns indexed by `i`).
pub struct DctPlanner<T: Float> {
    cache: HashMap<usize, Arc<[T]>>,
}

impl<T: Float> Default for DctPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> DctPlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    fn get_table(&mut self, n: usize) -> Arc<[T]> {
        if let Some(table) = self.cache.get(&n) {
            return Arc::clone(table);
        }
        log::trace!("building DCT cosine table for n={}", n);
        let factor = T::pi() / T::from_usize(n).unwrap_or_else(T::one);
        let half = T::from_f32(0.5);
        let mut table = vec![T::zero(); n * n];
        for k in 0..n {
            let k_t = T::from_usize(k).unwrap_or_else(T::zero);
            for i in 0..n {
                let i_t = T::from_usize(i).unwrap_or_else(T::zero);
                table[k * n + i] = (factor * (i_t + half) * k_t).cos();
            }
        }
        let table: Arc<[T]> = Arc::from(table);
        self.cache.insert(n, Arc::clone(&table));
        table
    }
}

fn ortho_scales<T: Float>(n: usize) -> (T, T) {
    let n_t = T::from_usize(n).unwrap_or_else(T::one);
    let dc = (T::one() / n_t).sqrt();
    let ac = (T::from_f32(2.0) / n_t).sqrt();
    (dc, ac)
}

/// Orthonormal DCT-II of a real sequence. Empty input maps to empty output.
pub fn dct<T: Float>(planner: &mut DctPlanner<T>, input: &[T]) -> Vec<T> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let table = planner.get_table(n);
    let (dc, ac) = ortho_scales::<T>(n);
    let mut output = vec![T::zero(); n];
    for (k, out) in output.iter_mut().enumerate() {
        let row = &table[k * n..(k + 1) * n];
        let mut sum = T::zero();
        for (&x, &c) in input.iter().zip(row.iter()) {
            sum = x.mul_add(c, sum);
        }
        *out = sum * if k == 0 { dc } else { ac };
    }
    output
}

/// Exact inverse of [`dct`] (orthonormal DCT-III).
pub fn idct<T: Float>(planner: &mut DctPlanner<T>, input: &[T]) -> Vec<T> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let table = planner.get_table(n);
    let (dc, ac) = ortho_scales::<T>(n);
    let mut output = vec![T::zero(); n];
    for (i, out) in output.iter_mut().enumerate() {
        let mut sum = input[0] * dc;
        for (k, &y) in input.iter().enumerate().skip(1) {
            sum = (y * ac).mul_add(table[k * n + i], sum);
        }
        *out = sum;
    }
    output
}

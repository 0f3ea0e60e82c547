//! Streaming fixed-window statistical filters.
//!
//! Each filter owns a window of the last `capacity` samples, zero-filled at
//! construction, and emits one running statistic per input sample. The
//! common contract is [`StreamingFilter`]; the three variants are selected
//! at construction time. Instances are exclusively owned and driven by a
//! single sample stream; callers sharing one across threads must serialize
//! access themselves.
//!
//! `resize` always clears buffered history, for shrinking and growing
//! alike, so the window aggregates can never disagree with the buffer
//! contents. A resized filter behaves exactly like a freshly constructed
//! one of the new capacity.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::{DspError, Result};
use crate::num::Float;

/// Common contract of the moving median/average/RMS filters.
pub trait StreamingFilter<T: Float> {
    /// Current window capacity.
    fn size(&self) -> usize;

    /// Change the window capacity, clearing buffered history. Fails with
    /// [`DspError::InvalidCapacity`] for a zero capacity.
    fn resize(&mut self, capacity: usize) -> Result<()>;

    /// Push one sample, evict the oldest, and emit the statistic over the
    /// updated window.
    fn process(&mut self, sample: T) -> T;

    /// Batch form of [`StreamingFilter::process`]; causal, the output has
    /// the same length as the input.
    fn filter(&mut self, input: &[T]) -> Vec<T> {
        input.iter().map(|&x| self.process(x)).collect()
    }
}

fn zero_window<T: Float>(capacity: usize) -> VecDeque<T> {
    let mut window = VecDeque::with_capacity(capacity);
    window.resize(capacity, T::zero());
    window
}

fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        Err(DspError::InvalidCapacity)
    } else {
        Ok(())
    }
}

/// Moving arithmetic mean with an O(1) running sum.
pub struct MovingAverage<T: Float> {
    window: VecDeque<T>,
    sum: T,
}

impl<T: Float> MovingAverage<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self {
            window: zero_window(capacity),
            sum: T::zero(),
        })
    }
}

impl<T: Float> StreamingFilter<T> for MovingAverage<T> {
    fn size(&self) -> usize {
        self.window.len()
    }

    fn resize(&mut self, capacity: usize) -> Result<()> {
        check_capacity(capacity)?;
        log::debug!("moving-average resize to {}: history cleared", capacity);
        self.window = zero_window(capacity);
        self.sum = T::zero();
        Ok(())
    }

    fn process(&mut self, sample: T) -> T {
        let evicted = self.window.pop_front().unwrap_or_else(T::zero);
        self.sum -= evicted;
        self.sum += sample;
        self.window.push_back(sample);
        self.sum / T::from_usize(self.window.len()).unwrap_or_else(T::one)
    }
}

/// Moving root mean square with an O(1) running sum of squares.
pub struct MovingRms<T: Float> {
    window: VecDeque<T>,
    sum_sq: T,
}

impl<T: Float> MovingRms<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self {
            window: zero_window(capacity),
            sum_sq: T::zero(),
        })
    }
}

impl<T: Float> StreamingFilter<T> for MovingRms<T> {
    fn size(&self) -> usize {
        self.window.len()
    }

    fn resize(&mut self, capacity: usize) -> Result<()> {
        check_capacity(capacity)?;
        log::debug!("moving-rms resize to {}: history cleared", capacity);
        self.window = zero_window(capacity);
        self.sum_sq = T::zero();
        Ok(())
    }

    fn process(&mut self, sample: T) -> T {
        let evicted = self.window.pop_front().unwrap_or_else(T::zero);
        self.sum_sq -= evicted * evicted;
        self.sum_sq += sample * sample;
        self.window.push_back(sample);
        // Cancellation can leave a tiny negative residue.
        if self.sum_sq < T::zero() {
            self.sum_sq = T::zero();
        }
        (self.sum_sq / T::from_usize(self.window.len()).unwrap_or_else(T::one)).sqrt()
    }
}

/// Total-order key so floats can live in a `BTreeMap` multiset.
#[derive(Clone, Copy, Debug)]
struct OrdKey<T: Float>(T);

impl<T: Float> PartialEq for OrdKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(other.0) == Ordering::Equal
    }
}
impl<T: Float> Eq for OrdKey<T> {}
impl<T: Float> PartialOrd for OrdKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: Float> Ord for OrdKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(other.0)
    }
}

type Multiset<T> = BTreeMap<OrdKey<T>, usize>;

fn multiset_insert<T: Float>(set: &mut Multiset<T>, value: T) {
    *set.entry(OrdKey(value)).or_insert(0) += 1;
}

fn multiset_remove<T: Float>(set: &mut Multiset<T>, value: T) {
    if let Some(count) = set.get_mut(&OrdKey(value)) {
        *count -= 1;
        if *count == 0 {
            set.remove(&OrdKey(value));
        }
    } else {
        debug_assert!(false, "value missing from median multiset");
    }
}

/// Order-statistics structure holding the window split into two balanced
/// multisets: `low` keeps the smaller half (its maximum is the lower middle
/// sample), `high` the larger half. Insert, evict and median query are all
/// O(log n).
struct MedianTracker<T: Float> {
    low: Multiset<T>,
    high: Multiset<T>,
    low_len: usize,
    high_len: usize,
}

impl<T: Float> MedianTracker<T> {
    fn with_zeros(capacity: usize) -> Self {
        let mut tracker = Self {
            low: BTreeMap::new(),
            high: BTreeMap::new(),
            low_len: 0,
            high_len: 0,
        };
        for _ in 0..capacity {
            tracker.insert(T::zero());
        }
        tracker
    }

    fn max_low(&self) -> Option<T> {
        self.low.last_key_value().map(|(k, _)| k.0)
    }

    fn min_high(&self) -> Option<T> {
        self.high.first_key_value().map(|(k, _)| k.0)
    }

    fn insert(&mut self, value: T) {
        match self.max_low() {
            Some(boundary) if value.total_cmp(boundary) == Ordering::Greater => {
                multiset_insert(&mut self.high, value);
                self.high_len += 1;
            }
            _ => {
                multiset_insert(&mut self.low, value);
                self.low_len += 1;
            }
        }
        self.rebalance();
    }

    fn remove(&mut self, value: T) {
        // Every element of `low` is <= every element of `high`, so the
        // boundary comparison decides which side holds the value.
        let in_low = match self.max_low() {
            Some(boundary) => value.total_cmp(boundary) != Ordering::Greater,
            None => false,
        };
        if in_low {
            multiset_remove(&mut self.low, value);
            self.low_len -= 1;
        } else {
            multiset_remove(&mut self.high, value);
            self.high_len -= 1;
        }
        self.rebalance();
    }

    /// Keep `low_len == high_len` or `low_len == high_len + 1`.
    fn rebalance(&mut self) {
        while self.low_len > self.high_len + 1 {
            let moved = self.max_low().unwrap_or_else(T::zero);
            multiset_remove(&mut self.low, moved);
            multiset_insert(&mut self.high, moved);
            self.low_len -= 1;
            self.high_len += 1;
        }
        while self.high_len > self.low_len {
            let moved = self.min_high().unwrap_or_else(T::zero);
            multiset_remove(&mut self.high, moved);
            multiset_insert(&mut self.low, moved);
            self.high_len -= 1;
            self.low_len += 1;
        }
    }

    /// Median over the tracked window; averages the two middle samples for
    /// even window lengths.
    fn median(&self) -> T {
        let lower = self.max_low().unwrap_or_else(T::zero);
        if self.low_len > self.high_len {
            lower
        } else {
            let upper = self.min_high().unwrap_or_else(T::zero);
            (lower + upper) / T::from_f32(2.0)
        }
    }
}

/// Moving median backed by [`MedianTracker`].
pub struct MovingMedian<T: Float> {
    window: VecDeque<T>,
    tracker: MedianTracker<T>,
}

impl<T: Float> MovingMedian<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self {
            window: zero_window(capacity),
            tracker: MedianTracker::with_zeros(capacity),
        })
    }
}

impl<T: Float> StreamingFilter<T> for MovingMedian<T> {
    fn size(&self) -> usize {
        self.window.len()
    }

    fn resize(&mut self, capacity: usize) -> Result<()> {
        check_capacity(capacity)?;
        log::debug!("moving-median resize to {}: history cleared", capacity);
        self.window = zero_window(capacity);
        self.tracker = MedianTracker::with_zeros(capacity);
        Ok(())
    }

    fn process(&mut self, sample: T) -> T {
        let evicted = self.window.pop_front().unwrap_or_else(T::zero);
        self.tracker.remove(evicted);
        self.tracker.insert(sample);
        self.window.push_back(sample);
        self.tracker.median()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec;

    #[test]
    fn moving_average_reference_scenario() {
        let mut filt = MovingAverage::<f64>::new(3).unwrap();
        let out = filt.filter(&[1.0, 2.0, 3.0, 4.0]);
        let expected = [1.0 / 3.0, 1.0, 2.0, 3.0];
        for (a, b) in out.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "{} vs {}", a, b);
        }
    }

    #[test]
    fn moving_rms_over_constant_input() {
        let mut filt = MovingRms::<f64>::new(4).unwrap();
        let out = filt.filter(&[2.0; 8]);
        // Once the window is saturated the RMS equals the input level.
        assert!((out[3] - 2.0).abs() < 1e-12);
        assert!((out[7] - 2.0).abs() < 1e-12);
        // Zero-filled warm-up: sqrt(k * 4 / 4) after k samples.
        assert!((out[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn moving_median_tracks_sorted_window() {
        let mut filt = MovingMedian::<f64>::new(3).unwrap();
        let input = [5.0, 1.0, 4.0, 2.0, 8.0, 3.0];
        let out = filt.filter(&input);
        // Windows: [0,0,5] [0,5,1] [5,1,4] [1,4,2] [4,2,8] [2,8,3]
        let expected = [0.0, 1.0, 4.0, 2.0, 4.0, 3.0];
        for (a, b) in out.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "{:?} vs {:?}", out, expected);
        }
    }

    #[test]
    fn median_even_capacity_averages_middles() {
        let mut filt = MovingMedian::<f64>::new(4).unwrap();
        filt.process(1.0);
        filt.process(2.0);
        filt.process(3.0);
        // Window [0,1,2,3]: middles 1 and 2.
        let m = filt.process(4.0); // window [1,2,3,4]
        assert!((m - 2.5).abs() < 1e-12);
    }

    #[test]
    fn median_agrees_with_sorted_reference() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(7);
        let capacity = 9;
        let mut filt = MovingMedian::<f64>::new(capacity).unwrap();
        let mut window: VecDeque<f64> = VecDeque::from(vec![0.0; capacity]);
        for _ in 0..500 {
            let x: f64 = rng.gen_range(-100.0..100.0);
            window.pop_front();
            window.push_back(x);
            let mut sorted: Vec<f64> = window.iter().copied().collect();
            sorted.sort_by(f64::total_cmp);
            let expected = sorted[capacity / 2];
            let got = filt.process(x);
            assert!((got - expected).abs() < 1e-12, "{} vs {}", got, expected);
        }
    }

    #[test]
    fn size_reports_capacity() {
        let filt = MovingAverage::<f64>::new(5).unwrap();
        assert_eq!(filt.size(), 5);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(MovingAverage::<f64>::new(0).is_err());
        assert!(MovingRms::<f64>::new(0).is_err());
        assert!(MovingMedian::<f64>::new(0).is_err());
        let mut filt = MovingAverage::<f64>::new(2).unwrap();
        assert_eq!(filt.resize(0), Err(DspError::InvalidCapacity));
        assert_eq!(filt.size(), 2);
    }

    #[test]
    fn resize_clears_history() {
        let mut filt = MovingAverage::<f64>::new(3).unwrap();
        filt.filter(&[10.0, 20.0, 30.0]);
        filt.resize(3).unwrap();
        // After the reset the filter behaves like a fresh instance.
        let fresh = MovingAverage::<f64>::new(3).unwrap().process(6.0);
        assert!((filt.process(6.0) - fresh).abs() < 1e-12);
    }

    #[test]
    fn resize_then_process_matches_fresh_filter() {
        let input = [3.0, -1.0, 4.0, 1.0, -5.0, 9.0];
        for capacity in [2usize, 5] {
            let mut resized = MovingMedian::<f64>::new(7).unwrap();
            resized.filter(&input);
            resized.resize(capacity).unwrap();
            let mut fresh = MovingMedian::<f64>::new(capacity).unwrap();
            assert_eq!(resized.filter(&input), fresh.filter(&input));
        }
    }

    #[test]
    fn variants_share_the_streaming_contract() {
        let mut filters: Vec<Box<dyn StreamingFilter<f64>>> = vec![
            Box::new(MovingAverage::new(4).unwrap()),
            Box::new(MovingRms::new(4).unwrap()),
            Box::new(MovingMedian::new(4).unwrap()),
        ];
        for filt in filters.iter_mut() {
            assert_eq!(filt.size(), 4);
            let out = filt.filter(&[1.0, 2.0, 3.0]);
            assert_eq!(out.len(), 3);
            filt.resize(2).unwrap();
            assert_eq!(filt.size(), 2);
        }
    }
}

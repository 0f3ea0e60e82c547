//! Crate-wide error taxonomy.
//!
//! Every engine validates its preconditions eagerly and fails synchronously;
//! no partial results are produced and nothing is retried. The only
//! documented NaN-free fallbacks live in the spectral feature layer
//! (`spectral_centroid`/`spectral_spread` return zero on zero energy).

use core::fmt;

/// Errors reported by the transform, feature and filter engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DspError {
    /// A non-empty sequence was required.
    EmptyInput,
    /// Two paired sequences must have the same length, or an inverse
    /// transform target length disagrees with the supplied bin count.
    MismatchedLengths,
    /// A streaming filter capacity must be at least one sample.
    InvalidCapacity,
    /// A scalar parameter fell outside its documented range.
    InvalidRange,
    /// A denominator collapsed to zero and no fallback is defined for the
    /// operation (e.g. flatness over non-positive data).
    NumericDegenerate,
}

impl fmt::Display for DspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DspError::EmptyInput => write!(f, "input sequence must not be empty"),
            DspError::MismatchedLengths => write!(f, "paired sequence lengths do not match"),
            DspError::InvalidCapacity => write!(f, "window capacity must be at least one"),
            DspError::InvalidRange => write!(f, "parameter outside its valid range"),
            DspError::NumericDegenerate => write!(f, "computation is numerically degenerate"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DspError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, DspError>;

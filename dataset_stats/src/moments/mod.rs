//! Online, numerically stable per-channel moments.
//!
//! Every image is reduced to a [`MomentTriple`] (sample count, mean and
//! unbiased variance per channel) by [`extract`]. Triples are combined with
//! the parallel variance identity in [`merge`], and a whole dataset is folded
//! into one triple by [`Reducer`] along a balanced binary tree.
//!
//! All values are in normalized intensity units (`0.0..=1.0`).

mod extract;
mod merge;
mod reduce;


pub use extract::extract;
pub use merge::{merge, MeanPolicy};
pub use reduce::Reducer;

use crate::error::{Error, Result};
use crate::image::STAT_CHANNELS;

/// One value per statistic channel.
pub type ChannelValues = [f64; STAT_CHANNELS];

/// Sample count, mean and unbiased (Bessel-corrected) variance of a sample.
///
/// A triple always describes at least one observation. With a single
/// observation the variance is 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentTriple {
    count: u64,
    mean: ChannelValues,
    variance: ChannelValues,
}

impl MomentTriple {
    pub fn new(count: u64, mean: ChannelValues, variance: ChannelValues) -> Result<Self> {
        if count == 0 {
            return Err(Error::DegenerateSample { count });
        }
        Ok(Self::from_parts(count, mean, variance))
    }

    pub(crate) fn from_parts(count: u64, mean: ChannelValues, variance: ChannelValues) -> Self {
        debug_assert!(count > 0);
        Self {
            count,
            mean,
            variance,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> ChannelValues {
        self.mean
    }

    pub fn variance(&self) -> ChannelValues {
        self.variance
    }

    /// Standard deviation per channel.
    pub fn std(&self) -> ChannelValues {
        self.variance.map(f64::sqrt)
    }

    /// Sum of squared deviations from the mean ("M2") per channel.
    pub fn sum_sq_dev(&self) -> ChannelValues {
        let dof = (self.count - 1) as f64;
        self.variance.map(|v| v * dof)
    }
}

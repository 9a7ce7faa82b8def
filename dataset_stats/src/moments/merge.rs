use serde::{Deserialize, Serialize};

use super::{ChannelValues, MomentTriple};
use crate::image::STAT_CHANNELS;

/// How the mean of two merged samples is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanPolicy {
    /// Unweighted `0.5 * a + 0.5 * b`. Every merged half counts equally
    /// regardless of how many pixels it holds. Matches reports produced by
    /// earlier tooling.
    #[default]
    Midpoint,
    /// `(n_a * a + n_b * b) / (n_a + n_b)`, the exact pooled mean.
    CountWeighted,
}

/// Combines two triples into the triple of their union.
///
/// The sum of squared deviations is pooled with the parallel variance
/// identity (Chan et al.), so no individual samples are revisited.
pub fn merge(a: &MomentTriple, b: &MomentTriple, policy: MeanPolicy) -> MomentTriple {
    let n_a = a.count as f64;
    let n_b = b.count as f64;
    let count = a.count + b.count;
    let n = count as f64;

    let m_a = a.sum_sq_dev();
    let m_b = b.sum_sq_dev();

    let mut mean: ChannelValues = [0.0; STAT_CHANNELS];
    let mut variance: ChannelValues = [0.0; STAT_CHANNELS];

    for c in 0..STAT_CHANNELS {
        let delta = b.mean[c] - a.mean[c];
        let m2 = m_a[c] + m_b[c] + delta * delta * n_a * n_b / (n_a + n_b);

        mean[c] = match policy {
            MeanPolicy::Midpoint => a.mean[c] * 0.5 + b.mean[c] * 0.5,
            MeanPolicy::CountWeighted => (n_a * a.mean[c] + n_b * b.mean[c]) / n,
        };
        // Unreachable while both inputs hold an observation.
        variance[c] = if count > 1 { m2 / (n - 1.0) } else { 0.0 };
    }

    MomentTriple::from_parts(count, mean, variance)
}

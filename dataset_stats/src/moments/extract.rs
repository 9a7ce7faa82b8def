use crate::image::{Image, MAX_INTENSITY, STAT_CHANNELS};

use super::{ChannelValues, MomentTriple};

/// Computes the moment triple of one image.
///
/// The sample count is the number of spatial pixels. A single-pixel image
/// has no defined unbiased variance and is reported with variance 0.
pub fn extract(image: &Image) -> MomentTriple {
    let size = image.size();
    let count = size.pixel_count();
    let sources = size.source_channels();

    let mut mean: ChannelValues = [0.0; STAT_CHANNELS];
    let mut variance: ChannelValues = [0.0; STAT_CHANNELS];

    for (stat, &source) in sources.iter().enumerate() {
        // Broadcast luminance instead of recomputing it.
        if stat > 0 && sources[stat - 1] == source {
            mean[stat] = mean[stat - 1];
            variance[stat] = variance[stat - 1];
            continue;
        }
        let (m, v) = channel_moments(image.channel(source), count);
        mean[stat] = m;
        variance[stat] = v;
    }

    if count == 1 {
        tracing::debug!("Single-pixel image, variance reported as 0");
    }

    MomentTriple::from_parts(count as u64, mean, variance)
}

/// Two-pass mean and unbiased variance of one channel, normalized to `0..=1`.
fn channel_moments<I>(values: I, count: usize) -> (f64, f64)
where
    I: Iterator<Item = u8> + Clone,
{
    debug_assert!(count > 0);
    let n = count as f64;

    let sum: f64 = values.clone().map(normalize).sum();
    let mean = sum / n;

    if count == 1 {
        return (mean, 0.0);
    }

    let sum_sq_dev: f64 = values
        .map(|v| {
            let d = normalize(v) - mean;
            d * d
        })
        .sum();
    let population = sum_sq_dev / n;

    (mean, population * (n / (n - 1.0)))
}

#[inline]
fn normalize(value: u8) -> f64 {
    value as f64 / MAX_INTENSITY
}

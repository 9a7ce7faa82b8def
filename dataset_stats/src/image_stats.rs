//! Dataset-wide image mean and standard deviation.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::config::{FailurePolicy, StatsConfig};
use crate::dataset::{Dataset, DatasetItem, DEFAULT_SUBSET_NAME};
use crate::error::Result;
use crate::image::{MAX_INTENSITY, STAT_CHANNELS};
use crate::moments::{self, ChannelValues, MomentTriple, Reducer};
use crate::report::{DatasetStatistics, ImageStatsRecord};

/// Per-channel mean and standard deviation in 0–255 intensity units.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanStd {
    pub mean: ChannelValues,
    pub std: ChannelValues,
    /// Number of items asked for, including skipped ones.
    pub image_count: usize,
    /// Ids of items left out because their image failed to load or was malformed.
    pub skipped: Vec<String>,
}

impl MeanStd {
    fn zero(image_count: usize, skipped: Vec<String>) -> Self {
        Self {
            mean: [0.0; STAT_CHANNELS],
            std: [0.0; STAT_CHANNELS],
            image_count,
            skipped,
        }
    }
}

/// Computes the mean and unbiased standard deviation of `items`.
///
/// An empty item list yields all-zero statistics.
pub fn mean_std<I: DatasetItem>(items: &[I], config: &StatsConfig) -> Result<MeanStd> {
    config.validate()?;
    let triples = extract_all(items, config)?;
    Ok(summarize(items, &triples, config))
}

/// Computes statistics for the whole dataset and, when the dataset has named
/// subsets, for every subset. Each image is decoded once.
pub fn compute_image_statistics<D: Dataset>(
    dataset: &D,
    config: &StatsConfig,
) -> Result<DatasetStatistics> {
    config.validate()?;
    let items = dataset.items();
    let triples = extract_all(items, config)?;

    let whole = summarize(items, &triples, config);
    let mut subsets = BTreeMap::new();

    let mut names = dataset.subsets();
    if !names.is_empty() {
        if dataset.has_default_subset() && !names.contains(&DEFAULT_SUBSET_NAME) {
            names.push(DEFAULT_SUBSET_NAME);
        }

        for name in names {
            let (subset_items, subset_triples): (Vec<&D::Item>, Vec<Option<MomentTriple>>) = items
                .iter()
                .zip(triples.iter())
                .filter(|(item, _)| item.subset().unwrap_or(DEFAULT_SUBSET_NAME) == name)
                .map(|(item, triple)| (item, *triple))
                .unzip();

            let stats = summarize(&subset_items, &subset_triples, config);
            tracing::debug!(subset = name, images = stats.image_count, "Subset statistics");
            subsets.insert(name.to_string(), ImageStatsRecord::from(&stats));
        }
    }

    Ok(DatasetStatistics {
        dataset: ImageStatsRecord::from(&whole),
        subsets,
    })
}

/// Extracts one triple per item, `None` for skipped items.
///
/// Items are processed in chunks of `max_concurrent_images`, so no more than
/// that many decoded images are alive at once.
fn extract_all<I: DatasetItem>(
    items: &[I],
    config: &StatsConfig,
) -> Result<Vec<Option<MomentTriple>>> {
    let mut triples = Vec::with_capacity(items.len());

    for chunk in items.chunks(config.max_concurrent_images) {
        let results: Vec<Result<MomentTriple>> = chunk.par_iter().map(extract_item).collect();

        for (item, result) in chunk.iter().zip(results) {
            match (result, config.failure_policy) {
                (Ok(triple), _) => triples.push(Some(triple)),
                (Err(err), FailurePolicy::Abort) => {
                    tracing::error!(item = item.id(), "Image statistics aborted: {}", err);
                    return Err(err);
                }
                (Err(err), FailurePolicy::Skip) => {
                    tracing::warn!(item = item.id(), "Skipping item: {}", err);
                    triples.push(None);
                }
            }
        }
    }

    Ok(triples)
}

fn extract_item<I: DatasetItem>(item: &I) -> Result<MomentTriple> {
    let image = item.image()?;
    let triple = moments::extract(&image);
    tracing::debug!(item = item.id(), pixels = triple.count(), "Extracted image moments");
    Ok(triple)
}

fn summarize<I: DatasetItem>(
    items: &[I],
    triples: &[Option<MomentTriple>],
    config: &StatsConfig,
) -> MeanStd {
    debug_assert_eq!(items.len(), triples.len());

    let skipped: Vec<String> = items
        .iter()
        .zip(triples)
        .filter(|(_, triple)| triple.is_none())
        .map(|(item, _)| item.id().to_string())
        .collect();
    let usable: Vec<MomentTriple> = triples.iter().flatten().copied().collect();

    let reducer =
        Reducer::new(config.mean_policy).with_parallel_threshold(config.parallel_reduce_threshold);
    let Some(total) = reducer.reduce(&usable) else {
        if items.is_empty() {
            tracing::debug!("Empty dataset, reporting zero statistics");
        } else {
            tracing::warn!(
                images = items.len(),
                "No usable images, reporting zero statistics"
            );
        }
        return MeanStd::zero(items.len(), skipped);
    };

    let stats = MeanStd {
        mean: total.mean().map(|m| m * MAX_INTENSITY),
        std: total.std().map(|s| s * MAX_INTENSITY),
        image_count: items.len(),
        skipped,
    };

    tracing::info!(
        images = stats.image_count,
        skipped = stats.skipped.len(),
        pixels = total.count(),
        "Image statistics: mean {:?}, std {:?}",
        stats.mean,
        stats.std
    );

    stats
}

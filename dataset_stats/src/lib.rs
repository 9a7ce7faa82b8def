//! Dataset statistics.
//!
//! Computes the per-channel mean and unbiased standard deviation of the
//! images of a dataset, one image at a time, plus a tally of the annotations
//! attached to the dataset items.
//!
//! Each image is reduced to a moment triple (pixel count, mean, variance);
//! triples are combined pairwise along a balanced binary tree, which keeps
//! the result stable for large datasets with mixed image sizes.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dataset_stats::{compute_image_statistics, ManifestDataset, StatsConfig};
//!
//! let dataset = ManifestDataset::load("dataset/manifest.yaml")?;
//! let stats = compute_image_statistics(&dataset, &StatsConfig::default())?;
//!
//! println!("{:?}", stats.dataset.image_mean);
//! ```

mod annotation_stats;
mod config;
mod error;
mod image_stats;
mod report;

pub mod dataset;
pub mod image;
pub mod moments;

// ============================================================================
// Configuration and errors
// ============================================================================

pub use config::{FailurePolicy, StatsConfig};
pub use error::{Error, Result};

// ============================================================================
// Datasets
// ============================================================================

pub use crate::dataset::{
    Annotation, AnnotationType, AttributeValue, Dataset, DatasetItem, ManifestDataset,
    ManifestItem, MemoryDataset, MemoryItem, DEFAULT_SUBSET_NAME,
};
pub use crate::image::{Image, ImageError, ImageSize};

// ============================================================================
// Statistics
// ============================================================================

pub use annotation_stats::compute_ann_statistics;
pub use image_stats::{compute_image_statistics, mean_std, MeanStd};
pub use moments::{MeanPolicy, MomentTriple, Reducer};
pub use report::{render, AnnotationStatistics, DatasetStatistics, ImageStatsRecord};

//! Serializable statistics records.

use std::collections::BTreeMap;

use common::FileFormat;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::image::STAT_CHANNELS;
use crate::image_stats::MeanStd;

/// Image statistics of one collection of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageStatsRecord {
    #[serde(rename = "Total images")]
    pub total_images: usize,
    #[serde(rename = "Image mean")]
    pub image_mean: [String; STAT_CHANNELS],
    #[serde(rename = "Image std")]
    pub image_std: [String; STAT_CHANNELS],
}

impl From<&MeanStd> for ImageStatsRecord {
    fn from(stats: &MeanStd) -> Self {
        Self {
            total_images: stats.image_count,
            image_mean: stats.mean.map(format_fixed),
            image_std: stats.std.map(format_fixed),
        }
    }
}

/// Whole-dataset record plus one record per subset. `subsets` is empty
/// unless the dataset has named subsets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStatistics {
    pub dataset: ImageStatsRecord,
    pub subsets: BTreeMap<String, ImageStatsRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationStatistics {
    #[serde(rename = "Total images")]
    pub total_images: usize,
    #[serde(rename = "Total annotations")]
    pub total_annotations: usize,
    #[serde(rename = "Annotations by type")]
    pub annotations_by_type: BTreeMap<String, usize>,
    /// Attribute name, then attribute value string form, to count.
    #[serde(rename = "Annotations by attribute")]
    pub annotations_by_attribute: BTreeMap<String, BTreeMap<String, usize>>,
    #[serde(rename = "Unannotated images")]
    pub unannotated_images: Vec<String>,
}

/// Fixed-point with three decimals.
fn format_fixed(value: f64) -> String {
    format!("{:.3}", value)
}

pub fn render<T: Serialize>(value: &T, format: FileFormat) -> Result<String> {
    common::serialize(value, format).map_err(Error::Serialize)
}

//! Statistics configuration.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```yaml
//! mean_policy: count_weighted
//! failure_policy: abort
//! max_concurrent_images: 8
//! ```

use std::path::Path;

use common::FileFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::moments::MeanPolicy;

/// What happens when an item's image cannot be loaded or is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log a warning naming the item and leave it out of the aggregate.
    #[default]
    Skip,
    /// Stop and return the error of the first failing item.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsConfig {
    pub mean_policy: MeanPolicy,
    pub failure_policy: FailurePolicy,
    /// Upper bound on decoded images held in memory at once.
    pub max_concurrent_images: usize,
    /// Minimum number of triples for a reduction range to fork its halves.
    /// `0` reduces on the calling thread.
    pub parallel_reduce_threshold: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            mean_policy: MeanPolicy::default(),
            failure_policy: FailurePolicy::default(),
            max_concurrent_images: 4,
            parallel_reduce_threshold: 4096,
        }
    }
}

impl StatsConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: StatsConfig =
            common::deserialize(&text, format).map_err(|source| Error::ParseFile {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_images == 0 {
            return Err(Error::InvalidConfig(
                "max_concurrent_images must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

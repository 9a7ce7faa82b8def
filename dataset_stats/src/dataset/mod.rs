//! Dataset collaborator interface.
//!
//! Statistics only see items through [`DatasetItem`]; where pixels come from
//! (memory, files, a remote store) is up to the implementation. Images are
//! requested one item at a time so a dataset never has to be resident as a
//! whole.

mod annotation;
mod manifest;
mod memory;

use std::borrow::Cow;
use std::collections::BTreeSet;

pub use annotation::{Annotation, AnnotationType, AttributeValue};
pub use manifest::{ManifestDataset, ManifestItem};
pub use memory::{MemoryDataset, MemoryItem};

use crate::error::Result;
use crate::image::Image;

/// Report name of items that belong to no named subset.
pub const DEFAULT_SUBSET_NAME: &str = "default";

pub trait DatasetItem: Sync {
    fn id(&self) -> &str;

    /// Named subset of the item, `None` for the default subset.
    fn subset(&self) -> Option<&str>;

    /// Pixel data of the item. May load lazily; errors carry the item id.
    fn image(&self) -> Result<Cow<'_, Image>>;

    fn annotations(&self) -> &[Annotation];
}

impl<T: DatasetItem> DatasetItem for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn subset(&self) -> Option<&str> {
        (**self).subset()
    }

    fn image(&self) -> Result<Cow<'_, Image>> {
        (**self).image()
    }

    fn annotations(&self) -> &[Annotation] {
        (**self).annotations()
    }
}

pub trait Dataset {
    type Item: DatasetItem;

    fn items(&self) -> &[Self::Item];

    fn len(&self) -> usize {
        self.items().len()
    }

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Sorted names of the named subsets present in the dataset.
    fn subsets(&self) -> Vec<&str> {
        self.items()
            .iter()
            .filter_map(|item| item.subset())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Items of a subset. [`DEFAULT_SUBSET_NAME`] also selects items without a subset.
    fn subset(&self, name: &str) -> Vec<&Self::Item> {
        self.items()
            .iter()
            .filter(|item| item.subset().unwrap_or(DEFAULT_SUBSET_NAME) == name)
            .collect()
    }

    /// True when the unnamed default subset has items.
    fn has_default_subset(&self) -> bool {
        self.items().iter().any(|item| item.subset().is_none())
    }
}

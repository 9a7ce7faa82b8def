use std::borrow::Cow;

use super::{Annotation, Dataset, DatasetItem};
use crate::error::Result;
use crate::image::Image;

/// Dataset item that owns its decoded image.
#[derive(Debug, Clone)]
pub struct MemoryItem {
    pub id: String,
    pub subset: Option<String>,
    pub image: Image,
    pub annotations: Vec<Annotation>,
}

impl MemoryItem {
    pub fn new(id: impl Into<String>, image: Image) -> Self {
        Self {
            id: id.into(),
            subset: None,
            image,
            annotations: Vec::new(),
        }
    }

    pub fn in_subset(mut self, subset: impl Into<String>) -> Self {
        self.subset = Some(subset.into());
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

impl DatasetItem for MemoryItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn subset(&self) -> Option<&str> {
        self.subset.as_deref()
    }

    fn image(&self) -> Result<Cow<'_, Image>> {
        Ok(Cow::Borrowed(&self.image))
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    items: Vec<MemoryItem>,
}

impl MemoryDataset {
    pub fn new(items: Vec<MemoryItem>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: MemoryItem) {
        self.items.push(item);
    }
}

impl Dataset for MemoryDataset {
    type Item = MemoryItem;

    fn items(&self) -> &[MemoryItem] {
        &self.items
    }
}

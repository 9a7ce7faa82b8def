use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ::image as image_lib;
use common::FileFormat;
use serde::{Deserialize, Serialize};

use super::{Annotation, Dataset, DatasetItem};
use crate::error::{Error, Result};
use crate::image::{Image, ImageSize};

/// Item listed in a dataset manifest. The image is decoded on request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subset: Option<String>,
    /// Image file, relative to the manifest directory unless absolute.
    pub image: PathBuf,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    items: Vec<ManifestItem>,
}

/// Dataset described by a YAML or JSON manifest:
///
/// ```yaml
/// items:
///   - id: frame_000
///     subset: train
///     image: images/frame_000.png
///     annotations:
///       - type: bbox
///         attributes: { occluded: false }
/// ```
#[derive(Debug, Clone)]
pub struct ManifestDataset {
    path: PathBuf,
    items: Vec<ManifestItem>,
}

impl ManifestDataset {
    /// Reads a manifest; the format follows the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new(""));

        Self::parse(&text, format, root, path)
    }

    /// Parses manifest text. Relative image paths are resolved against `root`.
    pub fn parse(text: &str, format: FileFormat, root: &Path, path: &Path) -> Result<Self> {
        let manifest: Manifest =
            common::deserialize(text, format).map_err(|source| Error::ParseFile {
                path: path.to_path_buf(),
                source,
            })?;

        let mut seen = HashSet::new();
        let mut items = manifest.items;
        for item in items.iter_mut() {
            if !seen.insert(item.id.clone()) {
                return Err(Error::DuplicateItem {
                    item_id: item.id.clone(),
                    path: path.to_path_buf(),
                });
            }
            if item.image.is_relative() {
                item.image = root.join(&item.image);
            }
        }

        tracing::debug!(
            manifest = %path.display(),
            items = items.len(),
            "Loaded dataset manifest"
        );

        Ok(Self {
            path: path.to_path_buf(),
            items,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Dataset for ManifestDataset {
    type Item = ManifestItem;

    fn items(&self) -> &[ManifestItem] {
        &self.items
    }
}

impl DatasetItem for ManifestItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn subset(&self) -> Option<&str> {
        self.subset.as_deref()
    }

    fn image(&self) -> Result<Cow<'_, Image>> {
        let decoded = image_lib::open(&self.image).map_err(|source| Error::ImageLoad {
            item_id: self.id.clone(),
            path: self.image.clone(),
            source,
        })?;

        let height = decoded.height() as usize;
        let width = decoded.width() as usize;
        let color = decoded.color();
        let (channels, pixels) = match color {
            image_lib::ColorType::L8 => (1, decoded.into_bytes()),
            image_lib::ColorType::La8 => (2, decoded.into_bytes()),
            image_lib::ColorType::Rgb8 => (3, decoded.into_bytes()),
            image_lib::ColorType::Rgba8 => (4, decoded.into_bytes()),
            _ => {
                tracing::debug!(item = %self.id, ?color, "Converting image to 8-bit RGB");
                (3, decoded.to_rgb8().into_raw())
            }
        };

        let image = Image::new(ImageSize::with_channels(height, width, channels), pixels)
            .map_err(|source| Error::MalformedImage {
                item_id: self.id.clone(),
                source,
            })?;

        Ok(Cow::Owned(image))
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

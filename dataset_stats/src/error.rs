//! Error types for statistics computation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::image::ImageError;

/// Errors that can occur while loading datasets or computing statistics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Image of item '{item_id}' is malformed: {source}")]
    MalformedImage {
        item_id: String,
        #[source]
        source: ImageError,
    },

    #[error("Failed to load image of item '{item_id}' from '{path}': {source}")]
    ImageLoad {
        item_id: String,
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("Degenerate sample: count {count} leaves no observations")]
    DegenerateSample { count: u64 },

    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: common::SerdeFormatError,
    },

    #[error("Duplicate item id '{item_id}' in manifest '{path}'")]
    DuplicateItem { item_id: String, path: PathBuf },

    #[error(transparent)]
    UnsupportedFormat(#[from] common::FileExtensionError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[source] common::SerdeFormatError),
}

impl Error {
    /// Identifier of the dataset item the error refers to, if any.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Error::MalformedImage { item_id, .. }
            | Error::ImageLoad { item_id, .. }
            | Error::DuplicateItem { item_id, .. } => Some(item_id),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_image_names_item() {
        let err = Error::MalformedImage {
            item_id: "frame_017".to_string(),
            source: ImageError::EmptyImage {
                height: 0,
                width: 4,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("frame_017"));
        assert_eq!(err.item_id(), Some("frame_017"));
    }

    #[test]
    fn test_malformed_image_source_chain() {
        use std::error::Error as StdError;

        let err = Error::MalformedImage {
            item_id: "a".to_string(),
            source: ImageError::BufferSizeMismatch {
                expected: 12,
                actual: 10,
            },
        };
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("12"));
        assert!(source.contains("10"));
    }

    #[test]
    fn test_degenerate_sample_message() {
        let err = Error::DegenerateSample { count: 0 };
        assert!(err.to_string().contains("count 0"));
        assert_eq!(err.item_id(), None);
    }

    #[test]
    fn test_manifest_read_message() {
        let err = Error::ReadFile {
            path: PathBuf::from("/data/manifest.yaml"),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        assert!(err.to_string().contains("/data/manifest.yaml"));
        assert!(err.to_string().contains("file not found"));
    }
}

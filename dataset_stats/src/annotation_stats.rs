//! Tally of annotations by type and by attribute value.

use std::collections::BTreeMap;

use crate::dataset::{Dataset, DatasetItem};
use crate::report::AnnotationStatistics;

/// Counts annotations of every item.
///
/// Items without annotations are listed by id. Attribute values are keyed by
/// their string form.
pub fn compute_ann_statistics<D: Dataset>(dataset: &D) -> AnnotationStatistics {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_attribute: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    let mut unannotated = Vec::new();

    for item in dataset.items() {
        let annotations = item.annotations();
        if annotations.is_empty() {
            unannotated.push(item.id().to_string());
            continue;
        }

        for annotation in annotations {
            *by_type.entry(annotation.kind.to_string()).or_default() += 1;

            for (name, value) in &annotation.attributes {
                *by_attribute
                    .entry(name.clone())
                    .or_default()
                    .entry(value.to_string())
                    .or_default() += 1;
            }
        }
    }

    let total_annotations: usize = by_type.values().sum();
    tracing::info!(
        images = dataset.len(),
        annotations = total_annotations,
        unannotated = unannotated.len(),
        "Annotation statistics"
    );

    AnnotationStatistics {
        total_images: dataset.len(),
        total_annotations,
        annotations_by_type: by_type,
        annotations_by_attribute: by_attribute,
        unannotated_images: unannotated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Annotation, AnnotationType, MemoryDataset, MemoryItem};
    use crate::image::{Image, ImageSize};

    fn item(id: &str, annotations: Vec<Annotation>) -> MemoryItem {
        MemoryItem::new(id, Image::filled(ImageSize::gray(1, 1), 0).unwrap())
            .with_annotations(annotations)
    }

    #[test]
    fn test_two_annotations_and_one_unannotated_item() {
        let dataset = MemoryDataset::new(vec![
            item(
                "annotated",
                vec![
                    Annotation::new(AnnotationType::Bbox),
                    Annotation::new(AnnotationType::Bbox),
                ],
            ),
            item("empty", Vec::new()),
        ]);

        let stats = compute_ann_statistics(&dataset);
        assert_eq!(stats.total_images, 2);
        assert_eq!(stats.total_annotations, 2);
        assert_eq!(stats.annotations_by_type.len(), 1);
        assert_eq!(stats.annotations_by_type["bbox"], 2);
        assert_eq!(stats.unannotated_images, vec!["empty".to_string()]);
    }

    #[test]
    fn test_attributes_are_tallied_by_string_form() {
        let dataset = MemoryDataset::new(vec![
            item(
                "a",
                vec![
                    Annotation::new(AnnotationType::Polygon)
                        .with_attribute("occluded", true)
                        .with_attribute("score", 2.0),
                    Annotation::new(AnnotationType::Label).with_attribute("occluded", false),
                ],
            ),
            item(
                "b",
                vec![Annotation::new(AnnotationType::Points)
                    .with_attribute("occluded", true)
                    .with_attribute("score", "2.0")],
            ),
        ]);

        let stats = compute_ann_statistics(&dataset);
        assert_eq!(stats.total_annotations, 3);
        assert_eq!(stats.annotations_by_attribute["occluded"]["True"], 2);
        assert_eq!(stats.annotations_by_attribute["occluded"]["False"], 1);
        assert!(!stats.annotations_by_attribute["occluded"].contains_key("true"));
        // A float and a string with the same text share a key.
        assert_eq!(stats.annotations_by_attribute["score"]["2.0"], 2);
        assert!(stats.unannotated_images.is_empty());
    }

    #[test]
    fn test_repeated_calls_do_not_accumulate() {
        let dataset = MemoryDataset::new(vec![item(
            "a",
            vec![Annotation::new(AnnotationType::Mask).with_attribute("z", 1i64)],
        )]);
        let first = compute_ann_statistics(&dataset);
        let second = compute_ann_statistics(&dataset);
        assert_eq!(first, second);
        assert_eq!(second.annotations_by_attribute["z"]["1"], 1);
    }

    #[test]
    fn test_empty_dataset() {
        let stats = compute_ann_statistics(&MemoryDataset::default());
        assert_eq!(stats, AnnotationStatistics::default());
    }
}

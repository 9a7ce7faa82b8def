use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::file_format::FileFormat;

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

/// Serializes `value` to text. The output always ends with a single newline.
pub fn serialize<T: Serialize>(value: &T, format: FileFormat) -> SerdeFormatResult<String> {
    let mut text = match format {
        FileFormat::Yaml => serde_yml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

pub fn deserialize<T: DeserializeOwned + 'static>(
    serialized: &str,
    format: FileFormat,
) -> SerdeFormatResult<T> {
    match format {
        FileFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        FileFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn serialized_text_ends_with_newline() {
        let mut value = BTreeMap::new();
        value.insert("Total images".to_string(), 3u32);

        for format in [FileFormat::Yaml, FileFormat::Json] {
            let text = serialize(&value, format).unwrap();
            assert!(text.ends_with('\n'));
            assert!(!text.ends_with("\n\n"));
            assert!(text.contains("Total images"));
        }
    }

    #[test]
    fn deserializes_both_formats() {
        let yaml: BTreeMap<String, u32> = deserialize("a: 1\nb: 2\n", FileFormat::Yaml).unwrap();
        let json: BTreeMap<String, u32> =
            deserialize(r#"{"a": 1, "b": 2}"#, FileFormat::Json).unwrap();
        assert_eq!(yaml, json);
    }

    #[test]
    fn reports_parse_errors() {
        let result: SerdeFormatResult<BTreeMap<String, u32>> =
            deserialize("{not json", FileFormat::Json);
        assert!(matches!(result, Err(SerdeFormatError::Json(_))));
    }
}

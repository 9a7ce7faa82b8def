pub mod file_format;
pub mod log_setup;
pub mod serde;
pub mod test_utils;

pub use crate::file_format::{FileExtensionError, FileFormat};
pub use crate::serde::{deserialize, serialize, SerdeFormatError, SerdeFormatResult};

use crate::catalog::domain::ImagePayload;
use crate::shared::Result;
use std::path::Path;

/// ImagePayloadReader port for loading image files submitted with a product
pub trait ImagePayloadReader {
    /// Reads the image at `path` into memory
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file is not a supported image type or exceeds the size limit
    /// - The file cannot be read due to permissions or I/O errors
    fn read_payload(&self, path: &Path) -> Result<ImagePayload>;
}

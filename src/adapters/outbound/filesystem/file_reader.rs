use crate::catalog::domain::ImagePayload;
use crate::ports::outbound::ImagePayloadReader;
use crate::shared::security::{
    validate_file_size, validate_image_extension, validate_regular_file, MAX_IMAGE_SIZE,
};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for loading product images from local files
///
/// Every file is checked before it is read:
/// - it must be a regular file, not a symlink or directory
/// - it must carry an accepted image extension
/// - it must not exceed the provider's upload size limit
pub struct FileSystemReader {
    max_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_IMAGE_SIZE,
        }
    }

    #[cfg(test)]
    fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePayloadReader for FileSystemReader {
    fn read_payload(&self, path: &Path) -> Result<ImagePayload> {
        validate_regular_file(path, "image file")?;
        validate_image_extension(path)?;

        let metadata = fs::metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read image metadata: {}", e))?;
        validate_file_size(metadata.len(), path, self.max_size)?;

        let bytes =
            fs::read(path).map_err(|e| anyhow::anyhow!("Failed to read image file: {}", e))?;
        if bytes.is_empty() {
            anyhow::bail!("{} is empty", path.display());
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ImagePayload::new(file_name, bytes))
    }
}

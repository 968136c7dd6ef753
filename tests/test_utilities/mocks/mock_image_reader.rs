use std::path::Path;
use storefront_assets::prelude::*;

/// Mock ImagePayloadReader returning a few bytes named after the path
#[derive(Default, Clone)]
pub struct MockImageReader;

impl MockImageReader {
    pub fn new() -> Self {
        Self
    }
}

impl ImagePayloadReader for MockImageReader {
    fn read_payload(&self, path: &Path) -> Result<ImagePayload> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow::anyhow!("{} has no file name", path.display()))?;
        Ok(ImagePayload::new(file_name, b"image-bytes".to_vec()))
    }
}

use super::product::MAX_IMAGES;

/// Raw image file handed to the storage provider on product creation
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    file_name: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Bytes are omitted so a failed upload never dumps an image into the terminal.
impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The four optional image slots of the product form; empty slots are skipped
pub type ImageSlots = [Option<ImagePayload>; MAX_IMAGES];

//! The ICO container: header, directory table and concatenated payloads.

mod encode;
pub mod layout;
mod read;

pub use encode::{encode, encode_to, encoded_len};
pub use layout::{DirEntry, IconDirHeader};
pub use read::{IcoDirectory, read_directory};

use crate::size::IconSize;

/// One encoded frame (PNG stream or BMP DIB) and the size it was produced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    size: IconSize,
    data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(size: IconSize, data: Vec<u8>) -> Self {
        ImagePayload { size, data }
    }

    pub fn size(&self) -> IconSize {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

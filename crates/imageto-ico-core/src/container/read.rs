use std::io::Cursor;

use super::layout::{DIR_ENTRY_LEN, DirEntry, HEADER_LEN, IconDirHeader, RESOURCE_TYPE_ICON};
use crate::error::EncodeError;

/// Parsed header and directory table of an ICO file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoDirectory {
    pub header: IconDirHeader,
    pub entries: Vec<DirEntry>,
}

impl IcoDirectory {
    /// Payload bytes of entry `index` within `file`.
    ///
    /// `file` must be the buffer the directory was read from.
    pub fn payload<'a>(&self, file: &'a [u8], index: usize) -> Option<&'a [u8]> {
        self.entries
            .get(index)
            .and_then(DirEntry::data_range)
            .and_then(|range| file.get(range))
    }
}

/// Read and check the header and directory of an ICO file.
///
/// Every entry's payload range must lie inside `bytes`.
pub fn read_directory(bytes: &[u8]) -> Result<IcoDirectory, EncodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(EncodeError::Malformed(format!(
            "file is {} bytes, shorter than the {}-byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }

    let mut cursor = Cursor::new(bytes);
    let header = IconDirHeader::read_from(&mut cursor).map_err(malformed)?;

    if header.reserved != 0 {
        return Err(EncodeError::Malformed(format!(
            "reserved header field is {}, expected 0",
            header.reserved
        )));
    }
    if header.resource_type != RESOURCE_TYPE_ICON {
        return Err(EncodeError::Malformed(format!(
            "resource type is {}, expected {} (icon)",
            header.resource_type, RESOURCE_TYPE_ICON
        )));
    }
    if header.count == 0 {
        return Err(EncodeError::Malformed("directory has no entries".to_string()));
    }

    let table_end = HEADER_LEN + DIR_ENTRY_LEN * header.count as usize;
    if bytes.len() < table_end {
        return Err(EncodeError::Malformed(format!(
            "directory declares {} entries but the file ends at byte {}",
            header.count,
            bytes.len()
        )));
    }

    let mut entries = Vec::with_capacity(header.count as usize);
    for index in 0..header.count as usize {
        let entry = DirEntry::read_from(&mut cursor).map_err(malformed)?;
        let range = entry.data_range().ok_or_else(|| {
            EncodeError::Malformed(format!(
                "entry {} declares {} bytes at offset {}, past the addressable range",
                index, entry.data_size, entry.data_offset
            ))
        })?;

        if range.start < table_end || range.end > bytes.len() {
            return Err(EncodeError::Malformed(format!(
                "entry {} points at bytes {}..{} outside the payload region {}..{}",
                index,
                range.start,
                range.end,
                table_end,
                bytes.len()
            )));
        }

        entries.push(entry);
    }

    Ok(IcoDirectory { header, entries })
}

fn malformed(e: std::io::Error) -> EncodeError {
    EncodeError::Malformed(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ImagePayload, encode};
    use crate::size::IconSize;

    fn sample() -> Vec<u8> {
        encode(&[
            ImagePayload::new(IconSize::new(16).unwrap(), vec![1; 50]),
            ImagePayload::new(IconSize::new(256).unwrap(), vec![2; 80]),
        ])
        .unwrap()
    }

    #[test]
    fn reads_encoded_directory() {
        let bytes = sample();
        let dir = read_directory(&bytes).unwrap();

        assert_eq!(dir.header.count, 2);
        assert_eq!(dir.entries[0].pixel_width(), 16);
        assert_eq!(dir.entries[1].pixel_width(), 256);
        assert_eq!(dir.payload(&bytes, 0), Some(&[1u8; 50][..]));
        assert_eq!(dir.payload(&bytes, 1), Some(&[2u8; 80][..]));
        assert_eq!(dir.payload(&bytes, 2), None);
    }

    #[test]
    fn rejects_short_file() {
        assert!(matches!(read_directory(&[0, 0, 1]), Err(EncodeError::Malformed(_))));
    }

    #[test]
    fn rejects_cursor_type() {
        let mut bytes = sample();
        bytes[2] = 2;
        assert!(matches!(read_directory(&bytes), Err(EncodeError::Malformed(_))));
    }

    #[test]
    fn rejects_truncated_payload() {
        let bytes = sample();
        let truncated = &bytes[..bytes.len() - 1];
        assert!(matches!(read_directory(truncated), Err(EncodeError::Malformed(_))));
    }

    #[test]
    fn rejects_entry_reaching_past_u32_offsets() {
        let mut bytes = sample();
        // First entry: size and offset both u32::MAX.
        bytes[14..22].copy_from_slice(&[0xFF; 8]);
        assert!(matches!(read_directory(&bytes), Err(EncodeError::Malformed(_))));
    }

    #[test]
    fn rejects_missing_directory() {
        let bytes = [0u8, 0, 1, 0, 4, 0, 16, 16];
        assert!(matches!(read_directory(&bytes), Err(EncodeError::Malformed(_))));
    }
}

use std::io::Write;

use super::ImagePayload;
use super::layout::{DIR_ENTRY_LEN, DirEntry, HEADER_LEN, IconDirHeader};
use crate::error::EncodeError;

/// Encode the payloads into a complete ICO file.
///
/// Directory entries and the payload region follow the input order exactly;
/// nothing is sorted. The result is `6 + 16 * n + sum(payload lengths)` bytes.
pub fn encode(payloads: &[ImagePayload]) -> Result<Vec<u8>, EncodeError> {
    let (header, entries) = plan(payloads)?;

    let total = encoded_len(payloads);
    let mut out = Vec::with_capacity(total);

    // Writes into a Vec cannot fail.
    write_planned(&header, &entries, payloads, &mut out)
        .map_err(|e| EncodeError::Malformed(e.to_string()))?;

    debug_assert_eq!(out.len(), total);
    Ok(out)
}

/// Encode straight into a writer.
///
/// Validation happens before the first byte is written, so a contract
/// violation never leaves a partial container behind.
pub fn encode_to<W: Write>(payloads: &[ImagePayload], writer: &mut W) -> std::io::Result<()> {
    let (header, entries) =
        plan(payloads).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    write_planned(&header, &entries, payloads, writer)
}

/// Final file length for the given payloads, without encoding them.
pub fn encoded_len(payloads: &[ImagePayload]) -> usize {
    HEADER_LEN
        + DIR_ENTRY_LEN * payloads.len()
        + payloads.iter().map(ImagePayload::len).sum::<usize>()
}

/// Validate the input and compute every directory entry up front.
fn plan(payloads: &[ImagePayload]) -> Result<(IconDirHeader, Vec<DirEntry>), EncodeError> {
    if payloads.is_empty() {
        return Err(EncodeError::Empty);
    }

    let count =
        u16::try_from(payloads.len()).map_err(|_| EncodeError::TooManyImages(payloads.len()))?;

    // Payloads start right after the header and the directory table.
    let mut offset = (HEADER_LEN + DIR_ENTRY_LEN * payloads.len()) as u64;
    let mut entries = Vec::with_capacity(payloads.len());

    for (index, payload) in payloads.iter().enumerate() {
        if payload.is_empty() {
            return Err(EncodeError::EmptyPayload { index });
        }

        let data_size =
            u32::try_from(payload.len()).map_err(|_| EncodeError::PayloadTooLarge { index })?;
        let data_offset =
            u32::try_from(offset).map_err(|_| EncodeError::PayloadTooLarge { index })?;

        // The end of the last payload must be addressable as well.
        if offset + data_size as u64 > u32::MAX as u64 + 1 {
            return Err(EncodeError::PayloadTooLarge { index });
        }

        entries.push(DirEntry::square(payload.size(), data_size, data_offset));
        offset += data_size as u64;
    }

    Ok((IconDirHeader::icon(count), entries))
}

fn write_planned<W: Write>(
    header: &IconDirHeader,
    entries: &[DirEntry],
    payloads: &[ImagePayload],
    writer: &mut W,
) -> std::io::Result<()> {
    header.write_to(writer)?;
    for entry in entries {
        entry.write_to(writer)?;
    }
    for payload in payloads {
        writer.write_all(payload.data())?;
    }
    Ok(())
}

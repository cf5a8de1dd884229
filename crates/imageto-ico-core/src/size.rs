use std::fmt;

use serde::Serialize;

use crate::error::EncodeError;

/// Largest edge length an ICO directory entry can describe.
pub const MAX_ICON_SIZE: u16 = 256;

/// Sizes generated when the caller does not ask for specific ones.
pub const DEFAULT_SIZES: [u16; 6] = [16, 32, 48, 64, 128, 256];

/// Square edge length, in pixels, of one icon frame.
///
/// Always within `1..=256`, so it can be written into the one-byte
/// width/height fields of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u32")]
pub struct IconSize(u16);

impl IconSize {
    pub fn new(size: u32) -> Result<Self, EncodeError> {
        if size == 0 || size > MAX_ICON_SIZE as u32 {
            return Err(EncodeError::SizeOutOfRange(size));
        }
        Ok(IconSize(size as u16))
    }

    pub fn get(self) -> u32 {
        self.0 as u32
    }

    /// Width/height byte as stored in the directory: 256 is written as 0.
    pub fn directory_byte(self) -> u8 {
        if self.0 == MAX_ICON_SIZE { 0 } else { self.0 as u8 }
    }

    /// Inverse of [`IconSize::directory_byte`].
    pub fn from_directory_byte(byte: u8) -> Self {
        if byte == 0 {
            IconSize(MAX_ICON_SIZE)
        } else {
            IconSize(byte as u16)
        }
    }
}

impl TryFrom<u32> for IconSize {
    type Error = EncodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        IconSize::new(value)
    }
}

impl From<IconSize> for u32 {
    fn from(size: IconSize) -> Self {
        size.get()
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// The default size set, in ascending order.
pub fn default_sizes() -> Vec<IconSize> {
    DEFAULT_SIZES.iter().map(|&s| IconSize(s)).collect()
}

/// Parse a comma-separated size list such as `"16, 32,256"`.
///
/// Request order is kept, since it becomes the directory order of the
/// output file. Repeated sizes keep their first position.
pub fn parse_sizes(input: &str) -> Result<Vec<IconSize>, SizeListError> {
    let mut sizes = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let value: u32 = part
            .parse()
            .map_err(|_| SizeListError::NotANumber(part.to_string()))?;
        let size = IconSize::new(value).map_err(|_| SizeListError::OutOfRange(value))?;

        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }

    if sizes.is_empty() {
        return Err(SizeListError::Empty);
    }

    Ok(sizes)
}

/// Why a size list could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SizeListError {
    #[error("no icon sizes given")]
    Empty,
    #[error("'{0}' is not a valid icon size")]
    NotANumber(String),
    #[error("icon size {0} is outside the supported range 1-256")]
    OutOfRange(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_oversized() {
        assert_eq!(IconSize::new(0), Err(EncodeError::SizeOutOfRange(0)));
        assert_eq!(IconSize::new(257), Err(EncodeError::SizeOutOfRange(257)));
        assert!(IconSize::new(1).is_ok());
        assert!(IconSize::new(256).is_ok());
    }

    #[test]
    fn directory_byte_maps_only_256_to_zero() {
        assert_eq!(IconSize::new(256).unwrap().directory_byte(), 0);
        assert_eq!(IconSize::new(255).unwrap().directory_byte(), 255);
        assert_eq!(IconSize::new(1).unwrap().directory_byte(), 1);
        assert_eq!(IconSize::new(128).unwrap().directory_byte(), 128);
    }

    #[test]
    fn directory_byte_zero_reads_back_as_256() {
        assert_eq!(IconSize::from_directory_byte(0).get(), 256);
        assert_eq!(IconSize::from_directory_byte(48).get(), 48);
    }

    #[test]
    fn default_sizes_are_ascending() {
        let sizes: Vec<u32> = default_sizes().into_iter().map(IconSize::get).collect();
        assert_eq!(sizes, vec![16, 32, 48, 64, 128, 256]);
    }

    #[test]
    fn parse_keeps_request_order() {
        let sizes = parse_sizes("16, 256,48").unwrap();
        let raw: Vec<u32> = sizes.into_iter().map(IconSize::get).collect();
        assert_eq!(raw, vec![16, 256, 48]);
    }

    #[test]
    fn parse_drops_duplicates_and_blanks() {
        let sizes = parse_sizes("32,,32, 16,").unwrap();
        let raw: Vec<u32> = sizes.into_iter().map(IconSize::get).collect();
        assert_eq!(raw, vec![32, 16]);
    }

    #[test]
    fn parse_rejects_bad_entries() {
        assert_eq!(parse_sizes(""), Err(SizeListError::Empty));
        assert_eq!(parse_sizes(" , "), Err(SizeListError::Empty));
        assert_eq!(
            parse_sizes("16,abc"),
            Err(SizeListError::NotANumber("abc".to_string()))
        );
        assert_eq!(parse_sizes("16,512"), Err(SizeListError::OutOfRange(512)));
        assert_eq!(parse_sizes("-4"), Err(SizeListError::NotANumber("-4".to_string())));
    }

    #[test]
    fn display_shows_both_dimensions() {
        assert_eq!(IconSize::new(48).unwrap().to_string(), "48x48");
    }
}

use std::io;
use std::path::PathBuf;

use crate::size::IconSize;

/// Violations of the encoder's input contract, and malformed containers
/// found while reading one back.
///
/// Hitting one of the contract variants during a conversion means the
/// orchestration handed the encoder something it should have rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("no images to encode")]
    Empty,
    #[error("image {index} has an empty payload")]
    EmptyPayload { index: usize },
    #[error("icon size {0} is outside the encodable range 1-256")]
    SizeOutOfRange(u32),
    #[error("{0} images exceed the directory limit of 65535")]
    TooManyImages(usize),
    #[error("image {index} does not fit within a 4 GiB container")]
    PayloadTooLarge { index: usize },
    #[error("malformed ICO data: {0}")]
    Malformed(String),
}

/// Failure of one conversion job.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("unsupported input format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to decode '{}': {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("failed to rasterize at {size}: {reason}")]
    Rasterize { size: IconSize, reason: String },

    #[error("ICO encoding invariant violated: {0}")]
    EncodeInvariant(#[from] EncodeError),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = ConvertError::UnsupportedFormat {
            path: PathBuf::from("notes.txt"),
        };
        assert_eq!(err.to_string(), "unsupported input format: notes.txt");

        let err = ConvertError::Rasterize {
            size: IconSize::new(32).unwrap(),
            reason: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "failed to rasterize at 32x32: boom");
    }

    #[test]
    fn encode_errors_convert_into_invariant_violation() {
        let err: ConvertError = EncodeError::Empty.into();
        assert!(matches!(err, ConvertError::EncodeInvariant(EncodeError::Empty)));
    }
}

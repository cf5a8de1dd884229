//! Image to multi-resolution ICO conversion.
//!
//! [`container::encode`] lays out the ICO file itself. The [`producer`]
//! module renders a source image into one encoded frame per requested
//! size, and [`convert`] ties the two together for whole files.

pub mod container;
pub mod convert;
pub mod error;
pub mod format;
pub mod producer;
pub mod size;

pub use container::{ImagePayload, encode};
pub use convert::{
    ConversionResult, ConvertOptions, Converter, batch_convert, convert, default_output_path,
};
pub use error::{ConvertError, EncodeError};
pub use format::{InputFormat, is_supported, supported_input_formats};
pub use producer::{PayloadFormat, PayloadProducer, SourceImage};
pub use size::{DEFAULT_SIZES, IconSize, parse_sizes};

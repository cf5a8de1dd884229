//! Payload producers: turn a source image into one encoded frame per size.
//!
//! The encoder never sees pixels. It only receives `(size, bytes)` pairs
//! from a [`PayloadProducer`], so any rasterizer can be plugged in.

mod encode;
mod raster;
mod vector;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::RgbaImage;
use serde::Serialize;

use crate::container::ImagePayload;
use crate::error::ConvertError;
use crate::format::InputFormat;
use crate::size::IconSize;

/// How each frame is stored inside the container.
///
/// PNG is understood by every current ICO reader and keeps files small.
/// BMP (a DIB with an AND mask) is what pre-Vista readers expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    #[default]
    Png,
    Bmp,
}

impl FromStr for PayloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(PayloadFormat::Png),
            "bmp" | "dib" => Ok(PayloadFormat::Bmp),
            other => Err(format!("unknown payload format '{}' (expected png or bmp)", other)),
        }
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadFormat::Png => f.write_str("png"),
            PayloadFormat::Bmp => f.write_str("bmp"),
        }
    }
}

/// What was decoded from the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub format: InputFormat,
    pub width: u32,
    pub height: u32,
}

/// Produces one square, transparent-padded, encoded frame per request.
pub trait PayloadProducer {
    fn source_info(&self) -> SourceInfo;

    fn produce(&self, size: IconSize, format: PayloadFormat) -> Result<ImagePayload, ConvertError>;
}

enum Source {
    Raster(image::DynamicImage),
    Vector(resvg::usvg::Tree),
}

/// A decoded source image, ready to be rendered at any icon size.
pub struct SourceImage {
    source: Source,
    info: SourceInfo,
}

impl SourceImage {
    /// Read and decode `path`. The extension picks the decoder for SVG;
    /// raster files are sniffed by content so a mislabeled file still loads.
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let declared = InputFormat::from_path(path).ok_or_else(|| ConvertError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConvertError::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => decode_error(path, e),
        })?;

        Self::from_bytes(&bytes, declared).map_err(|reason| ConvertError::Decode {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Decode an in-memory source. `declared` is the format the caller
    /// expects; raster content that sniffs as another format wins.
    pub fn from_bytes(bytes: &[u8], declared: InputFormat) -> Result<Self, String> {
        match declared {
            InputFormat::Svg => {
                let tree = vector::parse(bytes)?;
                let (width, height) = vector::dimensions(&tree);
                Ok(SourceImage {
                    source: Source::Vector(tree),
                    info: SourceInfo {
                        format: InputFormat::Svg,
                        width,
                        height,
                    },
                })
            }
            _ => {
                let (image, format) = raster::decode(bytes, declared)?;
                Ok(SourceImage {
                    info: SourceInfo {
                        format,
                        width: image.width(),
                        height: image.height(),
                    },
                    source: Source::Raster(image),
                })
            }
        }
    }

    fn render(&self, size: IconSize) -> Result<RgbaImage, String> {
        match &self.source {
            Source::Raster(image) => raster::fit_contain(image, size.get()),
            Source::Vector(tree) => vector::render(tree, size.get()),
        }
    }
}

impl PayloadProducer for SourceImage {
    fn source_info(&self) -> SourceInfo {
        self.info
    }

    fn produce(&self, size: IconSize, format: PayloadFormat) -> Result<ImagePayload, ConvertError> {
        let rasterize_error = |reason: String| ConvertError::Rasterize { size, reason };

        let frame = self.render(size).map_err(rasterize_error)?;
        let data = encode::encode_frame(frame, format).map_err(rasterize_error)?;

        log::debug!("rendered {} frame: {} bytes as {}", size, data.len(), format);
        Ok(ImagePayload::new(size, data))
    }
}

fn decode_error(path: &Path, e: impl fmt::Display) -> ConvertError {
    ConvertError::Decode {
        path: PathBuf::from(path),
        reason: e.to_string(),
    }
}

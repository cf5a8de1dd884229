use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Source image formats accepted for conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
    Svg,
    Tiff,
    Bmp,
}

const SUPPORTED: &[InputFormat] = &[
    InputFormat::Png,
    InputFormat::Jpeg,
    InputFormat::Webp,
    InputFormat::Gif,
    InputFormat::Svg,
    InputFormat::Tiff,
    InputFormat::Bmp,
];

impl InputFormat {
    /// Match a file extension, ignoring case and a leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(InputFormat::Png),
            "jpg" | "jpeg" => Some(InputFormat::Jpeg),
            "webp" => Some(InputFormat::Webp),
            "gif" => Some(InputFormat::Gif),
            "svg" => Some(InputFormat::Svg),
            "tif" | "tiff" => Some(InputFormat::Tiff),
            "bmp" => Some(InputFormat::Bmp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Extensions recognized for this format, primary first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            InputFormat::Png => &["png"],
            InputFormat::Jpeg => &["jpg", "jpeg"],
            InputFormat::Webp => &["webp"],
            InputFormat::Gif => &["gif"],
            InputFormat::Svg => &["svg"],
            InputFormat::Tiff => &["tiff", "tif"],
            InputFormat::Bmp => &["bmp"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Png => "png",
            InputFormat::Jpeg => "jpeg",
            InputFormat::Webp => "webp",
            InputFormat::Gif => "gif",
            InputFormat::Svg => "svg",
            InputFormat::Tiff => "tiff",
            InputFormat::Bmp => "bmp",
        }
    }

    /// Matching `image` crate format, or `None` for vector sources.
    pub(crate) fn raster_format(self) -> Option<image::ImageFormat> {
        match self {
            InputFormat::Png => Some(image::ImageFormat::Png),
            InputFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            InputFormat::Webp => Some(image::ImageFormat::WebP),
            InputFormat::Gif => Some(image::ImageFormat::Gif),
            InputFormat::Tiff => Some(image::ImageFormat::Tiff),
            InputFormat::Bmp => Some(image::ImageFormat::Bmp),
            InputFormat::Svg => None,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every input format the converter accepts.
pub fn supported_input_formats() -> &'static [InputFormat] {
    SUPPORTED
}

/// Extension-based pre-check, done before any decoding is attempted.
pub fn is_supported(path: &Path) -> bool {
    InputFormat::from_path(path).is_some()
}

/// All accepted extensions, for help and error messages.
pub fn supported_extensions() -> Vec<&'static str> {
    SUPPORTED.iter().flat_map(|f| f.extensions().iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_supported(Path::new("logo.PNG")));
        assert!(is_supported(Path::new("/tmp/photo.Jpeg")));
        assert!(is_supported(Path::new("scan.tif")));
        assert!(is_supported(Path::new("vector.svg")));
    }

    #[test]
    fn unknown_or_missing_extension_is_unsupported() {
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("README")));
        assert!(!is_supported(Path::new("archive.png.zip")));
        assert!(!is_supported(Path::new("icon.ico")));
    }

    #[test]
    fn jpg_and_jpeg_share_a_format() {
        assert_eq!(InputFormat::from_extension("jpg"), Some(InputFormat::Jpeg));
        assert_eq!(InputFormat::from_extension(".JPEG"), Some(InputFormat::Jpeg));
    }

    #[test]
    fn supported_list_covers_every_extension() {
        let exts = supported_extensions();
        for ext in ["png", "jpg", "jpeg", "webp", "gif", "svg", "tiff", "bmp"] {
            assert!(exts.contains(&ext), "missing {}", ext);
        }
        assert_eq!(supported_input_formats().len(), 7);
    }

    #[test]
    fn only_svg_lacks_a_raster_decoder() {
        for format in supported_input_formats() {
            assert_eq!(format.raster_format().is_none(), *format == InputFormat::Svg);
        }
    }
}

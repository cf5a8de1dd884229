use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};

use crate::format::InputFormat;

/// Decode raster bytes, trusting the content signature over `declared`.
pub(super) fn decode(
    bytes: &[u8],
    declared: InputFormat,
) -> Result<(DynamicImage, InputFormat), String> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| format!("failed to read image header: {}", e))?;

    let format = match reader.format().and_then(input_format) {
        Some(sniffed) => sniffed,
        None => {
            let fallback = declared
                .raster_format()
                .ok_or_else(|| format!("{} is not a raster format", declared))?;
            reader.set_format(fallback);
            declared
        }
    };

    let image = reader.decode().map_err(|e| e.to_string())?;
    if image.width() == 0 || image.height() == 0 {
        return Err("image has no pixels".to_string());
    }

    Ok((image, format))
}

fn input_format(format: ImageFormat) -> Option<InputFormat> {
    match format {
        ImageFormat::Png => Some(InputFormat::Png),
        ImageFormat::Jpeg => Some(InputFormat::Jpeg),
        ImageFormat::WebP => Some(InputFormat::Webp),
        ImageFormat::Gif => Some(InputFormat::Gif),
        ImageFormat::Tiff => Some(InputFormat::Tiff),
        ImageFormat::Bmp => Some(InputFormat::Bmp),
        _ => None,
    }
}

/// Scale `image` to fit inside a `size` square, keeping its aspect ratio,
/// and center it on a fully transparent canvas.
pub(super) fn fit_contain(image: &DynamicImage, size: u32) -> Result<RgbaImage, String> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err("source image has no pixels".to_string());
    }

    let (fit_w, fit_h) = fitted_dimensions(width, height, size);
    let resized = image.resize_exact(fit_w, fit_h, FilterType::Lanczos3).to_rgba8();

    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let x = (size - fit_w) / 2;
    let y = (size - fit_h) / 2;
    imageops::replace(&mut canvas, &resized, x as i64, y as i64);

    Ok(canvas)
}

/// Largest `w x h` with the source's aspect ratio that fits in `size`.
/// Neither side drops below one pixel.
pub(super) fn fitted_dimensions(width: u32, height: u32, size: u32) -> (u32, u32) {
    let scale = f64::min(size as f64 / width as f64, size as f64 / height as f64);
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, size);
    (fit(width), fit(height))
}

use std::io::{self, Cursor, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use image::{ImageFormat, RgbaImage};

use super::PayloadFormat;

const BITMAPINFOHEADER_SIZE: u32 = 40;

/// Serialize one square frame as a standalone payload.
pub(super) fn encode_frame(frame: RgbaImage, format: PayloadFormat) -> Result<Vec<u8>, String> {
    match format {
        PayloadFormat::Png => {
            let mut buf = Vec::new();
            frame
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                .map_err(|e| format!("failed to encode PNG: {}", e))?;
            Ok(buf)
        }
        PayloadFormat::Bmp => {
            encode_dib(&frame).map_err(|e| format!("failed to encode BMP: {}", e))
        }
    }
}

/// 32-bit BGRA DIB as stored inside ICO files: no file header, height
/// doubled to cover the XOR and AND planes, rows bottom-up, followed by a
/// 1-bit AND mask set wherever the pixel is fully transparent.
fn encode_dib(frame: &RgbaImage) -> io::Result<Vec<u8>> {
    let (width, height) = frame.dimensions();
    let color_len = (width * height * 4) as usize;
    let mask_stride = width.div_ceil(32) as usize * 4;
    let mask_len = mask_stride * height as usize;

    let mut out = Vec::with_capacity(BITMAPINFOHEADER_SIZE as usize + color_len + mask_len);

    out.write_u32::<LittleEndian>(BITMAPINFOHEADER_SIZE)?;
    out.write_i32::<LittleEndian>(width as i32)?;
    out.write_i32::<LittleEndian>(height as i32 * 2)?;
    out.write_u16::<LittleEndian>(1)?; // planes
    out.write_u16::<LittleEndian>(32)?; // bits per pixel
    out.write_u32::<LittleEndian>(0)?; // BI_RGB
    out.write_u32::<LittleEndian>((color_len + mask_len) as u32)?;
    out.write_i32::<LittleEndian>(0)?;
    out.write_i32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;

    for y in (0..height).rev() {
        for x in 0..width {
            let [r, g, b, a] = frame.get_pixel(x, y).0;
            out.write_all(&[b, g, r, a])?;
        }
    }

    for y in (0..height).rev() {
        let mut row = vec![0u8; mask_stride];
        for x in 0..width {
            if frame.get_pixel(x, y)[3] == 0 {
                row[(x / 8) as usize] |= 0x80 >> (x % 8);
            }
        }
        out.write_all(&row)?;
    }

    Ok(out)
}

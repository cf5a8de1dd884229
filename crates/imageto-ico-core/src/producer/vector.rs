use std::sync::Arc;

use image::RgbaImage;
use resvg::{tiny_skia, usvg};

/// Parse an SVG document. System fonts are loaded so `<text>` renders.
pub(super) fn parse(bytes: &[u8]) -> Result<usvg::Tree, String> {
    let mut opt = usvg::Options::default();
    Arc::make_mut(&mut opt.fontdb).load_system_fonts();

    usvg::Tree::from_data(bytes, &opt).map_err(|e| format!("failed to parse SVG: {}", e))
}

/// Intrinsic size of the document, rounded to whole pixels.
pub(super) fn dimensions(tree: &usvg::Tree) -> (u32, u32) {
    let size = tree.size();
    (size.width().round().max(1.0) as u32, size.height().round().max(1.0) as u32)
}

/// Render the document centered in a transparent `size` square.
pub(super) fn render(tree: &usvg::Tree, size: u32) -> Result<RgbaImage, String> {
    let svg_w = tree.size().width();
    let svg_h = tree.size().height();
    let edge = size as f32;

    let scale = f32::min(edge / svg_w, edge / svg_h);
    let tx = (edge - svg_w * scale) / 2.0;
    let ty = (edge - svg_h * scale) / 2.0;

    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| format!("failed to allocate {}x{} pixmap", size, size))?;
    let transform = tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, tx, ty);
    resvg::render(tree, transform, &mut pixmap.as_mut());

    // Pixmaps hold premultiplied color; frames are straight RGBA.
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(size, size, rgba)
        .ok_or_else(|| "rendered buffer has the wrong length".to_string())
}

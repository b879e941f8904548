//! PNG export by rasterizing the SVG rendering

use anyhow::Result;
use tracing::debug;

use crate::core::DiagramError;

/// Rasterize an SVG document into PNG bytes
pub fn svg_to_png(svg: &str) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.font_family = "monospace".to_string();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| DiagramError::export_error(format!("invalid SVG: {}", e)))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| DiagramError::export_error("failed to allocate pixmap"))?;

    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());
    let bytes = pixmap
        .encode_png()
        .map_err(|e| DiagramError::export_error(format!("PNG encoding failed: {}", e)))?;

    debug!(
        width = size.width(),
        height = size.height(),
        bytes = bytes.len(),
        "Encoded PNG"
    );
    Ok(bytes)
}

use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    foundation::core::Canvas,
    foundation::error::{AnimateError, AnimateResult},
};

/// SVG-to-PNG rasterizer. The font database is loaded once and shared by every frame.
pub struct SvgRasterizer {
    options: usvg::Options<'static>,
}

impl SvgRasterizer {
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "font database loaded");
        Self {
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    /// Rasterize `svg` at exactly `canvas` pixels into straight-alpha RGBA8.
    pub fn rasterize(&self, svg: &str, canvas: Canvas) -> AnimateResult<Vec<u8>> {
        let tree = usvg::Tree::from_data(svg.as_bytes(), &self.options).context("parse frame svg")?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| AnimateError::io("failed to allocate frame pixmap"))?;

        let sx = canvas.width as f32 / tree.size().width();
        let sy = canvas.height as f32 / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let mut rgba = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(rgba)
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_png(path: &Path, rgba: &[u8], canvas: Canvas) -> AnimateResult<()> {
    image::save_buffer_with_format(
        path,
        rgba,
        canvas.width,
        canvas.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

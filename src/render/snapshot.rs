use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::Context;

use crate::document::tree::SvgDocument;
use crate::document::write::to_svg_string;
use crate::foundation::error::{SvgStepError, SvgStepResult};
use crate::foundation::math::demultiply_rgba8_in_place;

const MAX_DIM: u32 = 16_384;

/// Options for [`rasterize`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapshotOpts {
    /// Output pixels per SVG user unit.
    pub scale: f64,
    /// Straight-alpha RGBA8 fill behind the drawing; transparent when `None`.
    pub background: Option<[u8; 4]>,
}

impl Default for SnapshotOpts {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

/// A rasterized document state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8 pixels, row-major.
    pub rgba8: Vec<u8>,
}

impl Snapshot {
    /// RGBA8 pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.rgba8.get(i..i + 4)?.try_into().ok()
    }

    /// Encode as PNG at `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> SvgStepResult<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.rgba8,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png {}", path.display()))?;
        Ok(())
    }
}

/// Current animated state as standalone SVG text.
pub fn write_svg(doc: &SvgDocument) -> String {
    to_svg_string(doc)
}

/// Rasterize the current animated state.
#[tracing::instrument(skip(doc))]
pub fn rasterize(doc: &SvgDocument, opts: &SnapshotOpts) -> SvgStepResult<Snapshot> {
    if !opts.scale.is_finite() || opts.scale <= 0.0 {
        return Err(SvgStepError::render(format!(
            "snapshot scale must be finite and > 0, got {}",
            opts.scale
        )));
    }

    let svg = to_svg_string(doc);
    let usvg_opts = usvg::Options {
        fontdb: system_fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &usvg_opts)
        .map_err(|e| SvgStepError::render(format!("svg not renderable: {e}")))?;

    let size = tree.size();
    let width = to_px(f64::from(size.width()) * opts.scale)?;
    let height = to_px(f64::from(size.height()) * opts.scale)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SvgStepError::render("failed to allocate snapshot pixmap"))?;
    if let Some([r, g, b, a]) = opts.background {
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
    }
    let sx = width as f32 / size.width();
    let sy = height as f32 / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut rgba8 = pixmap.take();
    demultiply_rgba8_in_place(&mut rgba8);
    tracing::debug!(width, height, "rasterized snapshot");
    Ok(Snapshot {
        width,
        height,
        rgba8,
    })
}

fn to_px(v: f64) -> SvgStepResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(SvgStepError::render("svg has invalid width/height"));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_DIM {
        return Err(SvgStepError::render(format!(
            "snapshot size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px)
}

fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    })
    .clone()
}

#[cfg(test)]
#[path = "../../tests/unit/render/snapshot.rs"]
mod tests;

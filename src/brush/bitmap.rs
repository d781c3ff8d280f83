//! Stamp bitmaps: a solid rectangle masked by a stretched source alpha image.

use std::{path::Path, sync::Arc};

use anyhow::Context;
use image::imageops::FilterType;

use crate::{
    color::codec::{HexColor, Rgba8},
    foundation::{core::Extent, error::PaintResult},
    raster::buffer::PixelBuffer,
};

/// Source alpha image of a brush. `Pending` until the host delivers decoded pixels.
#[derive(Clone, Debug, Default)]
pub enum BrushImage {
    /// Not loaded yet; stamps built from it are unavailable.
    #[default]
    Pending,
    /// Decoded RGBA8 pixels; only the alpha channel is used.
    Ready(Arc<image::RgbaImage>),
}

impl BrushImage {
    /// Placeholder for an image that is still loading.
    pub fn pending() -> Self {
        Self::Pending
    }

    /// Wrap decoded pixels.
    pub fn from_rgba(img: image::RgbaImage) -> Self {
        Self::Ready(Arc::new(img))
    }

    /// Decode encoded image bytes (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> PaintResult<Self> {
        let img = image::load_from_memory(bytes).context("decode brush image from memory")?;
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> PaintResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("open brush image '{}'", path.display()))?;
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    /// Fully opaque square mask.
    pub fn solid(size: u32) -> Self {
        Self::from_rgba(image::RgbaImage::from_pixel(
            size,
            size,
            image::Rgba([255, 255, 255, 255]),
        ))
    }

    /// Round mask with a linear falloff over the outer quarter of the radius.
    pub fn round(diameter: u32) -> Self {
        let r = f64::from(diameter) / 2.0;
        let img = image::RgbaImage::from_fn(diameter, diameter, |x, y| {
            let dx = f64::from(x) + 0.5 - r;
            let dy = f64::from(y) + 0.5 - r;
            let d = (dx * dx + dy * dy).sqrt() / r;
            let a = if d <= 0.75 {
                1.0
            } else {
                ((1.0 - d) / 0.25).clamp(0.0, 1.0)
            };
            image::Rgba([255, 255, 255, (a * 255.0).round() as u8])
        });
        Self::from_rgba(img)
    }

    /// True once pixels are available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Render a `size` stamp in `color` masked by the alpha of `image`.
///
/// Returns `None` while `image` is pending.
pub fn build_stamp(size: Extent, color: HexColor, image: &BrushImage) -> Option<PixelBuffer> {
    let BrushImage::Ready(src) = image else {
        return None;
    };

    let mut stamp = PixelBuffer::filled(size.width, size.height, color.to_packed(1.0));
    if size.is_empty() || src.width() == 0 || src.height() == 0 {
        stamp.clear();
        return Some(stamp);
    }

    let mask = if src.dimensions() == (size.width, size.height) {
        None
    } else {
        Some(image::imageops::resize(
            src.as_ref(),
            size.width,
            size.height,
            FilterType::Triangle,
        ))
    };
    let mask = mask.as_ref().unwrap_or(src.as_ref());

    for (px, m) in stamp.pixels_mut().iter_mut().zip(mask.pixels()) {
        *px = match m[3] {
            0 => Rgba8::TRANSPARENT.pack(),
            a => Rgba8::new(color.r, color.g, color.b, a).pack(),
        };
    }
    Some(stamp)
}

#[cfg(test)]
#[path = "../../tests/unit/brush/bitmap.rs"]
mod tests;

use rayon::prelude::*;

use crate::{
    color::codec::Rgba8,
    foundation::{
        core::Extent,
        error::{PaintError, PaintResult},
        math::unit_to_u8,
    },
    raster::composite::BlendOp,
};

/// Row-major buffer of packed `0xAABBGGRR` pixels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    extent: Extent,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Transparent buffer of `width` x `height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Buffer with every pixel set to `packed`.
    pub fn filled(width: u32, height: u32, packed: u32) -> Self {
        let extent = Extent::new(width, height);
        Self {
            extent,
            pixels: vec![packed; extent.area()],
        }
    }

    /// Wrap existing pixels; `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> PaintResult<Self> {
        let extent = Extent::new(width, height);
        if pixels.len() != extent.area() {
            return Err(PaintError::validation(format!(
                "pixel buffer expects {} pixels for {width}x{height}, got {}",
                extent.area(),
                pixels.len()
            )));
        }
        Ok(Self { extent, pixels })
    }

    /// Copy pixels out of an `image` RGBA8 buffer.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| Rgba8::new(p[0], p[1], p[2], p[3]).pack())
            .collect();
        Self {
            extent: Extent::new(width, height),
            pixels,
        }
    }

    /// Convert to an `image` RGBA8 buffer (straight alpha).
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect();
        image::RgbaImage::from_raw(self.extent.width, self.extent.height, raw)
            .unwrap_or_else(|| image::RgbaImage::new(self.extent.width, self.extent.height))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.extent.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// Dimensions.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Packed pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Packed pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.extent.width || y >= self.extent.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.extent.width as usize + x as usize)
            .copied()
    }

    /// Decomposed pixel at `(x, y)`.
    pub fn rgba(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.get(x, y).map(Rgba8::from_packed)
    }

    /// Set the pixel at `(x, y)`; ignored outside the buffer.
    pub fn put(&mut self, x: u32, y: u32, packed: u32) {
        if x >= self.extent.width || y >= self.extent.height {
            return;
        }
        let idx = y as usize * self.extent.width as usize + x as usize;
        self.pixels[idx] = packed;
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Set every pixel to `packed`.
    pub fn fill(&mut self, packed: u32) {
        self.pixels.fill(packed);
    }

    /// Replace contents with `src`, which must have the same extent.
    pub fn copy_from(&mut self, src: &PixelBuffer) -> PaintResult<()> {
        if src.extent != self.extent {
            return Err(PaintError::validation(
                "copy_from expects buffers of equal size",
            ));
        }
        self.pixels.copy_from_slice(&src.pixels);
        Ok(())
    }

    /// Reallocate to `extent`, keeping the overlapping top-left area.
    pub fn resize_preserving(&mut self, extent: Extent) {
        if extent == self.extent {
            return;
        }
        let mut next = Self::new(extent.width, extent.height);
        let w = self.extent.width.min(extent.width) as usize;
        let h = self.extent.height.min(extent.height) as usize;
        for y in 0..h {
            let src = y * self.extent.width as usize;
            let dst = y * extent.width as usize;
            next.pixels[dst..dst + w].copy_from_slice(&self.pixels[src..src + w]);
        }
        *self = next;
    }

    /// Reallocate to `extent` with transparent contents.
    pub fn resize_cleared(&mut self, extent: Extent) {
        if extent == self.extent {
            self.clear();
            return;
        }
        *self = Self::new(extent.width, extent.height);
    }

    /// Composite all of `src` (same extent) onto this buffer.
    pub fn composite(&mut self, src: &PixelBuffer, opacity: f32, op: BlendOp) -> PaintResult<()> {
        if src.extent != self.extent {
            return Err(PaintError::validation(
                "composite expects buffers of equal size",
            ));
        }
        let coverage = unit_to_u8(opacity);
        if coverage == 0 {
            return Ok(());
        }
        self.pixels
            .par_iter_mut()
            .zip(src.pixels.par_iter())
            .for_each(|(d, &s)| *d = op.apply(*d, s, coverage));
        Ok(())
    }

    /// Composite `src` with its top-left corner at `(x, y)`, clipped to this buffer.
    pub fn draw(&mut self, src: &PixelBuffer, x: i64, y: i64, opacity: f32, op: BlendOp) {
        let coverage = unit_to_u8(opacity);
        if coverage == 0 || src.extent.is_empty() || self.extent.is_empty() {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(src.extent.width)).min(i64::from(self.extent.width));
        let y1 = (y + i64::from(src.extent.height)).min(i64::from(self.extent.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let dst_w = self.extent.width as usize;
        let src_w = src.extent.width as usize;
        let span = (x1 - x0) as usize;
        for dy in y0..y1 {
            let sy = (dy - y) as usize;
            let sx = (x0 - x) as usize;
            let d_row = dy as usize * dst_w + x0 as usize;
            let s_row = sy * src_w + sx;
            let dst = &mut self.pixels[d_row..d_row + span];
            let src = &src.pixels[s_row..s_row + span];
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = op.apply(*d, s, coverage);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;

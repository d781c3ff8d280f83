pub(crate) mod bitmap;

use kurbo::Point;

use crate::{
    brush::bitmap::{BrushImage, build_stamp},
    color::codec::HexColor,
    foundation::core::Extent,
    raster::buffer::PixelBuffer,
};

/// Construction options for a new brush.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrushOptions {
    /// Solid stamp color.
    pub color: HexColor,
    /// Stamp width in pixels.
    pub width: u32,
    /// Stamp height in pixels.
    pub height: u32,
    /// Opacity fraction applied when the stroke is merged onto the surface.
    pub opacity: f32,
}

impl Default for BrushOptions {
    fn default() -> Self {
        Self {
            color: HexColor::default(),
            width: 50,
            height: 50,
            opacity: 1.0,
        }
    }
}

/// Snapshot of a brush's user-visible properties.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BrushProperties {
    /// Brush index.
    pub id: usize,
    /// Stamp width in pixels.
    pub width: u32,
    /// Stamp height in pixels.
    pub height: u32,
    /// Opacity fraction.
    pub opacity: f32,
    /// Solid stamp color.
    pub color: HexColor,
}

/// Partial property update; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct BrushUpdate {
    /// New stamp width.
    pub width: Option<u32>,
    /// New stamp height.
    pub height: Option<u32>,
    /// New opacity fraction.
    pub opacity: Option<f32>,
    /// New solid color.
    pub color: Option<HexColor>,
    /// Replacement source image.
    #[serde(skip)]
    pub image: Option<BrushImage>,
}

/// A stamp source with a cached bitmap.
#[derive(Clone, Debug)]
pub struct Brush {
    id: usize,
    width: u32,
    height: u32,
    half_width: f64,
    half_height: f64,
    color: HexColor,
    opacity: f32,
    image: BrushImage,
    stamp: Option<PixelBuffer>,
}

impl Brush {
    pub(crate) fn new(id: usize, image: BrushImage, opts: BrushOptions) -> Self {
        let mut brush = Self {
            id,
            width: opts.width,
            height: opts.height,
            half_width: 0.0,
            half_height: 0.0,
            color: opts.color,
            opacity: clamp_opacity(opts.opacity),
            image,
            stamp: None,
        };
        brush.rebuild();
        brush
    }

    /// Brush index.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Stamp size.
    pub fn size(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Solid stamp color.
    pub fn color(&self) -> HexColor {
        self.color
    }

    /// Opacity fraction.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Packed fill value used by the flood fill.
    pub fn packed_color(&self) -> u32 {
        self.color.to_packed(self.opacity)
    }

    /// Copy of the user-visible properties.
    pub fn properties(&self) -> BrushProperties {
        BrushProperties {
            id: self.id,
            width: self.width,
            height: self.height,
            opacity: self.opacity,
            color: self.color,
        }
    }

    /// Cached stamp, or `None` while the source image is pending.
    pub fn stamp(&self) -> Option<&PixelBuffer> {
        self.stamp.as_ref()
    }

    /// True when stamping would draw something.
    pub fn is_ready(&self) -> bool {
        self.stamp.is_some()
    }

    /// Top-left pixel of a stamp centered on `p`.
    pub fn stamp_origin(&self, p: Point) -> (i64, i64) {
        (
            (p.x - self.half_width).round() as i64,
            (p.y - self.half_height).round() as i64,
        )
    }

    pub(crate) fn apply(&mut self, update: BrushUpdate) {
        if let Some(w) = update.width {
            self.width = w;
        }
        if let Some(h) = update.height {
            self.height = h;
        }
        if let Some(o) = update.opacity {
            self.opacity = clamp_opacity(o);
        }
        if let Some(c) = update.color {
            self.color = c;
        }
        if let Some(img) = update.image {
            self.image = img;
        }
        self.rebuild();
    }

    pub(crate) fn complete_image(&mut self, image: BrushImage) {
        self.image = image;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.half_width = f64::from(self.width) / 2.0;
        self.half_height = f64::from(self.height) / 2.0;
        self.stamp = build_stamp(self.size(), self.color, &self.image);
    }
}

fn clamp_opacity(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/mod.rs"]
mod tests;

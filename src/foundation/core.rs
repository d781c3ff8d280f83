pub use kurbo::{Point, Rect, Vec2};

/// Pixel dimensions of a surface, layer or stamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent {
    /// Build an extent from explicit dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel size of a layout rectangle; fractional parts are truncated and negative or
    /// non-finite sizes collapse to zero.
    pub fn from_rect(rect: Rect) -> Self {
        fn dim(v: f64) -> u32 {
            if v.is_finite() && v > 0.0 {
                v.min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        Self {
            width: dim(rect.width()),
            height: dim(rect.height()),
        }
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when `(x, y)` addresses a pixel inside the extent.
    pub fn contains(self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }
}

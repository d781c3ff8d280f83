//! Per-pixel compositing on packed straight-alpha pixels.

use crate::{
    color::codec::Rgba8,
    foundation::math::{mul_div255_u8, unit_to_u8},
};

/// How a source pixel is merged onto a destination pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendOp {
    /// Source drawn over destination.
    #[default]
    Over,
    /// Source coverage removed from destination; source color is ignored.
    DestinationOut,
}

impl BlendOp {
    /// Apply this operator with `coverage` (the opacity already quantized to 0..=255).
    pub(crate) fn apply(self, dst: u32, src: u32, coverage: u8) -> u32 {
        match self {
            Self::Over => over_px(dst, src, coverage),
            Self::DestinationOut => destination_out_px(dst, src, coverage),
        }
    }
}

/// Source-over of `src` onto `dst` with `opacity` applied to the source.
pub fn over(dst: u32, src: u32, opacity: f32) -> u32 {
    over_px(dst, src, unit_to_u8(opacity))
}

/// Destination-out: scales `dst` alpha by `1 - src.a * opacity`, keeping its color.
pub fn destination_out(dst: u32, src: u32, opacity: f32) -> u32 {
    destination_out_px(dst, src, unit_to_u8(opacity))
}

fn over_px(dst: u32, src: u32, coverage: u8) -> u32 {
    let s = Rgba8::from_packed(src);
    let sa = mul_div255_u8(u16::from(s.a), u16::from(coverage));
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return Rgba8::new(s.r, s.g, s.b, 255).pack();
    }

    let d = Rgba8::from_packed(dst);
    let dw = mul_div255_u8(u16::from(d.a), 255 - u16::from(sa));
    let out_a = u32::from(sa) + u32::from(dw);
    if out_a == 0 {
        return Rgba8::TRANSPARENT.pack();
    }

    let mix = |sc: u8, dc: u8| -> u8 {
        let num = u32::from(sc) * u32::from(sa) + u32::from(dc) * u32::from(dw);
        ((num + out_a / 2) / out_a).min(255) as u8
    };
    Rgba8::new(mix(s.r, d.r), mix(s.g, d.g), mix(s.b, d.b), out_a.min(255) as u8).pack()
}

fn destination_out_px(dst: u32, src: u32, coverage: u8) -> u32 {
    let d = Rgba8::from_packed(dst);
    let ea = mul_div255_u8(u16::from(Rgba8::from_packed(src).a), u16::from(coverage));
    if ea == 0 {
        return dst;
    }
    let out_a = mul_div255_u8(u16::from(d.a), 255 - u16::from(ea));
    if out_a == 0 {
        return Rgba8::TRANSPARENT.pack();
    }
    Rgba8::new(d.r, d.g, d.b, out_a).pack()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;

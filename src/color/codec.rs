//! Hex color strings and packed 32-bit pixel values.
//!
//! Packed layout is `0xAABBGGRR`: alpha in the most significant byte, then blue, green
//! and red. In little-endian memory that is RGBA byte order, which is what the pixel
//! buffers and the flood fill read and write.

use std::{fmt, str::FromStr};

use crate::foundation::{
    error::{PaintError, PaintResult},
    math::unit_to_u8,
};

/// Straight (non-premultiplied) RGBA8 components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build from components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into `0xAABBGGRR`.
    pub const fn pack(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    /// Decompose a packed value.
    pub const fn from_packed(v: u32) -> Self {
        let [r, g, b, a] = v.to_le_bytes();
        Self { r, g, b, a }
    }
}

/// Validated RGB color parsed from a 3- or 6-digit hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl HexColor {
    /// Build from channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `rgb`, `#rrggbb` or `rrggbb`.
    pub fn parse(s: &str) -> PaintResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaintError::invalid_color(format!(
                "'{s}' contains non-hex characters"
            )));
        }
        let nibble = |b: u8| -> u8 {
            match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                _ => b - b'A' + 10,
            }
        };
        let d = digits.as_bytes();
        match d.len() {
            3 => {
                let ch = |i: usize| nibble(d[i]) * 0x11;
                Ok(Self::rgb(ch(0), ch(1), ch(2)))
            }
            6 => {
                let ch = |i: usize| (nibble(d[i]) << 4) | nibble(d[i + 1]);
                Ok(Self::rgb(ch(0), ch(2), ch(4)))
            }
            n => Err(PaintError::invalid_color(format!(
                "'{s}' has {n} hex digits, expected 3 or 6"
            ))),
        }
    }

    /// Combine with an opacity fraction into straight RGBA8.
    pub fn with_opacity(self, opacity: f32) -> Rgba8 {
        Rgba8::new(self.r, self.g, self.b, unit_to_u8(opacity))
    }

    /// Packed `0xAABBGGRR` value with alpha `round(opacity * 255)`.
    pub fn to_packed(self, opacity: f32) -> u32 {
        self.with_opacity(opacity).pack()
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::rgb(0x00, 0xff, 0xff)
    }
}

impl FromStr for HexColor {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl serde::Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Convert a hex color and opacity fraction to a packed `0xAABBGGRR` value.
pub fn hex_to_packed(hex: &str, opacity: f32) -> PaintResult<u32> {
    Ok(HexColor::parse(hex)?.to_packed(opacity))
}

/// Decompose a packed `0xAABBGGRR` value.
pub fn packed_to_rgba(packed: u32) -> Rgba8 {
    Rgba8::from_packed(packed)
}

#[cfg(test)]
#[path = "../../tests/unit/color/codec.rs"]
mod tests;

//! polypaint is a raster paint engine.
//!
//! A [`PaintEngine`] owns drawing surfaces, a brush palette and the in-progress stroke.
//! Hosts feed it pointer events through [`EventSink`] and drive the spray timer with
//! [`PaintEngine::advance`]; surface pixels are read back as packed `0xAABBGGRR`
//! [`PixelBuffer`]s.
//!
//! - Surfaces: [`PaintEngine::add_surface`], [`PaintEngine::set_active_surface`]
//! - Brushes: [`PaintEngine::add_brush`] with a [`BrushImage`] alpha mask
//! - Tools: paint, spray, pen, fill and eraser ([`Tool`])
//! - Scripted replay: [`replay::Script`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod brush;
pub(crate) mod color;
pub(crate) mod config;
pub(crate) mod engine;
pub(crate) mod fill;
pub(crate) mod raster;
pub mod replay;
pub(crate) mod stroke;
pub(crate) mod surface;
pub(crate) mod tool;

pub use crate::brush::bitmap::{BrushImage, build_stamp};
pub use crate::brush::{Brush, BrushOptions, BrushProperties, BrushUpdate};
pub use crate::color::codec::{HexColor, Rgba8, hex_to_packed, packed_to_rgba};
pub use crate::config::EngineConfig;
pub use crate::engine::{EventSink, PaintEngine, PointerEvent, PointerKind};
pub use crate::fill::scanline::{FillStats, flood_fill};
pub use crate::foundation::core::{Extent, Point, Rect, Vec2};
pub use crate::foundation::error::{PaintError, PaintResult};
pub use crate::foundation::rng::{JitterSource, Pcg32};
pub use crate::raster::buffer::PixelBuffer;
pub use crate::raster::composite::{BlendOp, destination_out, over};
pub use crate::stroke::interp::{Interpolation, interpolate};
pub use crate::surface::registry::{Surface, SurfaceId, SurfaceRegistry};
pub use crate::tool::Tool;

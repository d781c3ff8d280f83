//! Stroke state machine and per-tool stamping.
//!
//! Paint, eraser and pen strokes draw into the ink layer and re-merge it onto a snapshot
//! of the surface taken at pointer-down, so the brush opacity applies once per stroke
//! rather than once per overlapping stamp. Spray stamps straight onto the surface from a
//! timer; fill runs once at pointer-down.

use std::time::Duration;

use kurbo::Point;

use crate::{
    brush::Brush,
    fill::scanline::{FillStats, flood_fill},
    foundation::{error::PaintResult, rng::JitterSource},
    raster::{buffer::PixelBuffer, composite::BlendOp},
    stroke::interp::interpolate,
    surface::registry::StrokeTarget,
    tool::Tool,
};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Most spray stamps placed by one `advance` call. Periods beyond this are dropped.
pub(crate) const MAX_SPRAY_BURST: u32 = 4096;

/// Repeating spray timer; accumulates elapsed time and reports whole periods.
#[derive(Clone, Debug)]
pub(crate) struct SprayTimer {
    period: Duration,
    elapsed: Duration,
}

impl SprayTimer {
    pub(crate) fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by `dt` and return how many periods completed, saturating at `u32::MAX`.
    /// The partial period left over is carried into the next tick.
    pub(crate) fn tick(&mut self, dt: Duration) -> u32 {
        let period = self.period.as_nanos();
        if period == 0 {
            return 0;
        }
        let elapsed = self.elapsed.saturating_add(dt).as_nanos();
        let rest = elapsed % period;
        // rest < period, so the whole seconds fit in a u64.
        self.elapsed = Duration::new(
            u64::try_from(rest / NANOS_PER_SEC).unwrap_or(u64::MAX),
            (rest % NANOS_PER_SEC) as u32,
        );
        u32::try_from(elapsed / period).unwrap_or(u32::MAX)
    }
}

#[derive(Clone, Debug)]
struct Stroke {
    tool: Tool,
    anchor: Point,
    last: Point,
    spray: Option<SprayTimer>,
}

/// What a pointer-down did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Begin {
    Stroke,
    Filled(FillStats),
}

/// Owns the optional in-progress stroke.
#[derive(Debug, Default)]
pub(crate) struct Compositor {
    stroke: Option<Stroke>,
}

impl Compositor {
    pub(crate) fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    pub(crate) fn spray_active(&self) -> bool {
        self.stroke.as_ref().is_some_and(|s| s.spray.is_some())
    }

    /// Start a stroke (or run a fill) at surface-local `p`.
    pub(crate) fn begin(
        &mut self,
        tool: Tool,
        target: StrokeTarget<'_>,
        brush: &Brush,
        p: Point,
        spray_period: Duration,
    ) -> PaintResult<Begin> {
        match tool {
            Tool::Fill => {
                let stats = flood_fill(
                    target.surface,
                    p.x.floor() as i64,
                    p.y.floor() as i64,
                    brush.packed_color(),
                )?;
                return Ok(Begin::Filled(stats));
            }
            Tool::Spray => {
                self.stroke = Some(Stroke {
                    tool,
                    anchor: p,
                    last: p,
                    spray: Some(SprayTimer::new(spray_period)),
                });
                return Ok(Begin::Stroke);
            }
            Tool::Paint | Tool::Eraser | Tool::Pen => {}
        }

        target.backdrop.copy_from(target.surface)?;
        target.ink.clear();
        stamp(target.ink, brush, p);
        merge(target, brush, tool)?;
        self.stroke = Some(Stroke {
            tool,
            anchor: p,
            last: p,
            spray: None,
        });
        Ok(Begin::Stroke)
    }

    /// Feed a pointer-move sample. Ignored while idle.
    pub(crate) fn extend(
        &mut self,
        target: StrokeTarget<'_>,
        brush: &Brush,
        p: Point,
    ) -> PaintResult<bool> {
        let Some(stroke) = self.stroke.as_mut() else {
            return Ok(false);
        };
        match stroke.tool {
            Tool::Spray => {}
            Tool::Paint | Tool::Eraser => {
                for q in interpolate(stroke.last, p) {
                    stamp(target.ink, brush, q);
                }
                merge(target, brush, stroke.tool)?;
            }
            Tool::Pen => {
                target.ink.clear();
                stamp(target.ink, brush, stroke.anchor);
                for q in interpolate(stroke.anchor, p) {
                    stamp(target.ink, brush, q);
                }
                merge(target, brush, stroke.tool)?;
            }
            Tool::Fill => return Ok(false),
        }
        stroke.last = p;
        Ok(true)
    }

    /// Finish the stroke, dropping any spray timer. Returns the tool that was active.
    pub(crate) fn end(&mut self) -> Option<Tool> {
        self.stroke.take().map(|s| s.tool)
    }

    /// Drive the spray timer. Returns the number of stamps placed, at most
    /// [`MAX_SPRAY_BURST`].
    pub(crate) fn advance(
        &mut self,
        dt: Duration,
        surface: &mut PixelBuffer,
        brush: Option<&Brush>,
        jitter: &mut dyn JitterSource,
        radius: f64,
    ) -> u32 {
        let Some(stroke) = self.stroke.as_mut() else {
            return 0;
        };
        let Some(timer) = stroke.spray.as_mut() else {
            return 0;
        };
        let fired = timer.tick(dt).min(MAX_SPRAY_BURST);
        let Some(brush) = brush else {
            return 0;
        };
        for _ in 0..fired {
            let dx = jitter.offset(radius);
            let dy = jitter.offset(radius);
            let at = Point::new(stroke.last.x + dx, stroke.last.y + dy);
            if let Some(bitmap) = brush.stamp() {
                let (x, y) = brush.stamp_origin(at);
                surface.draw(bitmap, x, y, brush.opacity(), BlendOp::Over);
            }
        }
        fired
    }
}

fn stamp(ink: &mut PixelBuffer, brush: &Brush, p: Point) {
    if let Some(bitmap) = brush.stamp() {
        let (x, y) = brush.stamp_origin(p);
        ink.draw(bitmap, x, y, 1.0, BlendOp::Over);
    }
}

fn merge(target: StrokeTarget<'_>, brush: &Brush, tool: Tool) -> PaintResult<()> {
    let op = match tool {
        Tool::Eraser => BlendOp::DestinationOut,
        _ => BlendOp::Over,
    };
    target.surface.copy_from(target.backdrop)?;
    target.surface.composite(target.ink, brush.opacity(), op)
}

#[cfg(test)]
#[path = "../../tests/unit/tool/compositor.rs"]
mod tests;

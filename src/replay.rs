//! JSON pointer scripts replayed against a fresh engine.
//!
//! A script describes one surface, a brush palette and a list of steps. Running it
//! yields the final surface pixels, which the CLI writes out as a PNG.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use kurbo::{Point, Rect};

use crate::{
    brush::{BrushOptions, BrushUpdate, bitmap::BrushImage},
    color::codec::HexColor,
    config::EngineConfig,
    engine::PaintEngine,
    foundation::error::{PaintError, PaintResult},
    raster::buffer::PixelBuffer,
    tool::Tool,
};

/// Replay script root.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Script {
    /// Engine configuration.
    #[serde(default)]
    pub config: EngineConfig,
    /// Surface dimensions.
    pub surface: SurfaceSize,
    /// Opaque color the surface starts with; transparent when absent.
    #[serde(default)]
    pub background: Option<HexColor>,
    /// Brushes registered in order; the first one starts active.
    #[serde(default)]
    pub brushes: Vec<BrushSpec>,
    /// Steps applied in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Pixel size of the replay surface.
#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A brush entry: visual options plus the shape of its alpha mask.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct BrushSpec {
    /// Color, size and opacity.
    #[serde(flatten)]
    pub options: BrushOptions,
    /// Alpha mask source.
    #[serde(default)]
    pub shape: BrushShape,
}

/// Alpha mask source of a scripted brush.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushShape {
    /// Soft round mask.
    #[default]
    Round,
    /// Fully opaque square.
    Solid,
    /// Image file, relative paths resolved against the script's directory.
    File(PathBuf),
}

/// One scripted action. Coordinates are surface-local.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Select a tool.
    Tool {
        /// Tool to select.
        tool: Tool,
    },
    /// Select the active brush.
    Brush {
        /// Brush index.
        index: usize,
    },
    /// Update brush properties.
    BrushProps {
        /// Brush index.
        index: usize,
        /// Fields to change.
        #[serde(default)]
        props: BrushUpdate,
    },
    /// Pointer pressed.
    Down {
        /// Column.
        x: f64,
        /// Row.
        y: f64,
    },
    /// Pointer moved.
    Move {
        /// Column.
        x: f64,
        /// Row.
        y: f64,
    },
    /// Pointer released.
    Up,
    /// Let time pass for the spray timer.
    AdvanceMs {
        /// Milliseconds.
        ms: u64,
    },
    /// Down at the first point, moves through the rest, up at the end.
    Stroke {
        /// Polyline vertices.
        points: Vec<[f64; 2]>,
        /// Time advanced after each vertex.
        #[serde(default)]
        step_ms: u64,
    },
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(s: &str) -> PaintResult<Self> {
        Ok(serde_json::from_str(s).context("parse replay script JSON")?)
    }

    /// Read and parse a script file.
    pub fn from_path(path: impl AsRef<Path>) -> PaintResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open replay script '{}'", path.display()))?;
        Ok(serde_json::from_reader(BufReader::new(f)).context("parse replay script JSON")?)
    }

    /// Check sizes and step arguments before running.
    pub fn validate(&self) -> PaintResult<()> {
        self.config.validate()?;
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(PaintError::validation("surface width/height must be > 0"));
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Brush { index } | Step::BrushProps { index, .. }
                    if *index >= self.brushes.len() =>
                {
                    return Err(PaintError::validation(format!(
                        "step {i}: brush index {index} out of range ({} brushes)",
                        self.brushes.len()
                    )));
                }
                Step::Stroke { points, .. } if points.is_empty() => {
                    return Err(PaintError::validation(format!(
                        "step {i}: stroke needs at least one point"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Run with relative brush paths resolved against the working directory.
    pub fn run(&self) -> PaintResult<PixelBuffer> {
        self.run_in(Path::new("."))
    }

    /// Run with relative brush paths resolved against `base_dir`.
    #[tracing::instrument(skip(self), fields(steps = self.steps.len()))]
    pub fn run_in(&self, base_dir: &Path) -> PaintResult<PixelBuffer> {
        self.validate()?;
        let mut engine = PaintEngine::new(self.config)?;
        let id = engine.add_surface(Rect::new(
            0.0,
            0.0,
            f64::from(self.surface.width),
            f64::from(self.surface.height),
        ));
        if let Some(bg) = self.background {
            engine.fill_surface(Some(id), bg.to_packed(1.0));
        }

        for entry in &self.brushes {
            let image = entry.load_image(base_dir)?;
            engine.add_brush(image, entry.options);
        }

        for step in &self.steps {
            match step {
                Step::Tool { tool } => engine.set_tool(*tool),
                Step::Brush { index } => {
                    engine.set_active_brush(*index);
                }
                Step::BrushProps { index, props } => {
                    engine.set_brush_properties(*index, props.clone());
                }
                Step::Down { x, y } => {
                    engine.pointer_down(Some(id), Point::new(*x, *y));
                }
                Step::Move { x, y } => {
                    engine.pointer_move(Point::new(*x, *y));
                }
                Step::Up => {
                    engine.pointer_up(Point::ZERO);
                }
                Step::AdvanceMs { ms } => {
                    engine.advance(Duration::from_millis(*ms));
                }
                Step::Stroke { points, step_ms } => {
                    let dt = Duration::from_millis(*step_ms);
                    let mut last = Point::ZERO;
                    for (i, &[x, y]) in points.iter().enumerate() {
                        last = Point::new(x, y);
                        if i == 0 {
                            engine.pointer_down(Some(id), last);
                        } else {
                            engine.pointer_move(last);
                        }
                        if !dt.is_zero() {
                            engine.advance(dt);
                        }
                    }
                    engine.pointer_up(last);
                }
            }
        }

        let surface = engine
            .surface(id)
            .ok_or_else(|| PaintError::validation("replay surface disappeared"))?;
        tracing::debug!(
            width = surface.extent().width,
            height = surface.extent().height,
            "replay finished"
        );
        Ok(surface.pixels().clone())
    }
}

impl BrushSpec {
    fn load_image(&self, base_dir: &Path) -> PaintResult<BrushImage> {
        let side = self.options.width.max(self.options.height).max(1);
        match &self.shape {
            BrushShape::Round => Ok(BrushImage::round(side)),
            BrushShape::Solid => Ok(BrushImage::solid(side)),
            BrushShape::File(path) => BrushImage::open(base_dir.join(path)),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/replay.rs"]
mod tests;

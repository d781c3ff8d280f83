//! The per-instance paint engine and its pointer-event sink.

use std::{fmt, time::Duration};

use kurbo::{Point, Rect};

use crate::{
    brush::{Brush, BrushOptions, BrushProperties, BrushUpdate, bitmap::BrushImage},
    config::EngineConfig,
    foundation::{
        error::PaintResult,
        rng::{JitterSource, Pcg32},
    },
    surface::registry::{Surface, SurfaceId, SurfaceRegistry},
    tool::{
        Tool,
        compositor::{Begin, Compositor},
    },
};

/// Pointer event phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}

/// A pointer event in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Phase.
    pub kind: PointerKind,
    /// Surface under the pointer, if any. Only consulted for [`PointerKind::Down`].
    pub target: Option<SurfaceId>,
    /// Page position.
    pub page: Point,
}

/// Receiver of pointer events.
pub trait EventSink {
    /// Dispatch one event. Returns `true` when the event changed engine state.
    fn handle_event(&mut self, event: &PointerEvent) -> bool;
}

/// Owns surfaces, brushes, the selected tool and the in-progress stroke.
pub struct PaintEngine {
    config: EngineConfig,
    surfaces: SurfaceRegistry,
    brushes: Vec<Brush>,
    active_brush: Option<usize>,
    tool: Tool,
    compositor: Compositor,
    jitter: Box<dyn JitterSource>,
}

impl fmt::Debug for PaintEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintEngine")
            .field("config", &self.config)
            .field("surfaces", &self.surfaces.len())
            .field("brushes", &self.brushes.len())
            .field("active_brush", &self.active_brush)
            .field("tool", &self.tool)
            .field("stroking", &self.compositor.is_stroking())
            .finish_non_exhaustive()
    }
}

impl Default for PaintEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self::build(config, Box::new(Pcg32::new(config.seed)))
    }
}

impl PaintEngine {
    /// Engine with a [`Pcg32`] jitter source seeded from `config.seed`.
    pub fn new(config: EngineConfig) -> PaintResult<Self> {
        config.validate()?;
        Ok(Self::build(config, Box::new(Pcg32::new(config.seed))))
    }

    /// Engine with a caller-provided jitter source.
    pub fn with_jitter(config: EngineConfig, jitter: Box<dyn JitterSource>) -> PaintResult<Self> {
        config.validate()?;
        Ok(Self::build(config, jitter))
    }

    fn build(config: EngineConfig, jitter: Box<dyn JitterSource>) -> Self {
        Self {
            config,
            surfaces: SurfaceRegistry::new(),
            brushes: Vec::new(),
            active_brush: None,
            tool: Tool::default(),
            compositor: Compositor::default(),
            jitter,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Surfaces

    /// Register a surface laid out at `rect`; it becomes active.
    pub fn add_surface(&mut self, rect: Rect) -> SurfaceId {
        self.cancel_stroke("active surface replaced");
        self.surfaces.register(rect)
    }

    /// Remove `id`, or the active surface when `None`.
    pub fn remove_surface(&mut self, id: Option<SurfaceId>) -> bool {
        if id.is_none() || id == self.surfaces.active_id() {
            self.cancel_stroke("active surface removed");
        }
        self.surfaces.deregister(id)
    }

    /// Switch the active surface. Unknown ids leave everything unchanged.
    pub fn set_active_surface(&mut self, id: SurfaceId) -> bool {
        if self.surfaces.get(id).is_none() {
            return false;
        }
        if self.surfaces.active_id() != Some(id) {
            self.cancel_stroke("active surface changed");
        }
        self.surfaces.set_active(id)
    }

    /// Resize `id` (or the active surface) to `rect`.
    pub fn set_surface_size(&mut self, rect: Rect, id: Option<SurfaceId>) -> bool {
        if id.is_none() || id == self.surfaces.active_id() {
            self.cancel_stroke("active surface resized");
        }
        self.surfaces.resize(rect, id)
    }

    /// Overwrite every pixel of `id` (or the active surface) with `packed`.
    pub fn fill_surface(&mut self, id: Option<SurfaceId>, packed: u32) -> bool {
        if id.is_none() || id == self.surfaces.active_id() {
            self.cancel_stroke("active surface overwritten");
        }
        let Some(id) = id.or(self.surfaces.active_id()) else {
            return false;
        };
        match self.surfaces.buffer_mut(id) {
            Some(buffer) => {
                buffer.fill(packed);
                true
            }
            None => false,
        }
    }

    /// Surface by id.
    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    /// The active surface.
    pub fn active_surface(&self) -> Option<&Surface> {
        self.surfaces.active()
    }

    /// Read-only registry access.
    pub fn surfaces(&self) -> &SurfaceRegistry {
        &self.surfaces
    }

    // Brushes

    /// Register a brush and return its index. The first brush becomes active.
    pub fn add_brush(&mut self, image: BrushImage, options: BrushOptions) -> usize {
        let id = self.brushes.len();
        self.brushes.push(Brush::new(id, image, options));
        if self.active_brush.is_none() {
            self.active_brush = Some(id);
        }
        tracing::debug!(id, ready = self.brushes[id].is_ready(), "brush added");
        id
    }

    /// Deliver the decoded source image of a brush and rebuild its stamp.
    pub fn complete_brush_image(&mut self, index: usize, image: BrushImage) -> bool {
        let Some(brush) = self.brushes.get_mut(index) else {
            return false;
        };
        brush.complete_image(image);
        true
    }

    /// Select the active brush. Out-of-range indices return `None` and change nothing.
    pub fn set_active_brush(&mut self, index: usize) -> Option<BrushProperties> {
        let props = self.brushes.get(index)?.properties();
        self.active_brush = Some(index);
        Some(props)
    }

    /// Index of the active brush.
    pub fn active_brush_index(&self) -> Option<usize> {
        self.active_brush
    }

    /// Properties of `index`, or of the active brush when `None`.
    pub fn brush_properties(&self, index: Option<usize>) -> Option<BrushProperties> {
        let index = index.or(self.active_brush)?;
        self.brushes.get(index).map(Brush::properties)
    }

    /// Update a brush. Out-of-range indices are ignored.
    pub fn set_brush_properties(&mut self, index: usize, update: BrushUpdate) {
        if let Some(brush) = self.brushes.get_mut(index) {
            brush.apply(update);
        }
    }

    /// Registered brush count.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    // Tools

    /// Select a tool. An in-progress stroke ends first.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            self.cancel_stroke("tool switched");
        }
        self.tool = tool;
    }

    /// Select a tool by its lowercase name. Unknown names leave the tool unchanged.
    pub fn set_tool_name(&mut self, name: &str) -> PaintResult<Tool> {
        let tool = name.parse()?;
        self.set_tool(tool);
        Ok(tool)
    }

    /// Selected tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// True between an accepted pointer-down and the next pointer-up.
    pub fn is_stroking(&self) -> bool {
        self.compositor.is_stroking()
    }

    /// True while a spray timer is armed.
    pub fn spray_timer_active(&self) -> bool {
        self.compositor.spray_active()
    }

    // Pointer input

    /// Pointer pressed over `target` at page position `page`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn pointer_down(&mut self, target: Option<SurfaceId>, page: Point) -> bool {
        let Some(active) = self.surfaces.active() else {
            tracing::debug!("pointer down ignored: no active surface");
            return false;
        };
        if target != Some(active.id()) {
            tracing::debug!("pointer down ignored: not over the active surface");
            return false;
        }
        if self.compositor.is_stroking() {
            tracing::debug!("pointer down ignored: stroke in progress");
            return false;
        }
        let local = active.to_local(page);
        let Some(brush) = self.active_brush.and_then(|i| self.brushes.get(i)) else {
            tracing::debug!("pointer down ignored: no active brush");
            return false;
        };
        let Some(layers) = self.surfaces.stroke_target() else {
            return false;
        };

        match self
            .compositor
            .begin(self.tool, layers, brush, local, self.config.spray_period())
        {
            Ok(Begin::Stroke) => {
                tracing::debug!(tool = %self.tool, "stroke started");
                true
            }
            Ok(Begin::Filled(stats)) => stats.filled > 0,
            Err(err) => {
                tracing::warn!(%err, "pointer down rejected");
                false
            }
        }
    }

    /// Pointer moved to page position `page`.
    pub fn pointer_move(&mut self, page: Point) -> bool {
        if !self.compositor.is_stroking() {
            return false;
        }
        let Some(local) = self.surfaces.active().map(|s| s.to_local(page)) else {
            return false;
        };
        let Some(brush) = self.active_brush.and_then(|i| self.brushes.get(i)) else {
            return false;
        };
        let Some(layers) = self.surfaces.stroke_target() else {
            return false;
        };
        match self.compositor.extend(layers, brush, local) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::warn!(%err, "pointer move rejected");
                false
            }
        }
    }

    /// Pointer released. No-op while idle.
    pub fn pointer_up(&mut self, _page: Point) -> bool {
        match self.compositor.end() {
            Some(tool) => {
                tracing::debug!(%tool, "stroke finished");
                true
            }
            None => false,
        }
    }

    /// Advance the spray timer by `dt`. Returns the number of stamps placed; one call places
    /// at most 4096.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        let radius = self.config.spray_jitter_px;
        let brush = self.active_brush.and_then(|i| self.brushes.get(i));
        let Some(surface) = self.surfaces.active_buffer_mut() else {
            return 0;
        };
        self.compositor
            .advance(dt, surface, brush, self.jitter.as_mut(), radius)
    }

    fn cancel_stroke(&mut self, reason: &'static str) {
        if let Some(tool) = self.compositor.end() {
            tracing::debug!(%tool, reason, "stroke cancelled");
        }
    }
}

impl EventSink for PaintEngine {
    fn handle_event(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerKind::Down => self.pointer_down(event.target, event.page),
            PointerKind::Move => self.pointer_move(event.page),
            PointerKind::Up => self.pointer_up(event.page),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;

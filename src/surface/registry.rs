use kurbo::{Point, Rect};

use crate::{foundation::core::Extent, raster::buffer::PixelBuffer};

/// Opaque identifier of a registered surface. Never reused within one registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub(crate) u64);

impl SurfaceId {
    /// Raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A drawing target: pixels plus the last-known layout rectangle in page coordinates.
#[derive(Clone, Debug)]
pub struct Surface {
    id: SurfaceId,
    rect: Rect,
    buffer: PixelBuffer,
}

impl Surface {
    /// Identifier.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Pixel dimensions.
    pub fn extent(&self) -> Extent {
        self.buffer.extent()
    }

    /// Last-known layout rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Committed pixels.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Convert page coordinates to surface-local ones.
    pub fn to_local(&self, page: Point) -> Point {
        Point::new(page.x - self.rect.x0, page.y - self.rect.y0)
    }
}

/// Mutable view of the active surface and its two scratch layers.
pub(crate) struct StrokeTarget<'a> {
    pub(crate) surface: &'a mut PixelBuffer,
    pub(crate) ink: &'a mut PixelBuffer,
    pub(crate) backdrop: &'a mut PixelBuffer,
}

/// Owns the surfaces, tracks the active one and keeps the ink and backdrop layers sized
/// to it.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: Vec<Surface>,
    active: Option<SurfaceId>,
    next_id: u64,
    ink: PixelBuffer,
    backdrop: PixelBuffer,
}

impl SurfaceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface sized to `rect`; it becomes the active surface.
    pub fn register(&mut self, rect: Rect) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        let extent = Extent::from_rect(rect);
        self.surfaces.push(Surface {
            id,
            rect,
            buffer: PixelBuffer::new(extent.width, extent.height),
        });
        self.activate(id);
        tracing::debug!(
            id = id.0,
            width = extent.width,
            height = extent.height,
            "surface registered"
        );
        id
    }

    /// Remove `id`, or the active surface when `None`. Unknown ids are ignored.
    pub fn deregister(&mut self, id: Option<SurfaceId>) -> bool {
        let Some(id) = id.or(self.active) else {
            return false;
        };
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.surfaces.remove(idx);
        if self.active == Some(id) {
            self.active = None;
            self.ink = PixelBuffer::default();
            self.backdrop = PixelBuffer::default();
        }
        tracing::debug!(id = id.0, "surface deregistered");
        true
    }

    /// Make `id` active. Returns `false` and changes nothing for unknown ids.
    /// Re-selecting the active surface keeps its layers untouched.
    pub fn set_active(&mut self, id: SurfaceId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        if self.active != Some(id) {
            self.activate(id);
        }
        true
    }

    /// Resize `id` (or the active surface) to `rect`, recording the rect for coordinate
    /// conversion. Layers follow when the surface is active.
    pub fn resize(&mut self, rect: Rect, id: Option<SurfaceId>) -> bool {
        let Some(id) = id.or(self.active) else {
            return false;
        };
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let extent = Extent::from_rect(rect);
        let surface = &mut self.surfaces[idx];
        surface.rect = rect;
        surface.buffer.resize_preserving(extent);
        if self.active == Some(id) {
            self.ink.resize_cleared(extent);
            self.backdrop.resize_cleared(extent);
        }
        true
    }

    /// Surface by id.
    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    /// The active surface.
    pub fn active(&self) -> Option<&Surface> {
        self.active.and_then(|id| self.get(id))
    }

    /// Identifier of the active surface.
    pub fn active_id(&self) -> Option<SurfaceId> {
        self.active
    }

    /// Registered surface count.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// True when no surface is registered.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Current ink layer extent (equals the active surface extent).
    pub fn layer_extent(&self) -> Extent {
        self.ink.extent()
    }

    pub(crate) fn buffer_mut(&mut self, id: SurfaceId) -> Option<&mut PixelBuffer> {
        self.surfaces
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.buffer)
    }

    pub(crate) fn active_buffer_mut(&mut self) -> Option<&mut PixelBuffer> {
        let id = self.active?;
        self.buffer_mut(id)
    }

    pub(crate) fn stroke_target(&mut self) -> Option<StrokeTarget<'_>> {
        let id = self.active?;
        let surface = self.surfaces.iter_mut().find(|s| s.id == id)?;
        Some(StrokeTarget {
            surface: &mut surface.buffer,
            ink: &mut self.ink,
            backdrop: &mut self.backdrop,
        })
    }

    fn activate(&mut self, id: SurfaceId) {
        self.active = Some(id);
        let extent = self.get(id).map(Surface::extent).unwrap_or_default();
        self.ink.resize_cleared(extent);
        self.backdrop.resize_cleared(extent);
    }

    fn index_of(&self, id: SurfaceId) -> Option<usize> {
        self.surfaces.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/registry.rs"]
mod tests;

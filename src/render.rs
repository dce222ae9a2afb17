//! Marker placement capability.
//!
//! The controller never touches a document directly. It hands pixel offsets,
//! relative to the surface's container, to a [`MarkerRenderer`]. The browser
//! host provides a DOM-backed renderer; [`RecordingRenderer`] keeps the
//! placements in memory so hosts without a display (and tests) can drive the
//! same controller.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::coords::PixelPoint;

/// Something that can put a marker on screen.
pub trait MarkerRenderer {
    /// Handle to a placed marker. Markers are never removed, so the handle
    /// only identifies what was placed.
    type Handle;

    /// Place a marker anchored at `at`, relative to the container origin.
    fn place(&mut self, at: PixelPoint) -> Self::Handle;
}

/// Renderer that records placements instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    placed: Vec<PixelPoint>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every placement, in call order.
    #[must_use]
    pub fn placed(&self) -> &[PixelPoint] {
        &self.placed
    }
}

impl MarkerRenderer for RecordingRenderer {
    /// Index of the placement in [`RecordingRenderer::placed`].
    type Handle = usize;

    fn place(&mut self, at: PixelPoint) -> usize {
        self.placed.push(at);
        self.placed.len() - 1
    }
}

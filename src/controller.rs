//! Marker controller: pointer input → normalized point → marker + save request.
//!
//! The controller owns the points known for the current surface and the
//! markers drawn for them. It never performs I/O itself: a valid click yields
//! a [`SaveRequest`] that the host dispatches asynchronously, and the host
//! reports the outcome back through [`MarkerController::complete`]. Rendering
//! is optimistic; a failed save never removes a marker.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use log::{debug, error, info, warn};

use crate::coords::{self, MapError, NormPoint, PixelPoint, SurfaceBounds};
use crate::persist::PersistError;
use crate::point::{Point, SaveAck, SavePayload};
use crate::render::MarkerRenderer;

/// Correlates a [`SaveRequest`] with its later completion.
pub type Ticket = u64;

/// Where the controller is in the click lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for a click; nothing in flight.
    #[default]
    Idle,
    /// A click is being bounds-checked against the surface.
    Validating,
    /// A valid click is being normalized and drawn.
    Rendering,
    /// At least one save request is outstanding.
    Persisting,
}

/// A save the host should dispatch for a freshly clicked point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveRequest {
    pub ticket: Ticket,
    pub payload: SavePayload,
}

/// Owns the points and markers of one surface and drives the click lifecycle.
pub struct MarkerController<R: MarkerRenderer> {
    renderer: R,
    points: Vec<Point>,
    markers: Vec<R::Handle>,
    /// Outstanding saves: ticket and index into `points`.
    pending: Vec<(Ticket, usize)>,
    next_ticket: Ticket,
    phase: Phase,
}

impl<R: MarkerRenderer> MarkerController<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            points: Vec::new(),
            markers: Vec::new(),
            pending: Vec::new(),
            next_ticket: 0,
            phase: Phase::Idle,
        }
    }

    // --- Data inputs ---

    /// Render the persisted points, in order, and adopt them.
    ///
    /// Points outside the normalized range are drawn where they map to.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::SurfaceNotLaidOut`] if the surface has no size yet
    /// (image not loaded). Nothing is drawn or adopted, so the host can call
    /// again once the surface is laid out.
    pub fn initialize(&mut self, points: Vec<Point>, surface: &SurfaceBounds) -> Result<(), MapError> {
        if !surface.is_laid_out() {
            warn!("stored points not drawn: surface is {}x{}", surface.width, surface.height);
            return Err(MapError::SurfaceNotLaidOut { width: surface.width, height: surface.height });
        }
        for point in points {
            if !point.norm().in_range() {
                warn!("stored point out of range: id={:?} x={} y={}", point.id, point.x, point.y);
            }
            self.render(point.norm(), surface);
            self.points.push(point);
        }
        Ok(())
    }

    /// Handle a click at client-space `client` against the current surface bounds.
    ///
    /// Returns the save the host must dispatch, or `None` if the click was
    /// ignored.
    pub fn handle_click(&mut self, client: PixelPoint, surface: &SurfaceBounds) -> Option<SaveRequest> {
        self.phase = Phase::Validating;
        if !surface.contains(client) {
            debug!("click outside surface ignored: ({}, {})", client.x, client.y);
            self.settle();
            return None;
        }

        let norm = match coords::to_normalized(surface.relative(client), surface) {
            Ok(norm) => norm,
            Err(e) => {
                warn!("click ignored: {e}");
                self.settle();
                return None;
            }
        };

        self.phase = Phase::Rendering;
        self.render(norm, surface);
        self.points.push(Point::unsaved(norm));

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.push((ticket, self.points.len() - 1));
        self.phase = Phase::Persisting;

        Some(SaveRequest { ticket, payload: SavePayload::from(norm) })
    }

    /// Draw one marker for `norm` on the current surface. No dedup.
    pub fn render(&mut self, norm: NormPoint, surface: &SurfaceBounds) {
        let at = coords::to_pixel(norm, surface);
        let handle = self.renderer.place(at);
        self.markers.push(handle);
    }

    /// Record the outcome of the save issued under `ticket`.
    ///
    /// The marker stays whatever the outcome. A backend-assigned id is attached
    /// to the point the click created.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<SaveAck, PersistError>) {
        let Some(pos) = self.pending.iter().position(|(t, _)| *t == ticket) else {
            warn!("completion for unknown save ticket {ticket}");
            return;
        };
        let (_, index) = self.pending.swap_remove(pos);

        match outcome {
            Ok(ack) => {
                info!("point saved: ticket={ticket} point_id={:?}", ack.point_id);
                if let Some(id) = ack.point_id {
                    if let Some(point) = self.points.get_mut(index) {
                        point.id = Some(id);
                    }
                }
            }
            Err(e) => error!("point save failed: ticket={ticket}: {e}"),
        }

        self.settle();
    }

    fn settle(&mut self) {
        self.phase = if self.pending.is_empty() { Phase::Idle } else { Phase::Persisting };
    }

    // --- Queries ---

    /// Known points, initial feed first, then clicks in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of saves dispatched but not yet completed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

//! Pixel ↔ normalized coordinate conversions.
//!
//! Stored points live on a fixed `0..=1000` integer grid per axis so they stay
//! meaningful however large the reference image is drawn. Everything here is
//! pure arithmetic over a [`SurfaceBounds`] snapshot; callers query fresh
//! bounds for every interaction because layout can change between events.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use crate::consts::{NORM_MAX, NORM_SCALE};

/// A point in CSS pixels, either page-client space or surface-relative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A position on the normalized grid.
///
/// Values produced by [`to_normalized`] are always within `0..=NORM_MAX`.
/// Values read back from storage are not re-validated and may fall outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormPoint {
    pub x: i32,
    pub y: i32,
}

impl NormPoint {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both axes lie within `0..=NORM_MAX`.
    #[must_use]
    pub fn in_range(self) -> bool {
        (0..=NORM_MAX).contains(&self.x) && (0..=NORM_MAX).contains(&self.y)
    }
}

/// On-screen bounding box of the rendered surface, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the surface has a positive, finite size.
    #[must_use]
    pub fn is_laid_out(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Inclusive containment test for a client-space point.
    #[must_use]
    pub fn contains(&self, client: PixelPoint) -> bool {
        client.x >= self.left && client.x <= self.right() && client.y >= self.top && client.y <= self.bottom()
    }

    /// Convert a client-space point to an offset from the surface's top-left corner.
    #[must_use]
    pub fn relative(&self, client: PixelPoint) -> PixelPoint {
        PixelPoint { x: client.x - self.left, y: client.y - self.top }
    }
}

/// Error returned by [`to_normalized`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MapError {
    /// Width or height is zero, negative or not finite.
    #[error("surface not laid out ({width}x{height})")]
    SurfaceNotLaidOut { width: f64, height: f64 },
}

/// Map a surface-relative pixel offset onto the normalized grid.
///
/// Each axis is rounded to the nearest integer and clamped to `0..=NORM_MAX`.
///
/// # Errors
///
/// Returns [`MapError::SurfaceNotLaidOut`] if the surface has no usable size.
pub fn to_normalized(pixel: PixelPoint, bounds: &SurfaceBounds) -> Result<NormPoint, MapError> {
    if !bounds.is_laid_out() {
        return Err(MapError::SurfaceNotLaidOut { width: bounds.width, height: bounds.height });
    }
    Ok(NormPoint {
        x: normalize_axis(pixel.x, bounds.width),
        y: normalize_axis(pixel.y, bounds.height),
    })
}

/// Map a normalized point back to a surface-relative pixel offset.
///
/// Out-of-range inputs are mapped linearly, not clamped.
#[must_use]
pub fn to_pixel(norm: NormPoint, bounds: &SurfaceBounds) -> PixelPoint {
    PixelPoint {
        x: f64::from(norm.x) / NORM_SCALE * bounds.width,
        y: f64::from(norm.y) / NORM_SCALE * bounds.height,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn normalize_axis(offset: f64, extent: f64) -> i32 {
    let scaled = (offset / extent * NORM_SCALE).round().clamp(0.0, NORM_SCALE);
    scaled as i32
}

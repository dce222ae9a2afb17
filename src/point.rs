//! Stored points and the wire shapes exchanged with the backend.
//!
//! Points cross two boundaries: the feed embedded in the page at load time
//! (`[{id?, x, y}]`) and the save request/response pair for new clicks.

#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;

use serde::{Deserialize, Serialize};

use crate::coords::NormPoint;

/// Backend-assigned point identifier.
pub type PointId = i64;

/// A point of interest in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Assigned by the backend; `None` until a save reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PointId>,
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// A point the backend has not acknowledged yet.
    #[must_use]
    pub fn unsaved(norm: NormPoint) -> Self {
        Self { id: None, x: norm.x, y: norm.y }
    }

    #[must_use]
    pub fn norm(&self) -> NormPoint {
        NormPoint::new(self.x, self.y)
    }
}

/// Error returned by [`parse_feed`].
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The feed text is not a JSON array of `{id?, x, y}` records.
    #[error("invalid point feed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse the embedded point feed.
///
/// Blank input yields an empty list. Coordinates are not range-checked here.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] if the text is not a valid feed.
pub fn parse_feed(raw: &str) -> Result<Vec<Point>, FeedError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

/// Body of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePayload {
    pub x: i32,
    pub y: i32,
}

impl From<NormPoint> for SavePayload {
    fn from(norm: NormPoint) -> Self {
        Self { x: norm.x, y: norm.y }
    }
}

/// Decoded body of a save response.
///
/// Some backend views only answer `{"success": true}`; others also return the
/// new row's `point_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_id: Option<PointId>,
}

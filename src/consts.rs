//! Shared constants for the route-markers crate.

// ── Normalized space ────────────────────────────────────────────

/// Upper bound of the normalized grid on each axis (inclusive).
pub const NORM_MAX: i32 = 1000;

/// `NORM_MAX` as a float, for mapping arithmetic.
pub const NORM_SCALE: f64 = 1000.0;

// ── Page wiring defaults ────────────────────────────────────────

/// Id of the reference image element.
pub const DEFAULT_IMAGE_ID: &str = "background-preview";

/// Id of the element whose text holds the embedded point feed.
pub const DEFAULT_FEED_ID: &str = "points-data";

/// Id of the positioned container that receives marker elements.
pub const DEFAULT_CONTAINER_ID: &str = "preview-container";

/// `name` attribute of the `<meta>` element carrying the anti-forgery token.
pub const DEFAULT_CSRF_META_NAME: &str = "csrf-token";

/// Request header the backend reads the anti-forgery token from.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// CSS class applied to every marker element.
pub const DEFAULT_MARKER_CLASS: &str = "point-marker";

/// Content type of save requests.
pub const JSON_CONTENT_TYPE: &str = "application/json";

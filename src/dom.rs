//! Browser DOM glue: surface queries, embedded page data, marker elements.
//!
//! Client-side (hydrate): reads the page through `web-sys`.
//! Elsewhere only the pure formatting helpers are compiled.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

#[cfg(feature = "hydrate")]
use log::{error, warn};
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(feature = "hydrate")]
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

#[cfg(feature = "hydrate")]
use crate::coords::{PixelPoint, SurfaceBounds};
#[cfg(feature = "hydrate")]
use crate::point::{FeedError, Point, parse_feed};
#[cfg(feature = "hydrate")]
use crate::render::MarkerRenderer;

/// CSS selector for the `<meta>` element named `name`.
#[cfg(any(test, feature = "hydrate"))]
fn meta_selector(name: &str) -> String {
    format!("meta[name=\"{name}\"]")
}

/// Format a pixel length for an inline style property.
#[cfg(any(test, feature = "hydrate"))]
fn css_px(value: f64) -> String {
    format!("{value}px")
}

/// Look up a required element by id.
///
/// # Errors
///
/// Returns a `JsValue` string naming the missing id.
#[cfg(feature = "hydrate")]
pub fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

/// Current on-screen bounding box of `element`.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn surface_bounds(element: &Element) -> SurfaceBounds {
    let rect = element.get_bounding_client_rect();
    SurfaceBounds::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Whether `element` is an image that has not finished loading.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn image_pending(element: &Element) -> bool {
    element.dyn_ref::<HtmlImageElement>().is_some_and(|img| !img.complete())
}

/// Parse the point feed embedded as the text of element `feed_id`.
///
/// A missing element is treated as an empty feed.
///
/// # Errors
///
/// Returns [`FeedError`] if the element's text is not a valid feed.
#[cfg(feature = "hydrate")]
pub fn read_feed(document: &Document, feed_id: &str) -> Result<Vec<Point>, FeedError> {
    let Some(element) = document.get_element_by_id(feed_id) else {
        warn!("point feed #{feed_id} not found; starting empty");
        return Ok(Vec::new());
    };
    parse_feed(&element.text_content().unwrap_or_default())
}

/// Anti-forgery token from `<meta name="{meta_name}" content="...">`.
///
/// Returns an empty token when the element is missing; the backend will
/// then refuse saves, which surfaces as a logged status error.
///
/// # Errors
///
/// Returns `Err` if the selector is rejected by the browser.
#[cfg(feature = "hydrate")]
pub fn csrf_token(document: &Document, meta_name: &str) -> Result<String, JsValue> {
    match document.query_selector(&meta_selector(meta_name))? {
        Some(meta) => Ok(meta.get_attribute("content").unwrap_or_default()),
        None => {
            warn!("csrf meta '{meta_name}' not found; saves will be sent without a token");
            Ok(String::new())
        }
    }
}

/// Renders markers as absolutely positioned `div`s inside a container.
#[cfg(feature = "hydrate")]
pub struct DomRenderer {
    document: Document,
    container: Element,
    class: String,
}

#[cfg(feature = "hydrate")]
impl DomRenderer {
    #[must_use]
    pub fn new(document: Document, container: Element, class: String) -> Self {
        Self { document, container, class }
    }

    fn create_marker(&self, at: PixelPoint) -> Result<HtmlElement, JsValue> {
        let marker = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("div is not an HtmlElement"))?;
        marker.set_class_name(&self.class);
        let style = marker.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &css_px(at.x))?;
        style.set_property("top", &css_px(at.y))?;
        self.container.append_child(&marker)?;
        Ok(marker)
    }
}

#[cfg(feature = "hydrate")]
impl MarkerRenderer for DomRenderer {
    /// The appended element, or `None` if the document refused it.
    type Handle = Option<HtmlElement>;

    fn place(&mut self, at: PixelPoint) -> Option<HtmlElement> {
        match self.create_marker(at) {
            Ok(marker) => Some(marker),
            Err(e) => {
                error!("failed to place marker at ({}, {}): {e:?}", at.x, at.y);
                None
            }
        }
    }
}

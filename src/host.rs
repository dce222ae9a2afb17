//! Browser entry point: wires the page to a [`MarkerController`].
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosting page calls [`mount`] once the document is ready. Stored points
//! are drawn only after the reference image has loaded. Everything
//! runs on the UI thread: the click closure and every save continuation share
//! the controller through `Rc<RefCell<_>>`, and borrows never span an await.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, MouseEvent};

use crate::config::MarkerConfig;
use crate::controller::{MarkerController, SaveRequest};
use crate::coords::PixelPoint;
use crate::dom::{self, DomRenderer};
use crate::persist::{HttpPersistence, Persistence};
use crate::point::Point;

/// Mount the marker editor on the current page.
///
/// `config_json` optionally overrides element ids, the token header and the
/// save endpoint; see [`MarkerConfig`].
///
/// # Errors
///
/// Returns `Err` if the config is invalid, a required element is missing, or
/// the click listener cannot be attached.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    install_logging();

    let config = MarkerConfig::from_json(config_json.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let image = dom::element_by_id(&document, &config.image_id)?;
    let container = dom::element_by_id(&document, &config.container_id)?;

    let feed = match dom::read_feed(&document, &config.feed_id) {
        Ok(points) => points,
        Err(e) => {
            error!("{e}; starting with no points");
            Vec::new()
        }
    };

    let token = dom::csrf_token(&document, &config.csrf_meta_name)?;
    let endpoint = config.endpoint_or(&window.location().href()?);
    let persistence = Rc::new(HttpPersistence::new(endpoint, config.csrf_header.clone(), token));

    let renderer = DomRenderer::new(document, container, config.marker_class.clone());
    let controller = Rc::new(RefCell::new(MarkerController::new(renderer)));

    // Bounds are 0x0 until the image has loaded.
    if dom::image_pending(&image) {
        let controller = Rc::clone(&controller);
        let loaded = image.clone();
        let on_load = Closure::once_into_js(move || draw_stored(&controller, &loaded, feed));
        let once = AddEventListenerOptions::new();
        once.set_once(true);
        image.add_event_listener_with_callback_and_add_event_listener_options("load", on_load.unchecked_ref(), &once)?;
        debug!("image still loading; stored points deferred");
    } else {
        draw_stored(&controller, &image, feed);
    }

    let on_click = {
        let controller = Rc::clone(&controller);
        let image = image.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            // Whole CSS pixels: sub-pixel positions are truncated, well inside round-trip tolerance.
            let client = PixelPoint::new(f64::from(ev.client_x()), f64::from(ev.client_y()));
            let surface = dom::surface_bounds(&image);
            let request = controller.borrow_mut().handle_click(client, &surface);
            if let Some(request) = request {
                dispatch(Rc::clone(&controller), Rc::clone(&persistence), request);
            }
        })
    };
    image.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    on_click.forget();

    Ok(())
}

/// Draw the stored points against the image's current bounds.
fn draw_stored(controller: &RefCell<MarkerController<DomRenderer>>, image: &Element, feed: Vec<Point>) {
    let result = controller.borrow_mut().initialize(feed, &dom::surface_bounds(image));
    match result {
        Ok(()) => info!("marker editor drew {} stored points", controller.borrow().points().len()),
        Err(e) => error!("stored points not drawn: {e}"),
    }
}

/// Spawn the save for `request` and report its outcome to the controller.
fn dispatch(
    controller: Rc<RefCell<MarkerController<DomRenderer>>>,
    persistence: Rc<HttpPersistence>,
    request: SaveRequest,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = persistence.save(request.payload).await;
        controller.borrow_mut().complete(request.ticket, outcome);
    });
}

fn install_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        debug!("logger already installed");
    }
}

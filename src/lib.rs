//! Point-of-interest markers on a route background image.
//!
//! This crate is compiled to WebAssembly and runs in the browser. A user
//! clicks the reference image; the click is mapped onto a fixed `0..=1000`
//! grid so stored points survive any resize of the image, a marker is drawn
//! immediately, and the point is saved to the page's backend. On load the
//! points already stored are drawn back at their current pixel positions.
//!
//! The core (`coords`, `controller`) has no browser dependency and is tested
//! natively. The `hydrate` feature adds the DOM renderer, the `gloo-net`
//! persistence and the `host::mount` entry point.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`coords`] | Pixel ↔ normalized conversions and surface bounds |
//! | [`controller`] | Click lifecycle, marker bookkeeping, save tickets |
//! | [`point`] | Stored points, the embedded feed, save request/response bodies |
//! | [`render`] | `MarkerRenderer` capability and an in-memory renderer |
//! | [`persist`] | `Persistence` capability, save errors, HTTP implementation |
//! | [`config`] | Page wiring configuration |
//! | [`dom`] | Browser DOM glue (hydrate) |
//! | `host` | `#[wasm_bindgen]` entry point (hydrate) |
//! | [`consts`] | Shared constants |

pub mod config;
pub mod consts;
pub mod controller;
pub mod coords;
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod host;
pub mod persist;
pub mod point;
pub mod render;

//! Browser implementations of the session capabilities.
//!
//! - `endpoint`: `BrowserEndpoint`, the report service reached through gloo-net with
//!   `FormData` bodies and an optional `AbortSignal`.
//! - `download`: `AnchorDownload`, the one-shot save through a hidden anchor and an
//!   object URL.

mod download;
mod endpoint;

pub use download::AnchorDownload;
pub use endpoint::BrowserEndpoint;

use wasm_bindgen::JsValue;

/// Best-effort text for a JS exception value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

//! One-shot document save through a transient anchor element.
//!
//! The blob's object URL and the anchor are each owned by a guard, so both are
//! released on every path out of `present`, including early error returns.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, Element, HtmlAnchorElement, Url};

use common::error::PresentError;
use common::session::DownloadPresenter;

use super::describe_js;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorDownload;

/// Revokes the object URL when dropped.
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_blob(blob: &Blob) -> Result<Self, JsValue> {
        Url::create_object_url_with_blob(blob).map(Self)
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(err) = Url::revoke_object_url(&self.0) {
            log::warn!("could not revoke {}: {}", self.0, describe_js(&err));
        }
    }
}

/// Detaches the element from the document when dropped.
struct Attached(Element);

impl Drop for Attached {
    fn drop(&mut self) {
        self.0.remove();
    }
}

impl DownloadPresenter for AnchorDownload {
    fn present(&self, bytes: &[u8], filename: &str) -> Result<(), PresentError> {
        let failed = |reason: String| PresentError::new(filename, reason);

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| failed("no document".into()))?;
        let body = document.body().ok_or_else(|| failed("no document body".into()))?;

        let parts = Array::of1(&Uint8Array::from(bytes));
        let blob = Blob::new_with_u8_array_sequence(&parts).map_err(|e| failed(describe_js(&e)))?;
        let object_url = ObjectUrl::for_blob(&blob).map_err(|e| failed(describe_js(&e)))?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|e| failed(describe_js(&e)))?
            .dyn_into()
            .map_err(|_| failed("created element is not an anchor".into()))?;
        anchor.set_href(&object_url.0);
        anchor.set_download(filename);
        anchor
            .style()
            .set_property("display", "none")
            .map_err(|e| failed(describe_js(&e)))?;

        body.append_child(&anchor).map_err(|e| failed(describe_js(&e)))?;
        let _attached = Attached(anchor.clone().into());

        anchor.click();
        log::debug!("save of {filename} triggered ({} bytes)", bytes.len());
        Ok(())
    }
}

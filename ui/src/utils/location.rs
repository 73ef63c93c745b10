//! Browser address bar and document title.

use wasm_bindgen::JsValue;
use log::warn;

/// `location.pathname` of the page.
pub fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

/// Adds a history entry for `path` without reloading the page.
pub fn push_path(path: &str) {
    let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
        return;
    };
    if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
        warn!("Failed to push {path}: {err:?}");
    }
}

pub fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|window| window.document()) {
        document.set_title(title);
    }
}

//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small wrappers for the show / hide / lookup patterns the chat widgets
//! repeat, so `style().set_property("display", …)` calls are not sprinkled
//! across the code-base.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

/// Fetch an element by id, surfacing a readable error when the fixed DOM
/// fragment it belongs to is missing.
pub fn require_element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}

/// Same as [`require_element`] but cast to `HtmlElement` for style access.
pub fn require_html_element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    require_element(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an HtmlElement", id)))
}

/// Fetch an `<input>` element by id and cast it.
pub fn require_input(document: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    require_element(document, id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an <input>", id)))
}

/// Fetch a `<button>` element by id and cast it.
pub fn require_button(document: &Document, id: &str) -> Result<HtmlButtonElement, JsValue> {
    require_element(document, id)?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not a <button>", id)))
}

/// Set the inline `display` style ("block", "none", "flex", ...).
pub fn set_display(el: &HtmlElement, value: &str) {
    let _ = el.style().set_property("display", value);
}

/// Pin a scrollable container to its bottom.
pub fn scroll_to_bottom(el: &Element) {
    el.set_scroll_top(el.scroll_height());
}

/// Blocking user-facing alert.  No-op outside a browsing context.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Blocking confirm dialog; `false` outside a browsing context.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

//! Browser-level tests for the DOM-facing half of the crate.
//! Run with `wasm-pack test --headless --chrome`; the pure half is covered
//! by native `cargo test` in each module.

mod chat_view_dom;

use web_sys::Document;

/// Replace any fixture from a previous test with a fresh chat pane + compose
/// form.  wasm-bindgen tests share one page, so ids must be reclaimed.
pub(crate) fn fresh_chat_fixture() -> Document {
    let document = web_sys::window().unwrap().document().unwrap();
    if let Some(previous) = document.get_element_by_id("test-root") {
        previous.remove();
    }
    let root = document.create_element("div").unwrap();
    root.set_id("test-root");
    root.set_inner_html(
        r#"<div id="messages"></div>
           <form id="messageForm">
               <input type="text" id="message">
               <button id="sendButton" type="submit" disabled>Send</button>
           </form>"#,
    );
    document.body().unwrap().append_child(&root).unwrap();
    document
}

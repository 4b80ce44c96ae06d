use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

use crate::components::chat_view;
use crate::constants::{MESSAGE_FORM_ID, MESSAGE_INPUT_ID, SEND_BUTTON_ID};
use crate::dom_utils;
use crate::network::ws_client::OutboundSink;

// Submission channel: the compose form bound to the live transport.  The
// handler is re-installed by the connection manager on every reconnect so it
// always holds the current socket; assigning through the `onsubmit` slot
// replaces the previous binding instead of stacking listeners.

/// Toggle the send button.  Disabled whenever no connection is open.
pub fn set_send_enabled(document: &Document, enabled: bool) {
    if let Ok(button) = dom_utils::require_button(document, SEND_BUTTON_ID) {
        button.set_disabled(!enabled);
    }
}

/// Bind the compose form to `sink`.
pub fn install_submit_handler(
    document: &Document,
    sink: Rc<dyn OutboundSink>,
) -> Result<(), JsValue> {
    let form = dom_utils::require_html_element(document, MESSAGE_FORM_ID)?;
    let input = dom_utils::require_input(document, MESSAGE_INPUT_ID)?;
    let document = document.clone();

    let submit_handler = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let _ = chat_view::remove_placeholder(&document);

        let text = input.value();
        // Deliberately untrimmed: whitespace-only input is sent.
        if text.is_empty() {
            return;
        }

        if let Err(err) = append_local_echo(&document, &text) {
            web_sys::console::error_1(&format!("failed to render echo: {:?}", err).into());
        }
        if let Err(err) = sink.send_text(&text) {
            // The input is left intact so the user can retry once the
            // connection is back.
            web_sys::console::error_1(&format!("failed to send message: {:?}", err).into());
            return;
        }
        input.set_value("");
    }) as Box<dyn FnMut(_)>);

    form.set_onsubmit(Some(submit_handler.as_ref().unchecked_ref()));
    submit_handler.forget();
    Ok(())
}

/// The sender renders its own message immediately; the server's echo frame
/// is suppressed on receipt.
fn append_local_echo(document: &Document, text: &str) -> Result<(), JsValue> {
    let messages = dom_utils::require_element(document, crate::constants::MESSAGES_ID)?;
    let paragraph = document.create_element("p")?;
    paragraph.set_class_name("user");
    paragraph.set_text_content(Some(text));
    messages.append_child(&paragraph)?;
    Ok(())
}

use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod components;
pub mod constants;
pub mod dom_utils;
pub mod filter;
pub mod models;
pub mod network;
pub mod render_model;
pub mod ui;

#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

use network::{ChatSocket, Dispatch, WsConfig};

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");

    ui::setup::create_app_shell(&document)?;
    components::chat_view::show_placeholder(&document)?;
    ui::setup::wire_filter_controls(&document)?;
    components::sidebar::setup_sidebar(&document)?;
    components::agent_modal::setup_agent_modal(&document)?;

    connect_chat_socket(&document)
}

/// Build the supervised chat socket and open the first connection.  The
/// socket keeps itself alive across reconnects from here on.
fn connect_chat_socket(document: &Document) -> Result<(), JsValue> {
    let session_id = network::new_session_id();
    let url = network::get_ws_url(&session_id)?;
    web_sys::console::log_1(&format!("connecting chat socket to {}", url).into());

    let mut socket = ChatSocket::new(WsConfig::new(url));

    // Open: enable sending and bind the compose form to the new transport.
    let doc = document.clone();
    socket.set_on_open(move |ws| {
        components::composer::set_send_enabled(&doc, true);
        if let Err(err) = components::composer::install_submit_handler(&doc, Rc::new(ws)) {
            web_sys::console::error_1(
                &format!("failed to install submit handler: {:?}", err).into(),
            );
        }
    });

    // Frame received: route through the render pipeline.
    let doc = document.clone();
    socket.set_on_packet(move |packet| {
        if let Err(err) = handle_packet(&doc, &packet) {
            web_sys::console::error_1(&format!("failed to handle frame: {:?}", err).into());
        }
    });

    // Closed: sending stays disabled until the reconnect succeeds.
    let doc = document.clone();
    socket.set_on_close(move || {
        components::composer::set_send_enabled(&doc, false);
    });

    socket.connect()
}

/// One incoming frame: drop the placeholder, render per classification,
/// pin the scroll position, reapply the visibility filter.
pub(crate) fn handle_packet(document: &Document, packet: &Value) -> Result<(), JsValue> {
    components::chat_view::remove_placeholder(document)?;
    match network::classify(packet) {
        Dispatch::Render(message) => {
            components::chat_view::display_message(document, &message)?;
        }
        Dispatch::Fallback { role, text } => {
            components::chat_view::display_fallback(document, &role, &text)?;
        }
        Dispatch::Ignore => {}
    }
    components::chat_view::scroll_messages_to_bottom(document)?;
    filter::refresh_visibility(document)?;
    Ok(())
}

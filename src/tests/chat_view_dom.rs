//! Rendering pipeline against a real DOM: packet in, panel out.

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

use super::fresh_chat_fixture;
use crate::components::chat_view;
use crate::handle_packet;

wasm_bindgen_test_configure!(run_in_browser);

fn content_display(document: &Document) -> String {
    let content = document
        .query_selector(".message .message-content")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    content.style().get_property_value("display").unwrap()
}

fn toggle_icon_text(document: &Document) -> String {
    document
        .query_selector(".message .toggle-icon")
        .unwrap()
        .unwrap()
        .text_content()
        .unwrap()
}

#[wasm_bindgen_test]
fn host_agent_panel_starts_expanded() {
    let document = fresh_chat_fixture();
    let packet = serde_json::json!({
        "type": "message",
        "source": "host_agent",
        "content": { "text": "hi" }
    });
    handle_packet(&document, &packet).unwrap();

    let panel = document.query_selector(".message").unwrap().unwrap();
    assert_eq!(panel.get_attribute("data-source").as_deref(), Some("host_agent"));
    let header = document
        .query_selector(".message .header-content span")
        .unwrap()
        .unwrap();
    assert_eq!(header.text_content().as_deref(), Some("Host Agent"));
    assert_eq!(content_display(&document), "block");
    assert_eq!(toggle_icon_text(&document), "\u{2212}");
}

#[wasm_bindgen_test]
fn host_request_panel_toggles_open_and_closed() {
    let document = fresh_chat_fixture();
    let packet = serde_json::json!({
        "type": "message",
        "source": "host_request",
        "content": { "text": "hi" }
    });
    handle_packet(&document, &packet).unwrap();

    let header = document
        .query_selector(".message .header-content span")
        .unwrap()
        .unwrap();
    assert_eq!(header.text_content().as_deref(), Some("Host Request"));
    assert_eq!(content_display(&document), "none");
    assert_eq!(toggle_icon_text(&document), "+");

    let toggle = document
        .query_selector(".message .message-toggle")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    toggle.click();
    assert_eq!(content_display(&document), "block");
    assert_eq!(toggle_icon_text(&document), "\u{2212}");

    toggle.click();
    assert_eq!(content_display(&document), "none");
    assert_eq!(toggle_icon_text(&document), "+");
}

#[wasm_bindgen_test]
fn user_echo_frame_is_never_rendered() {
    let document = fresh_chat_fixture();
    chat_view::show_placeholder(&document).unwrap();

    let packet = serde_json::json!({
        "type": "message",
        "source": "user",
        "content": { "text": "hello" }
    });
    handle_packet(&document, &packet).unwrap();

    // The frame still clears the placeholder, but nothing is rendered.
    assert!(document.query_selector(".messages-placeholder").unwrap().is_none());
    assert!(document.query_selector(".message").unwrap().is_none());
}

#[wasm_bindgen_test]
fn legacy_frame_appends_literal_paragraph() {
    let document = fresh_chat_fixture();
    let packet = serde_json::json!({ "role": "system", "message": "a<b & c" });
    handle_packet(&document, &packet).unwrap();

    let paragraph = document.query_selector("#messages p.system").unwrap().unwrap();
    assert_eq!(paragraph.text_content().as_deref(), Some("a<b & c"));
}

#[wasm_bindgen_test]
fn typed_content_is_escaped() {
    let document = fresh_chat_fixture();
    let packet = serde_json::json!({
        "type": "message",
        "source": "task",
        "content": { "text": "<script>&", "role": "mapper" }
    });
    handle_packet(&document, &packet).unwrap();

    let content = document
        .query_selector(".message .message-content")
        .unwrap()
        .unwrap();
    assert_eq!(content.inner_html(), "&lt;script&gt;&amp;");
    let header = document
        .query_selector(".message .header-content span")
        .unwrap()
        .unwrap();
    assert_eq!(header.text_content().as_deref(), Some("mapper"));
}

#[wasm_bindgen_test]
fn message_without_text_renders_nothing() {
    let document = fresh_chat_fixture();
    let packet = serde_json::json!({
        "type": "message",
        "source": "host_agent",
        "content": { "role": "host" }
    });
    handle_packet(&document, &packet).unwrap();
    assert!(document.query_selector(".message").unwrap().is_none());
}

#[wasm_bindgen_test]
fn placeholder_is_shown_once_and_removable() {
    let document = fresh_chat_fixture();
    chat_view::show_placeholder(&document).unwrap();
    chat_view::show_placeholder(&document).unwrap();
    assert_eq!(
        document.query_selector_all(".messages-placeholder").unwrap().length(),
        1
    );
    chat_view::remove_placeholder(&document).unwrap();
    assert!(document.query_selector(".messages-placeholder").unwrap().is_none());
}

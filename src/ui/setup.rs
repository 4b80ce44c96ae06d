use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement};

use crate::constants::MESSAGES_ID;
use crate::filter::{self, FILTERS};

// App shell: the static DOM every widget hangs off.  Built once at startup
// when the host page has not already provided a `#messages` pane.

/// Create the chat shell (sidebar, message pane, compose form, modals)
/// unless the page already carries one.
pub fn create_app_shell(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(MESSAGES_ID).is_some() {
        return Ok(());
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let shell = document.create_element("div")?;
    shell.set_id("app-container");
    shell.set_inner_html(
        r#"
        <div id="sidebar" class="closed">
            <div class="sidebar-header">
                <span>Agents</span>
                <button id="show-add-agent-form" type="button">Add Agent</button>
            </div>
            <ul id="agent-list"></ul>
        </div>
        <button id="sidebar-toggle" type="button">☰</button>
        <div id="chat-panel">
            <div class="message-controls">
                <label><input type="checkbox" id="show-agent" checked> Agent</label>
                <label><input type="checkbox" id="show-task" checked> Tasks</label>
                <label><input type="checkbox" id="show-system" checked> System</label>
            </div>
            <div id="messages"></div>
            <form id="messageForm">
                <input type="text" id="message" autocomplete="off" placeholder="Type a message…">
                <button id="sendButton" type="submit" disabled>Send</button>
            </form>
        </div>
        <div id="add-agent-modal" class="modal-overlay" style="display: none;">
            <div class="modal">
                <form id="add-agent-form-modal">
                    <input type="text" id="new-agent-url-modal" placeholder="Agent URL">
                    <button id="preview-agent-btn" type="button">Preview</button>
                    <button type="submit">Add</button>
                    <button id="cancel-add-agent-modal" type="button">Cancel</button>
                </form>
            </div>
        </div>
        <div id="agent-card-modal" class="modal-overlay" style="display: none;">
            <div class="modal">
                <div id="agent-card-preview"></div>
                <button id="add-agent-confirm-btn" type="button" style="display: none;">Add Agent</button>
                <button id="cancel-agent-card-modal" type="button" style="display: none;">Cancel</button>
            </div>
        </div>
    "#,
    );
    body.append_child(&shell)?;
    Ok(())
}

/// Wire the `.message-controls` checkboxes to the filter state.  Each change
/// routes through the shared `FILTERS` cell and one reapplication pass.
pub fn wire_filter_controls(document: &Document) -> Result<(), JsValue> {
    let checkboxes = document.query_selector_all(".message-controls input")?;
    for index in 0..checkboxes.length() {
        let Some(node) = checkboxes.item(index) else { continue };
        let Ok(checkbox) = node.dyn_into::<HtmlInputElement>() else { continue };

        let document = document.clone();
        let checkbox_for_handler = checkbox.clone();
        let change_handler = Closure::wrap(Box::new(move |_: Event| {
            // Checkbox ids follow the `show-<source>` convention.
            let source = checkbox_for_handler.id().replace("show-", "");
            FILTERS.with(|filters| {
                filters
                    .borrow_mut()
                    .set_visible(&source, checkbox_for_handler.checked());
            });
            if let Err(err) = filter::refresh_visibility(&document) {
                web_sys::console::error_1(
                    &format!("failed to apply message filters: {:?}", err).into(),
                );
            }
        }) as Box<dyn FnMut(_)>);

        checkbox.add_event_listener_with_callback("change", change_handler.as_ref().unchecked_ref())?;
        change_handler.forget();
    }
    Ok(())
}

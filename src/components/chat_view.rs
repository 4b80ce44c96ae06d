use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::constants::{MESSAGES_ID, PLACEHOLDER_TEXT};
use crate::dom_utils;
use crate::network::messages::ChatMessage;
use crate::render_model::{build_message_view, Collapse, MessageView};

// Materialization stage of the message renderer: `render_model` decides what
// a panel looks like, this module puts it in the DOM.

fn messages_container(document: &Document) -> Result<Element, JsValue> {
    dom_utils::require_element(document, MESSAGES_ID)
}

/// Show the empty-state placeholder unless one is already present.
pub fn show_placeholder(document: &Document) -> Result<(), JsValue> {
    let messages = messages_container(document)?;
    if messages.query_selector(".messages-placeholder")?.is_none() {
        let placeholder = document.create_element("div")?;
        placeholder.set_class_name("messages-placeholder");
        placeholder.set_text_content(Some(PLACEHOLDER_TEXT));
        messages.append_child(&placeholder)?;
    }
    Ok(())
}

/// Remove the empty-state placeholder if present.
pub fn remove_placeholder(document: &Document) -> Result<(), JsValue> {
    let messages = messages_container(document)?;
    if let Some(placeholder) = messages.query_selector(".messages-placeholder")? {
        placeholder.remove();
    }
    Ok(())
}

/// Pin the message pane to its latest entry.
pub fn scroll_messages_to_bottom(document: &Document) -> Result<(), JsValue> {
    let messages = messages_container(document)?;
    dom_utils::scroll_to_bottom(&messages);
    Ok(())
}

/// Render a typed message into the pane.  Messages without text render
/// nothing; that is a normal outcome, not an error.
pub fn display_message(document: &Document, message: &ChatMessage) -> Result<(), JsValue> {
    match build_message_view(message) {
        Some(view) => append_view(document, &view),
        None => Ok(()),
    }
}

/// Render a legacy untyped frame as a bare paragraph.  The role doubles as
/// the CSS class; the text lands literally (no markup interpretation), which
/// is the whole sanitization story for this path.
pub fn display_fallback(document: &Document, role: &str, text: &str) -> Result<(), JsValue> {
    let messages = messages_container(document)?;
    let paragraph = document.create_element("p")?;
    paragraph.set_class_name(role);
    paragraph.set_text_content(Some(text));
    messages.append_child(&paragraph)?;
    Ok(())
}

fn append_view(document: &Document, view: &MessageView) -> Result<(), JsValue> {
    let messages = messages_container(document)?;
    let panel = document.create_element("div")?;
    panel.set_class_name(&view.panel_class);
    panel.set_attribute("data-source", &view.source)?;

    match view.toggle {
        Some(initial) => {
            panel.set_inner_html(&format!(
                r#"<div class="{header_class}">
  <div class="header-content">
    <span>{header}</span>
    <button class="message-toggle" type="button" title="Show/hide content">
      <span class="toggle-icon">{icon}</span>
    </button>
  </div>
</div>
<div class="message-content" style="display: {display};">{body}</div>"#,
                header_class = view.header_class,
                header = view.header,
                icon = initial.icon(),
                display = initial.display(),
                body = view.body_html,
            ));
            if let Some(button) = panel.query_selector(".message-toggle")? {
                attach_toggle(&panel, &button)?;
            }
        }
        None => {
            panel.set_inner_html(&format!(
                r#"<div class="{header_class}">
  <div class="header-content">
    <span>{header}</span>
  </div>
</div>
<div class="message-content">{body}</div>"#,
                header_class = view.header_class,
                header = view.header,
                body = view.body_html,
            ));
        }
    }

    messages.append_child(&panel)?;
    dom_utils::scroll_to_bottom(&messages);
    Ok(())
}

/// Wire the expand/collapse button: flips the content's display and swaps
/// the icon glyph between "+" and "−".
fn attach_toggle(panel: &Element, button: &Element) -> Result<(), JsValue> {
    let panel = panel.clone();
    let button_el = button.clone();
    let toggle_handler = Closure::wrap(Box::new(move |_: Event| {
        let content = panel
            .query_selector(".message-content")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let icon = button_el.query_selector(".toggle-icon").ok().flatten();
        if let (Some(content), Some(icon)) = (content, icon) {
            let hidden = content.style().get_property_value("display").ok()
                == Some("none".to_string());
            if hidden {
                dom_utils::set_display(&content, Collapse::Expanded.display());
                icon.set_text_content(Some(Collapse::Expanded.icon()));
            } else {
                dom_utils::set_display(&content, Collapse::Collapsed.display());
                icon.set_text_content(Some(Collapse::Collapsed.icon()));
            }
        }
    }) as Box<dyn FnMut(_)>);

    button.add_event_listener_with_callback("click", toggle_handler.as_ref().unchecked_ref())?;
    toggle_handler.forget();
    Ok(())
}

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::components::sidebar;
use crate::dom_utils;
use crate::models::AgentCard;
use crate::network::ApiClient;

// Add-agent modal: URL entry, optional card preview, confirm.  Two stacked
// overlays: the URL form (`#add-agent-modal`) and the card preview
// (`#agent-card-modal`).

const ADD_MODAL_ID: &str = "add-agent-modal";
const ADD_FORM_ID: &str = "add-agent-form-modal";
const SHOW_BUTTON_ID: &str = "show-add-agent-form";
const CANCEL_ADD_ID: &str = "cancel-add-agent-modal";
const URL_INPUT_ID: &str = "new-agent-url-modal";
const PREVIEW_BUTTON_ID: &str = "preview-agent-btn";
const CARD_MODAL_ID: &str = "agent-card-modal";
const CARD_PREVIEW_ID: &str = "agent-card-preview";
const CONFIRM_BUTTON_ID: &str = "add-agent-confirm-btn";
const CANCEL_CARD_ID: &str = "cancel-agent-card-modal";

/// Wire every modal control.  Called once at startup.
pub fn setup_agent_modal(document: &Document) -> Result<(), JsValue> {
    setup_open_button(document)?;
    setup_dismissal(document)?;
    setup_form_submit(document)?;
    setup_preview_button(document)?;
    setup_confirm_button(document)?;
    Ok(())
}

fn setup_open_button(document: &Document) -> Result<(), JsValue> {
    let show_btn = dom_utils::require_element(document, SHOW_BUTTON_ID)?;
    let document = document.clone();
    let open_handler = Closure::wrap(Box::new(move |_: Event| {
        let Ok(modal) = dom_utils::require_html_element(&document, ADD_MODAL_ID) else { return };
        dom_utils::set_display(&modal, "flex");
        if let Ok(input) = dom_utils::require_input(&document, URL_INPUT_ID) {
            input.set_value("");
            let _ = input.focus();
        }
    }) as Box<dyn FnMut(_)>);
    show_btn.add_event_listener_with_callback("click", open_handler.as_ref().unchecked_ref())?;
    open_handler.forget();
    Ok(())
}

fn setup_dismissal(document: &Document) -> Result<(), JsValue> {
    // Cancel button closes the form modal.
    let cancel_btn = dom_utils::require_element(document, CANCEL_ADD_ID)?;
    let doc = document.clone();
    let cancel_handler = Closure::wrap(Box::new(move |_: Event| {
        hide_modal(&doc, ADD_MODAL_ID);
    }) as Box<dyn FnMut(_)>);
    cancel_btn.add_event_listener_with_callback("click", cancel_handler.as_ref().unchecked_ref())?;
    cancel_handler.forget();

    // Clicking the overlay itself (not the dialog inside it) also closes.
    let modal = dom_utils::require_element(document, ADD_MODAL_ID)?;
    let modal_el = modal.clone();
    let doc = document.clone();
    let overlay_handler = Closure::wrap(Box::new(move |event: Event| {
        let Some(target) = event.target() else { return };
        let Some(target_el) = target.dyn_ref::<Element>().cloned() else { return };
        if target_el.is_same_node(Some(modal_el.unchecked_ref())) {
            hide_modal(&doc, ADD_MODAL_ID);
        }
    }) as Box<dyn FnMut(_)>);
    modal.add_event_listener_with_callback("click", overlay_handler.as_ref().unchecked_ref())?;
    overlay_handler.forget();

    // Cancel on the preview modal closes just the preview.
    let cancel_card = dom_utils::require_element(document, CANCEL_CARD_ID)?;
    let doc = document.clone();
    let cancel_card_handler = Closure::wrap(Box::new(move |_: Event| {
        hide_modal(&doc, CARD_MODAL_ID);
    }) as Box<dyn FnMut(_)>);
    cancel_card
        .add_event_listener_with_callback("click", cancel_card_handler.as_ref().unchecked_ref())?;
    cancel_card_handler.forget();
    Ok(())
}

fn setup_form_submit(document: &Document) -> Result<(), JsValue> {
    let form = dom_utils::require_html_element(document, ADD_FORM_ID)?;
    let document = document.clone();
    let submit_handler = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let Some(url) = entered_url(&document) else { return };
        let document = document.clone();
        wasm_bindgen_futures::spawn_local(async move {
            register_agent(&document, &url).await;
            hide_modal(&document, ADD_MODAL_ID);
        });
    }) as Box<dyn FnMut(_)>);
    form.set_onsubmit(Some(submit_handler.as_ref().unchecked_ref()));
    submit_handler.forget();
    Ok(())
}

fn setup_preview_button(document: &Document) -> Result<(), JsValue> {
    let preview_btn = dom_utils::require_element(document, PREVIEW_BUTTON_ID)?;
    let document = document.clone();
    let preview_handler = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let Some(url) = entered_url(&document) else { return };
        let document = document.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(preview) = dom_utils::require_element(&document, CARD_PREVIEW_ID) {
                preview.set_inner_html(r#"<div class="loading">Loading agent details…</div>"#);
            }
            if let Ok(card_modal) = dom_utils::require_html_element(&document, CARD_MODAL_ID) {
                dom_utils::set_display(&card_modal, "flex");
            }

            match ApiClient::preview_agent_card(&url).await {
                Ok(card) if card.success != Some(false) => {
                    if let Err(err) = render_card(&document, &card) {
                        web_sys::console::error_1(
                            &format!("failed to render agent card: {:?}", err).into(),
                        );
                    }
                    set_confirm_available(&document, true);
                }
                Ok(_) => {
                    show_preview_error(&document, "Could not load agent details.");
                    set_confirm_available(&document, false);
                }
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("agent card preview error: {:?}", err).into(),
                    );
                    show_preview_error(&document, "Could not load agent details.");
                    set_confirm_available(&document, false);
                }
            }
            if let Ok(cancel) = dom_utils::require_html_element(&document, CANCEL_CARD_ID) {
                dom_utils::set_display(&cancel, "inline-block");
            }
        });
    }) as Box<dyn FnMut(_)>);
    preview_btn.add_event_listener_with_callback("click", preview_handler.as_ref().unchecked_ref())?;
    preview_handler.forget();
    Ok(())
}

fn setup_confirm_button(document: &Document) -> Result<(), JsValue> {
    let confirm_btn = dom_utils::require_element(document, CONFIRM_BUTTON_ID)?;
    let document = document.clone();
    let confirm_handler = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let Some(url) = entered_url(&document) else { return };
        let document = document.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::add_agent(&url).await {
                Ok(result) if result.success => {
                    let _ = sidebar::reveal_and_refresh(&document);
                    hide_modal(&document, CARD_MODAL_ID);
                    hide_modal(&document, ADD_MODAL_ID);
                }
                Ok(_) => show_preview_error(&document, "Could not load agent details."),
                Err(err) => {
                    web_sys::console::error_1(&format!("add agent failed: {:?}", err).into());
                    show_preview_error(&document, "Failed to add agent.");
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    confirm_btn.add_event_listener_with_callback("click", confirm_handler.as_ref().unchecked_ref())?;
    confirm_handler.forget();
    Ok(())
}

/// Register `url` and refresh the sidebar, mirroring the preview-less form
/// submit: structured failure keeps the preview-cancel affordance visible,
/// transport failure alerts.
async fn register_agent(document: &Document, url: &str) {
    match ApiClient::add_agent(url).await {
        Ok(result) if result.success => {
            let _ = sidebar::reveal_and_refresh(document);
        }
        Ok(result) => {
            set_confirm_available(document, false);
            if result.fail == Some(false) && result.error.is_some() {
                if let Ok(cancel) = dom_utils::require_html_element(document, CANCEL_CARD_ID) {
                    dom_utils::set_display(&cancel, "inline-block");
                }
            } else {
                dom_utils::alert("Failed to add agent.");
            }
        }
        Err(err) => {
            web_sys::console::error_1(&format!("add agent failed: {:?}", err).into());
            set_confirm_available(document, false);
            dom_utils::alert("Failed to add agent.");
        }
    }
}

/// Trimmed URL from the modal input; `None` when empty.
fn entered_url(document: &Document) -> Option<String> {
    let input = dom_utils::require_input(document, URL_INPUT_ID).ok()?;
    let url = input.value().trim().to_string();
    if url.is_empty() { None } else { Some(url) }
}

fn hide_modal(document: &Document, id: &str) {
    if let Ok(modal) = dom_utils::require_html_element(document, id) {
        dom_utils::set_display(&modal, "none");
    }
}

fn set_confirm_available(document: &Document, available: bool) {
    if let Ok(confirm) = dom_utils::require_button(document, CONFIRM_BUTTON_ID) {
        dom_utils::set_display(&confirm, if available { "inline-block" } else { "none" });
        confirm.set_disabled(!available);
    }
}

fn show_preview_error(document: &Document, message: &str) {
    if let Ok(preview) = dom_utils::require_element(document, CARD_PREVIEW_ID) {
        preview.set_inner_html(&format!(r#"<div class="error">{}</div>"#, message));
    }
}

/// Materialize the fetched card into the preview pane.
fn render_card(document: &Document, card: &AgentCard) -> Result<(), JsValue> {
    let preview = dom_utils::require_element(document, CARD_PREVIEW_ID)?;

    let content = document.create_element("div")?;
    content.set_class_name("agent-card-info");

    let name_row = document.create_element("div")?;
    name_row.set_class_name("info-row");
    name_row.set_inner_html(&format!(
        "<strong>Name:</strong> {}",
        card.name.as_deref().unwrap_or("Unnamed Agent")
    ));
    content.append_child(&name_row)?;

    if let Some(description) = &card.description {
        let desc_row = document.create_element("div")?;
        desc_row.set_class_name("info-row");
        desc_row.set_inner_html(&format!("<strong>Description:</strong> {}", description));
        content.append_child(&desc_row)?;
    }

    if !card.tools.is_empty() {
        let tools_row = document.create_element("div")?;
        tools_row.set_class_name("info-row");
        tools_row.set_inner_html("<strong>Tools:</strong>");
        let list = document.create_element("ul")?;
        for tool in &card.tools {
            let item = document.create_element("li")?;
            let label = match &tool.description {
                Some(description) => format!("{}: {}", tool.name, description),
                None => tool.name.clone(),
            };
            item.set_text_content(Some(&label));
            list.append_child(&item)?;
        }
        tools_row.append_child(&list)?;
        content.append_child(&tools_row)?;
    }

    if !card.capabilities.is_empty() {
        let caps_row = document.create_element("div")?;
        caps_row.set_class_name("info-row");
        caps_row.set_inner_html("<strong>Capabilities:</strong>");
        let list = document.create_element("ul")?;
        for capability in &card.capabilities {
            let item = document.create_element("li")?;
            item.set_text_content(Some(capability));
            list.append_child(&item)?;
        }
        caps_row.append_child(&list)?;
        content.append_child(&caps_row)?;
    }

    preview.set_inner_html("");
    preview.append_child(&content)?;
    Ok(())
}

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::constants::{AGENT_LIST_ID, SIDEBAR_ID, SIDEBAR_TOGGLE_ID};
use crate::dom_utils;
use crate::models::AgentInfo;
use crate::network::ApiClient;

// Sidebar: collapse toggle plus the registered-agent list.  The list is
// fetched fresh every time the sidebar opens.

/// Wire the sidebar toggle button.  Called once at startup.
pub fn setup_sidebar(document: &Document) -> Result<(), JsValue> {
    let toggle = dom_utils::require_element(document, SIDEBAR_TOGGLE_ID)?;

    let document = document.clone();
    let toggle_handler = Closure::wrap(Box::new(move |_: Event| {
        let Ok(sidebar) = dom_utils::require_element(&document, SIDEBAR_ID) else { return };
        let _ = sidebar.class_list().toggle("closed");
        if !sidebar.class_list().contains("closed") {
            let document = document.clone();
            wasm_bindgen_futures::spawn_local(async move {
                refresh_agent_list(&document).await;
            });
        }
    }) as Box<dyn FnMut(_)>);

    toggle.add_event_listener_with_callback("click", toggle_handler.as_ref().unchecked_ref())?;
    toggle_handler.forget();
    Ok(())
}

/// Refresh the sidebar list from `GET /agents`.  Failures surface as a
/// blocking alert; the stale list is left in place.
pub async fn refresh_agent_list(document: &Document) {
    match ApiClient::get_agents().await {
        Ok(response) => {
            if let Err(err) = render_agent_list(document, &response.agents) {
                web_sys::console::error_1(&format!("failed to render agent list: {:?}", err).into());
            }
        }
        Err(err) => {
            web_sys::console::error_1(&format!("failed to load agent list: {:?}", err).into());
            dom_utils::alert("Failed to load agent list.");
        }
    }
}

/// Open the sidebar (refreshing the list through its toggle handler), or
/// refresh in place when it is already open.  Used by the add-agent flows.
pub fn reveal_and_refresh(document: &Document) -> Result<(), JsValue> {
    let sidebar = dom_utils::require_element(document, SIDEBAR_ID)?;
    if sidebar.class_list().contains("closed") {
        let toggle = dom_utils::require_html_element(document, SIDEBAR_TOGGLE_ID)?;
        toggle.click();
    } else {
        let document = document.clone();
        wasm_bindgen_futures::spawn_local(async move {
            refresh_agent_list(&document).await;
        });
    }
    Ok(())
}

fn render_agent_list(document: &Document, agents: &[AgentInfo]) -> Result<(), JsValue> {
    let list = dom_utils::require_element(document, AGENT_LIST_ID)?;
    list.set_inner_html("");

    for agent in agents {
        let item = document.create_element("li")?;
        item.set_text_content(Some(&agent.name));

        let delete_btn = document.create_element("button")?;
        delete_btn.set_text_content(Some("X"));
        delete_btn.set_class_name("delete-agent-btn");
        attach_delete_handler(&delete_btn, &item, &agent.url)?;

        item.append_child(&delete_btn)?;
        list.append_child(&item)?;
    }
    Ok(())
}

fn attach_delete_handler(button: &Element, item: &Element, agent_url: &str) -> Result<(), JsValue> {
    let item = item.clone();
    let agent_url = agent_url.to_string();

    let delete_handler = Closure::wrap(Box::new(move |event: Event| {
        event.stop_propagation();
        if !dom_utils::confirm("Delete this agent?") {
            return;
        }
        let item = item.clone();
        let agent_url = agent_url.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::delete_agent(&agent_url).await {
                Ok(result) if result.success => item.remove(),
                Ok(result) => {
                    if let (Some(false), Some(error)) = (result.fail, result.error) {
                        dom_utils::alert(&error);
                    } else {
                        dom_utils::alert("Failed to delete agent.");
                    }
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("delete agent failed: {:?}", err).into());
                    dom_utils::alert("Failed to delete agent.");
                }
            }
        });
    }) as Box<dyn FnMut(_)>);

    button.add_event_listener_with_callback("click", delete_handler.as_ref().unchecked_ref())?;
    delete_handler.forget();
    Ok(())
}

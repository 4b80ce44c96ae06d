use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::models::{AgentCard, AgentListResponse, AgentMutationResponse};

// REST API client for the agent registry endpoints.

pub struct ApiClient;

impl ApiClient {
    // Get the base URL for API calls
    fn api_base_url() -> Result<String, JsValue> {
        super::get_api_base_url()
    }

    /// `GET /agents` – the registered agent list for the sidebar.
    pub async fn get_agents() -> Result<AgentListResponse, JsValue> {
        let url = format!("{}/agents", Self::api_base_url()?);
        let body = Self::fetch_json(&url, "GET", None).await?;
        serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse agent list: {}", e)))
    }

    /// `POST /agents` – register a new agent endpoint by URL.
    pub async fn add_agent(agent_url: &str) -> Result<AgentMutationResponse, JsValue> {
        let url = format!("{}/agents", Self::api_base_url()?);
        let payload = serde_json::json!({ "url": agent_url }).to_string();
        let body = Self::fetch_json(&url, "POST", Some(&payload)).await?;
        serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse add-agent response: {}", e)))
    }

    /// `DELETE /agents` – remove a registered agent by URL.
    pub async fn delete_agent(agent_url: &str) -> Result<AgentMutationResponse, JsValue> {
        let url = format!("{}/agents", Self::api_base_url()?);
        let payload = serde_json::json!({ "url": agent_url }).to_string();
        let body = Self::fetch_json(&url, "DELETE", Some(&payload)).await?;
        serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse delete response: {}", e)))
    }

    /// `POST /agent_card_preview` – fetch the card a remote agent advertises
    /// without registering it.
    pub async fn preview_agent_card(agent_url: &str) -> Result<AgentCard, JsValue> {
        let url = format!("{}/agent_card_preview", Self::api_base_url()?);
        let payload = serde_json::json!({ "url": agent_url }).to_string();
        let body = Self::fetch_json(&url, "POST", Some(&payload)).await?;
        serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse agent card: {}", e)))
    }

    // Helper function to make fetch requests
    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        if let Some(data) = body {
            let js_body = JsValue::from_str(data);
            opts.set_body(&js_body);
            headers.append("Content-Type", "application/json")?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;

        let window = web_sys::window().expect("no global window exists");
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "API request failed: {} {}",
                resp.status(),
                resp.status_text()
            )));
        }

        // Parse body as text – callers decode JSON through serde.
        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}

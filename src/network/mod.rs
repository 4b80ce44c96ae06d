// Re-export network modules
pub mod api_client;
pub mod messages;
pub mod ws_client;

// Re-export commonly used items
pub use api_client::ApiClient;
pub use messages::{classify, ChatMessage, Dispatch};
pub use ws_client::{ChatSocket, ConnectionState, OutboundSink, WsConfig};

use rand::Rng;
use wasm_bindgen::JsValue;

/// Generate the per-page session id: a random numeric string.  Uniqueness is
/// best-effort; the backend keys nothing durable on it.
pub fn new_session_id() -> String {
    let mut rng = rand::thread_rng();
    (0..10).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

/// WebSocket endpoint for this session: `ws://<host>/ws/<session-id>`.
pub fn get_ws_url(session_id: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let host = window.location().host()?;
    Ok(format!("ws://{}/ws/{}", host, session_id))
}

// Helper function to get the REST base URL (same origin as the page).
pub(crate) fn get_api_base_url() -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let location = window.location();
    Ok(format!("{}//{}", location.protocol()?, location.host()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_numeric_strings() {
        let id = new_session_id();
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}

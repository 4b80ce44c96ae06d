use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};
use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use crate::constants::RECONNECT_DELAY_MS;

/// Represents the current state of the chat connection
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Open => write!(f, "Open"),
            ConnectionState::Closed => write!(f, "Closed"),
        }
    }
}

/// Configuration for the chat socket
#[derive(Clone, Debug)]
pub struct WsConfig {
    /// Target URL, identical across every reconnect attempt.
    pub url: String,
    /// Fixed delay between a close and the next connection attempt.
    pub reconnect_delay_ms: u32,
}

impl WsConfig {
    pub fn new(url: String) -> Self {
        Self {
            url,
            reconnect_delay_ms: RECONNECT_DELAY_MS,
        }
    }
}

/// Anything that can carry an outgoing raw-text frame.  The live
/// `WebSocket` is the production implementation; tests substitute a
/// recording sink.
pub trait OutboundSink {
    fn send_text(&self, text: &str) -> Result<(), JsValue>;
}

impl OutboundSink for WebSocket {
    fn send_text(&self, text: &str) -> Result<(), JsValue> {
        self.send_with_str(text)
    }
}

/// Type for the on_open callback; receives the newly opened socket so the
/// submission channel can bind to the live transport.
type OnOpenCallback = Rc<RefCell<dyn FnMut(WebSocket)>>;
/// Type for the on_packet callback (receives the parsed JSON frame)
type OnPacketCallback = Rc<RefCell<dyn FnMut(Value)>>;
/// Type for the on_close callback
type OnCloseCallback = Rc<RefCell<dyn FnMut()>>;

/// Supervises exactly one live WebSocket at a time.
///
/// The socket reference is single-owner: it lives in one shared cell and is
/// replaced wholesale on reconnect, never mutated in place.  Every close
/// schedules a fresh connection attempt to the same URL after a fixed delay;
/// handlers are re-attached to the replacement socket on each attempt.
#[derive(Clone)]
pub struct ChatSocket {
    config: WsConfig,
    socket: Rc<RefCell<Option<WebSocket>>>,
    state: Rc<RefCell<ConnectionState>>,
    on_open: Option<OnOpenCallback>,
    on_packet: Option<OnPacketCallback>,
    on_close: Option<OnCloseCallback>,
}

impl ChatSocket {
    pub fn new(config: WsConfig) -> Self {
        Self {
            config,
            socket: Rc::new(RefCell::new(None)),
            state: Rc::new(RefCell::new(ConnectionState::Closed)),
            on_open: None,
            on_packet: None,
            on_close: None,
        }
    }

    /// Set a handler called on every successful open, including reopens
    /// after a reconnect.  The handler receives the live socket.
    pub fn set_on_open<F>(&mut self, callback: F)
    where
        F: FnMut(WebSocket) + 'static,
    {
        self.on_open = Some(Rc::new(RefCell::new(callback)));
    }

    /// Set a handler for incoming frames, called with the parsed
    /// `serde_json::Value`.
    pub fn set_on_packet<F>(&mut self, callback: F)
    where
        F: FnMut(Value) + 'static,
    {
        self.on_packet = Some(Rc::new(RefCell::new(callback)));
    }

    /// Set a handler called whenever the connection drops.
    pub fn set_on_close<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.on_close = Some(Rc::new(RefCell::new(callback)));
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Open a connection and attach all handlers.  On close the socket
    /// schedules its own replacement, so one call supervises the connection
    /// for the rest of the page lifetime.
    pub fn connect(&self) -> Result<(), JsValue> {
        *self.state.borrow_mut() = ConnectionState::Connecting;
        let ws = self.establish_connection()?;
        *self.socket.borrow_mut() = Some(ws);
        Ok(())
    }

    /// Creates the WebSocket and wires open/message/error/close handlers.
    fn establish_connection(&self) -> Result<WebSocket, JsValue> {
        let ws = WebSocket::new(&self.config.url)?;

        // -- open ---------------------------------------------------------
        let state = self.state.clone();
        let on_open_cb = self.on_open.clone();
        let ws_for_open = ws.clone();
        let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
            web_sys::console::log_1(&"chat socket connected".into());
            *state.borrow_mut() = ConnectionState::Open;
            if let Some(callback) = &on_open_cb {
                (callback.borrow_mut())(ws_for_open.clone());
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        // -- message ------------------------------------------------------
        let on_packet_cb = self.on_packet.clone();
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            // Only handle text frames
            let Ok(text) = event.data().dyn_into::<js_sys::JsString>() else {
                web_sys::console::warn_1(&"received non-text frame".into());
                return;
            };
            let Some(raw) = text.as_string() else { return };
            match serde_json::from_str::<Value>(&raw) {
                Ok(packet) => {
                    if let Some(callback) = &on_packet_cb {
                        (callback.borrow_mut())(packet);
                    }
                }
                // Malformed JSON is fatal for this frame only: log and drop,
                // the connection stays up.
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("failed to parse incoming frame as JSON: {}", err).into(),
                    );
                }
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        // -- error --------------------------------------------------------
        // No recovery here; the close event that follows drives it.
        let onerror = Closure::wrap(Box::new(move |event: web_sys::Event| {
            web_sys::console::error_1(&format!("chat socket error: {:?}", event).into());
        }) as Box<dyn FnMut(web_sys::Event)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        // -- close --------------------------------------------------------
        let state = self.state.clone();
        let on_close_cb = self.on_close.clone();
        let supervisor = self.clone();
        let onclose = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!(
                    "chat socket closed (code {}), reconnecting in {} ms",
                    event.code(),
                    supervisor.config.reconnect_delay_ms
                )
                .into(),
            );
            *state.borrow_mut() = ConnectionState::Closed;
            if let Some(callback) = &on_close_cb {
                (callback.borrow_mut())();
            }
            supervisor.schedule_reconnect();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        Ok(ws)
    }

    /// Schedule a reconnection attempt after the fixed delay.  Runs on a
    /// fresh event-loop turn, so repeated failures do not grow a call stack.
    fn schedule_reconnect(&self) {
        let supervisor = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(supervisor.config.reconnect_delay_ms).await;
            // A newer socket may already be live (e.g. two stale closes in
            // flight); only the first attempt per outage proceeds.
            if *supervisor.state.borrow() != ConnectionState::Closed {
                return;
            }
            web_sys::console::log_1(&"attempting chat socket reconnect".into());
            if let Err(err) = supervisor.connect() {
                web_sys::console::error_1(
                    &format!("failed to open replacement socket: {:?}", err).into(),
                );
                *supervisor.state.borrow_mut() = ConnectionState::Closed;
                supervisor.schedule_reconnect();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_socket_starts_closed() {
        let socket = ChatSocket::new(WsConfig::new("ws://localhost/ws/1".into()));
        assert_eq!(socket.connection_state(), ConnectionState::Closed);
    }

    #[test]
    fn config_carries_the_fixed_reconnect_delay() {
        let config = WsConfig::new("ws://localhost/ws/1".into());
        assert_eq!(config.reconnect_delay_ms, 5000);
    }
}

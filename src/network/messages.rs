use serde::Deserialize;
use serde_json::Value;

// Wire format of the chat socket.  Two frame shapes arrive: the typed
// `{"type": "message", ...}` envelope and a legacy untyped `{role, message}`
// paragraph.  Classification is pure so it can be unit tested off-browser.

/// Body of a typed `"message"` frame.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub source: String,
    pub content: MessageContent,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MessageContent {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// What the connection manager should do with one incoming frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    /// Typed message bound for the renderer.
    Render(ChatMessage),
    /// Legacy untyped frame: a bare paragraph styled by `role`.
    Fallback { role: String, text: String },
    /// Echo of our own input, or a shape we do not handle.
    Ignore,
}

/// Classify one parsed frame.
///
/// Typed frames (`type == "message"`) from any source but `"user"` go to the
/// renderer.  Frames without a `type` field are legacy paragraphs unless they
/// too come from the user.  Anything else is dropped without error.
pub fn classify(packet: &Value) -> Dispatch {
    match packet.get("type") {
        Some(kind) if kind.as_str() == Some("message") => {
            if packet.get("source").and_then(Value::as_str) == Some("user") {
                return Dispatch::Ignore;
            }
            match serde_json::from_value::<ChatMessage>(packet.clone()) {
                Ok(message) => Dispatch::Render(message),
                Err(_) => Dispatch::Ignore,
            }
        }
        Some(_) => Dispatch::Ignore,
        None => {
            let role = packet.get("role").and_then(Value::as_str);
            if role == Some("user") {
                return Dispatch::Ignore;
            }
            let text = packet
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Dispatch::Fallback {
                role: role.unwrap_or("agent").to_string(),
                text,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_message_is_rendered() {
        let packet = json!({
            "type": "message",
            "source": "host_agent",
            "content": { "text": "hi", "role": "host" }
        });
        match classify(&packet) {
            Dispatch::Render(msg) => {
                assert_eq!(msg.source, "host_agent");
                assert_eq!(msg.content.text.as_deref(), Some("hi"));
                assert_eq!(msg.content.role.as_deref(), Some("host"));
            }
            other => panic!("expected Render, got {:?}", other),
        }
    }

    #[test]
    fn user_echo_is_suppressed() {
        let packet = json!({
            "type": "message",
            "source": "user",
            "content": { "text": "hello" }
        });
        assert_eq!(classify(&packet), Dispatch::Ignore);
    }

    #[test]
    fn legacy_frame_falls_back_to_paragraph() {
        let packet = json!({ "role": "system", "message": "note" });
        assert_eq!(
            classify(&packet),
            Dispatch::Fallback {
                role: "system".into(),
                text: "note".into()
            }
        );
    }

    #[test]
    fn legacy_frame_from_user_is_suppressed() {
        let packet = json!({ "role": "user", "message": "echo" });
        assert_eq!(classify(&packet), Dispatch::Ignore);
    }

    #[test]
    fn legacy_frame_without_role_defaults_to_agent() {
        let packet = json!({ "message": "anonymous" });
        assert_eq!(
            classify(&packet),
            Dispatch::Fallback {
                role: "agent".into(),
                text: "anonymous".into()
            }
        );
    }

    #[test]
    fn unknown_typed_frame_is_dropped() {
        let packet = json!({ "type": "ping" });
        assert_eq!(classify(&packet), Dispatch::Ignore);
    }

    #[test]
    fn typed_frame_without_content_is_dropped() {
        // `content` is required by the envelope; a frame missing it does not
        // reach the renderer.
        let packet = json!({ "type": "message", "source": "task" });
        assert_eq!(classify(&packet), Dispatch::Ignore);
    }
}

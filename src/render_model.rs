//! Pure rendering stage: turns a typed chat message into a `MessageView`
//! describing the panel to materialize.  Keeping this free of `web_sys`
//! lets the variant branching and the sanitizer run under plain `cargo test`.

use crate::constants::{DEFAULT_TASK_LABEL, HOST_AGENT_LABEL, HOST_REQUEST_LABEL};
use crate::network::messages::ChatMessage;

/// Escape `&`, `<`, `>` to their HTML entities and strip the combining long
/// stroke overlay (U+0336), in that fixed order.  This is the only
/// sanitization applied to message text.
pub fn sanitize_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{0336}', "")
}

/// Initial collapse state of a collapsible panel body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collapse {
    Expanded,
    Collapsed,
}

impl Collapse {
    pub fn icon(self) -> &'static str {
        match self {
            Collapse::Expanded => "\u{2212}", // minus sign, wider than '-'
            Collapse::Collapsed => "+",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Collapse::Expanded => "block",
            Collapse::Collapsed => "none",
        }
    }
}

/// Render model for one incoming message panel.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageView {
    /// Originating `source`, recorded on the element for the visibility
    /// filter.
    pub source: String,
    pub header: String,
    /// Sanitized message body, ready for innerHTML insertion.
    pub body_html: String,
    pub panel_class: String,
    pub header_class: &'static str,
    /// `Some` for collapsible variants, with their initial state.
    pub toggle: Option<Collapse>,
}

/// Build the render model for a typed message, or `None` when the message
/// carries no text and nothing should be rendered.
pub fn build_message_view(message: &ChatMessage) -> Option<MessageView> {
    let text = message.content.text.as_deref().filter(|t| !t.is_empty())?;
    let body_html = sanitize_text(text);

    let view = match message.source.as_str() {
        "host_request" | "host_agent" => {
            let expanded = message.source == "host_agent";
            MessageView {
                source: message.source.clone(),
                header: if expanded { HOST_AGENT_LABEL } else { HOST_REQUEST_LABEL }.to_string(),
                body_html,
                panel_class: "message host-request left-align host-message".to_string(),
                header_class: "message-header host-message-header",
                toggle: Some(if expanded { Collapse::Expanded } else { Collapse::Collapsed }),
            }
        }
        "task" => MessageView {
            source: message.source.clone(),
            header: message
                .content
                .role
                .clone()
                .unwrap_or_else(|| DEFAULT_TASK_LABEL.to_string()),
            body_html,
            panel_class: "message agent".to_string(),
            header_class: "message-header",
            toggle: Some(Collapse::Collapsed),
        },
        other => MessageView {
            source: message.source.clone(),
            header: if other == "agent" {
                HOST_AGENT_LABEL.to_string()
            } else {
                other.to_string()
            },
            body_html,
            panel_class: format!(
                "message {} {}",
                other,
                message.content.role.as_deref().unwrap_or_default()
            )
            .trim_end()
            .to_string(),
            header_class: "message-header",
            toggle: None,
        },
    };
    Some(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::messages::MessageContent;
    use proptest::prelude::*;

    fn message(source: &str, text: Option<&str>, role: Option<&str>) -> ChatMessage {
        ChatMessage {
            source: source.to_string(),
            content: MessageContent {
                text: text.map(str::to_string),
                role: role.map(str::to_string),
            },
        }
    }

    #[test]
    fn sanitize_escapes_markup_and_strips_strikethrough() {
        assert_eq!(sanitize_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(sanitize_text("s\u{0336}t\u{0336}"), "st");
        // Order matters: '&' first so entities are not double-escaped.
        assert_eq!(sanitize_text("&lt;"), "&amp;lt;");
    }

    #[test]
    fn empty_or_missing_text_renders_nothing() {
        assert_eq!(build_message_view(&message("host_agent", None, None)), None);
        assert_eq!(build_message_view(&message("host_agent", Some(""), None)), None);
    }

    #[test]
    fn host_agent_starts_expanded() {
        let view = build_message_view(&message("host_agent", Some("hi"), None)).unwrap();
        assert_eq!(view.header, "Host Agent");
        assert_eq!(view.toggle, Some(Collapse::Expanded));
        assert_eq!(view.toggle.unwrap().icon(), "\u{2212}");
        assert_eq!(view.toggle.unwrap().display(), "block");
    }

    #[test]
    fn host_request_starts_collapsed() {
        let view = build_message_view(&message("host_request", Some("hi"), None)).unwrap();
        assert_eq!(view.header, "Host Request");
        assert_eq!(view.toggle, Some(Collapse::Collapsed));
        assert_eq!(view.toggle.unwrap().icon(), "+");
        assert_eq!(view.toggle.unwrap().display(), "none");
    }

    #[test]
    fn task_header_comes_from_role() {
        let view = build_message_view(&message("task", Some("done"), Some("map-agent"))).unwrap();
        assert_eq!(view.header, "map-agent");
        assert_eq!(view.toggle, Some(Collapse::Collapsed));

        let view = build_message_view(&message("task", Some("done"), None)).unwrap();
        assert_eq!(view.header, "Agent");
    }

    #[test]
    fn plain_sources_are_not_collapsible() {
        let view = build_message_view(&message("system", Some("note"), Some("system"))).unwrap();
        assert_eq!(view.header, "system");
        assert_eq!(view.toggle, None);
        assert_eq!(view.panel_class, "message system system");

        // "agent" is relabeled to the host agent heading.
        let view = build_message_view(&message("agent", Some("note"), None)).unwrap();
        assert_eq!(view.header, "Host Agent");
        assert_eq!(view.panel_class, "message agent");
    }

    #[test]
    fn body_is_sanitized() {
        let view = build_message_view(&message("task", Some("<b>&</b>"), None)).unwrap();
        assert_eq!(view.body_html, "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    /// Reverse the entity escapes so the sanitizer round-trips.
    fn decode_entities(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    proptest! {
        #[test]
        fn sanitized_text_has_no_raw_markup(input in "\\PC*") {
            let out = sanitize_text(&input);
            prop_assert!(!out.contains('<'));
            prop_assert!(!out.contains('>'));
            prop_assert!(!out.contains('\u{0336}'), "output retained a combining strikethrough char");
        }

        #[test]
        fn sanitize_is_lossless_up_to_strikethrough(input in "\\PC*") {
            let expected: String = input.chars().filter(|&c| c != '\u{0336}').collect();
            prop_assert_eq!(decode_entities(&sanitize_text(&input)), expected);
        }
    }
}

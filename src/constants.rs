// Defaults for the chat UI - these are the single source of truth

/// Delay before a dropped connection is retried.  Fixed, no backoff growth
/// and no retry cap; the reconnect loop runs for the page lifetime.
pub const RECONNECT_DELAY_MS: u32 = 5000;

// Element ids the widgets are wired to.  The shell in `ui::setup` creates
// them when the host page has not.
pub const MESSAGES_ID: &str = "messages";
pub const MESSAGE_FORM_ID: &str = "messageForm";
pub const MESSAGE_INPUT_ID: &str = "message";
pub const SEND_BUTTON_ID: &str = "sendButton";
pub const SIDEBAR_ID: &str = "sidebar";
pub const SIDEBAR_TOGGLE_ID: &str = "sidebar-toggle";
pub const AGENT_LIST_ID: &str = "agent-list";

// Header labels per message source
pub const HOST_AGENT_LABEL: &str = "Host Agent";
pub const HOST_REQUEST_LABEL: &str = "Host Request";
pub const DEFAULT_TASK_LABEL: &str = "Agent";

pub const PLACEHOLDER_TEXT: &str = "How can I help you today?";

use serde::{Serialize, Deserialize};

// API models matching the backend agent-registry schema.
// These are used for REST requests and responses.

/// One registered agent endpoint as listed by `GET /agents`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentInfo {
    pub name: String,
    pub url: String,
}

/// Response body of `GET /agents`.
#[derive(Clone, Debug, Deserialize)]
pub struct AgentListResponse {
    pub agents: Vec<AgentInfo>,
}

/// Outcome of `POST /agents` and `DELETE /agents`.
///
/// The backend signals structured failure with `fail: false` plus an error
/// string instead of a non-2xx status, so both flags travel in the body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AgentMutationResponse {
    #[serde(default)]
    pub success: bool,
    pub fail: Option<bool>,
    pub error: Option<String>,
    pub agents: Option<Vec<AgentInfo>>,
}

/// One tool advertised on an agent card.
#[derive(Clone, Debug, Deserialize)]
pub struct AgentTool {
    pub name: String,
    pub description: Option<String>,
}

/// Card returned by `POST /agent_card_preview`.  Every field is optional:
/// the backend forwards whatever the remote agent advertises.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AgentCard {
    pub success: Option<bool>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tools: Vec<AgentTool>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

//! Guild data exchanged with the remote API.

use serde::{Deserialize, Serialize};

/// A guild returned by the create call. Only the id matters for bucketing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Guild {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// Template descriptor sent along with a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildTemplate {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub channels: Vec<serde_json::Value>,
    pub system_channel_id: Option<String>,
}

impl GuildTemplate {
    /// The blank "Create My Own" template: no channels, no system channel.
    pub fn create_my_own() -> Self {
        Self {
            id: "CREATE".to_string(),
            label: "Create My Own".to_string(),
            channels: Vec::new(),
            system_channel_id: None,
        }
    }
}

impl Default for GuildTemplate {
    fn default() -> Self {
        Self::create_my_own()
    }
}

/// Everything needed for one create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGuildRequest {
    pub name: String,
    /// Parent template / icon reference; always unset for throwaway guilds.
    pub icon: Option<String>,
    pub template: GuildTemplate,
    #[serde(default)]
    pub community: bool,
    #[serde(default)]
    pub student_hub: bool,
}

impl CreateGuildRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            template: GuildTemplate::create_my_own(),
            community: false,
            student_hub: false,
        }
    }
}

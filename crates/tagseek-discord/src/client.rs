//! Discord REST client for guild create/delete.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use tagseek_core::models::{CreateGuildRequest, Guild};
use tagseek_core::{GuildApi, GuildError};

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the Discord guild endpoints.
pub struct DiscordClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) token: String,
}

impl DiscordClient {
    /// Create a new client. `token` is sent verbatim as the `Authorization`
    /// header, so bot tokens need their `Bot ` prefix.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a guild from the request's template and return it.
    pub async fn create_guild(&self, request: &CreateGuildRequest) -> Result<Guild> {
        let url = format!("{}/guilds", self.base_url);
        let payload = build_create_payload(request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.token)
            .json(&payload)
            .send()
            .await
            .context("Failed to create guild")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        parse_create_response(status, &body)
    }

    /// Delete a guild. A 404 means it is already gone and counts as success.
    pub async fn delete_guild(&self, guild_id: &str) -> Result<()> {
        let url = format!("{}/guilds/{}", self.base_url, guild_id);

        let response = self
            .client
            .delete(&url)
            .header("Authorization", &self.token)
            .send()
            .await
            .context("Failed to delete guild")?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Guild {} already deleted", guild_id);
            return Ok(());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GuildError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(())
    }
}

impl GuildApi for DiscordClient {
    async fn create_guild(&self, request: &CreateGuildRequest) -> Result<Guild> {
        DiscordClient::create_guild(self, request).await
    }

    async fn delete_guild(&self, guild_id: &str) -> Result<()> {
        DiscordClient::delete_guild(self, guild_id).await
    }
}

/// JSON body for `POST /guilds`.
///
/// The "CREATE" template is the blank guild, so its channel list and system
/// channel go straight into the body.
pub(crate) fn build_create_payload(request: &CreateGuildRequest) -> Value {
    let mut payload = json!({
        "name": request.name,
        "icon": request.icon,
        "channels": request.template.channels,
        "system_channel_id": request.template.system_channel_id,
    });
    if request.template.id != "CREATE" {
        payload["guild_template_code"] = Value::String(request.template.id.clone());
    }
    payload
}

pub(crate) fn parse_create_response(status: StatusCode, body: &str) -> Result<Guild> {
    if !status.is_success() {
        return Err(GuildError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        }
        .into());
    }

    let guild: Guild = serde_json::from_str(body).context("Failed to parse guild response")?;
    if guild.id.trim().is_empty() {
        return Err(GuildError::MissingId.into());
    }
    Ok(guild)
}

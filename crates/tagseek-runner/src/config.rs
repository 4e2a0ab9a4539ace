//! Runner configuration from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tagseek_core::{
    parse_ranges, BackoffConfig, ConfigError, CreateGuildRequest, ExperimentConfig,
};
use tagseek_discord::client::DEFAULT_API_BASE;

pub const TOKEN_VAR: &str = "TAGSEEK_DISCORD_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// Full `Authorization` header value.
    pub api_token: Option<String>,
    pub guild_name: String,
    pub experiment: ExperimentConfig,
    pub backoff: BackoffConfig,
    pub stop_on_found: bool,
    /// Stop after this many cycles; unlimited when unset.
    pub max_attempts: Option<u64>,
    /// Fixed seed for reproducible jitter.
    pub jitter_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            api_token: None,
            guild_name: "Tag server".to_string(),
            experiment: ExperimentConfig::default(),
            backoff: BackoffConfig::default(),
            stop_on_found: true,
            max_attempts: None,
            jitter_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(url) = get("TAGSEEK_API_URL") {
            config.api_base_url = url;
        }
        config.api_token = get(TOKEN_VAR);
        if let Some(name) = get("TAGSEEK_GUILD_NAME") {
            config.guild_name = name;
        }
        if let Some(seed) = get("TAGSEEK_EXPERIMENT_SEED") {
            config.experiment.seed = seed;
        }
        if let Some(ranges) = get("TAGSEEK_EXPERIMENT_RANGES") {
            config.experiment.ranges = parse_ranges(&ranges)?;
        }
        if let Some(ms) = parse_var::<u64>(&get, "TAGSEEK_BASE_INTERVAL_MS")? {
            config.backoff.base_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&get, "TAGSEEK_DELETE_DELAY_MS")? {
            config.backoff.delete_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&get, "TAGSEEK_MAX_JITTER_MS")? {
            config.backoff.max_additional_jitter = Duration::from_millis(ms);
        }
        if let Some(multiplier) = parse_var::<f64>(&get, "TAGSEEK_MAX_BACKOFF_MULTIPLIER")? {
            config.backoff.max_backoff_multiplier = multiplier;
        }
        if let Some(stop) = parse_var::<bool>(&get, "TAGSEEK_STOP_ON_FOUND")? {
            config.stop_on_found = stop;
        }
        config.max_attempts = parse_var(&get, "TAGSEEK_MAX_ATTEMPTS")?;
        config.jitter_seed = parse_var(&get, "TAGSEEK_JITTER_SEED")?;

        Ok(config)
    }

    /// Fail fast on anything that would make the loop useless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.api_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => return Err(ConfigError::Missing(TOKEN_VAR)),
        }
        if self.guild_name.trim().is_empty() {
            return Err(ConfigError::Missing("TAGSEEK_GUILD_NAME"));
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::Invalid {
                name: "TAGSEEK_MAX_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }
        ExperimentConfig::new(self.experiment.seed.clone(), self.experiment.ranges.clone())?;
        self.backoff.validate()
    }

    pub fn create_request(&self) -> CreateGuildRequest {
        CreateGuildRequest::new(self.guild_name.clone())
    }
}

fn parse_var<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match get(key) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| ConfigError::Invalid {
            name: key,
            reason: format!("cannot parse {:?}", raw),
        }),
    }
}

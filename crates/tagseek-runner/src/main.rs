//! tagseek - create guilds until one lands in the experiment bucket

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tagseek_core::{BackoffPolicy, BucketRange, StdJitter, StopHandle};
use tagseek_discord::DiscordClient;
use tagseek_runner::{run_guild_loop, Config, Lifecycle, TokioSleeper};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Discord API base URL (overrides TAGSEEK_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Authorization header value (overrides TAGSEEK_DISCORD_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Display name for created guilds
    #[arg(long)]
    guild_name: Option<String>,

    /// Experiment seed prefixed to every guild id before hashing
    #[arg(long)]
    seed: Option<String>,

    /// Bucket ranges, e.g. --range 10-20 --range 60-100
    #[arg(long = "range")]
    ranges: Vec<BucketRange>,

    /// Keep hunting after a match instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Stop after this many attempts
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Seed for reproducible jitter
    #[arg(long)]
    jitter_seed: Option<u64>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(url) = self.api_url {
            config.api_base_url = url;
        }
        if let Some(token) = self.token {
            config.api_token = Some(token);
        }
        if let Some(name) = self.guild_name {
            config.guild_name = name;
        }
        if let Some(seed) = self.seed {
            config.experiment.seed = seed;
        }
        if !self.ranges.is_empty() {
            config.experiment.ranges = self.ranges;
        }
        if self.keep_going {
            config.stop_on_found = false;
        }
        if self.max_attempts.is_some() {
            config.max_attempts = self.max_attempts;
        }
        if self.jitter_seed.is_some() {
            config.jitter_seed = self.jitter_seed;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(log_filter(EnvFilter::from_default_env())?)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    args.apply(&mut config);
    if let Err(err) = config.validate() {
        tracing::error!("Invalid configuration: {}", err);
        return Err(err.into());
    }

    let token = config.api_token.clone().unwrap_or_default();
    let client = DiscordClient::new(config.api_base_url.clone(), token)?;

    let jitter = match config.jitter_seed {
        Some(seed) => StdJitter::seeded(seed),
        None => StdJitter::from_os_rng(),
    };
    let mut lifecycle = Lifecycle::new(
        client,
        TokioSleeper,
        BackoffPolicy::new(config.backoff.clone(), jitter),
        config.experiment.clone(),
        config.create_request(),
        config.stop_on_found,
    );

    let stop = StopHandle::new();
    tokio::spawn(watch_ctrl_c(stop.clone()));

    let summary = run_guild_loop(&mut lifecycle, &stop, config.max_attempts).await;
    for guild_id in &summary.matched {
        tracing::info!("Experiment guild found: {}", guild_id);
    }
    tracing::info!("Run summary: {}", serde_json::to_string(&summary)?);

    Ok(())
}

/// Status lines from the binary and the loop library are on unless RUST_LOG
/// says otherwise.
fn log_filter(filter: EnvFilter) -> Result<EnvFilter> {
    Ok(filter
        .add_directive("tagseek=info".parse()?)
        .add_directive("tagseek_runner=info".parse()?))
}

/// First Ctrl-C stops the loop at its next check point; a second one exits.
async fn watch_ctrl_c(stop: StopHandle) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    tracing::info!("Stop requested, finishing the current step (Ctrl-C again to exit now)");
    stop.stop();

    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("Exiting without waiting for the current step");
        std::process::exit(130);
    }
}

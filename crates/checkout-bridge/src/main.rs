//! checkout-bridge replay tool: entry point.
//!
//! Replays a recorded stream of bridge messages through one checkout session
//! and reports how the session ended.  Useful for reproducing a buyer's
//! session from captured messages, and for checking a recovery configuration
//! against real traffic without a device.
//!
//! # Usage
//!
//! ```text
//! checkout-bridge --url <URL> [OPTIONS]
//!
//! Options:
//!   --url <URL>                    Checkout URL being presented
//!   --input <FILE>                 JSON-line envelopes, `-` for stdin [default: -]
//!   --config <FILE>                Config file [default: checkout-bridge.toml]
//!   --max-recovery-attempts <N>    Override the per-session reload limit
//!   --never-recover                Treat every error as terminal
//! ```
//!
//! Each input line is `{"name": "<channel>", "body": <string or JSON>}`.
//! Malformed lines are logged and skipped.  `demos/recovering_session.jsonl`
//! is a small recorded session to try it on.
//!
//! # Environment variable overrides
//!
//! | Variable                 | Description              |
//! |--------------------------|--------------------------|
//! | `CHECKOUT_URL`           | Checkout URL             |
//! | `CHECKOUT_BRIDGE_CONFIG` | Config file path         |
//! | `RUST_LOG`               | Log filter (wins over `[logging] level`) |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use checkout_bridge::application::session::CheckoutSession;
use checkout_bridge::application::settings::{Settings, SettingsStore};
use checkout_bridge::infrastructure::config_store::{load_config, DEFAULT_CONFIG_FILE};
use checkout_bridge::infrastructure::envelope::{EnvelopeError, EnvelopeReader};
use checkout_bridge::infrastructure::session_worker::spawn_session;
use checkout_bridge::infrastructure::tracing_host::{TracingEventProcessor, TracingSurface};
use checkout_core::NeverRecover;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Replays checkout bridge messages through a session.
#[derive(Debug, Parser)]
#[command(
    name = "checkout-bridge",
    about = "Replays embedded checkout bridge messages through a checkout session",
    version
)]
struct Cli {
    /// Checkout URL being presented.  Reloads go back to this URL.
    #[arg(long, env = "CHECKOUT_URL")]
    url: String,

    /// File of JSON-line envelopes, or `-` for stdin.
    #[arg(long, default_value = "-")]
    input: String,

    /// Path of the TOML config file.  A missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "CHECKOUT_BRIDGE_CONFIG")]
    config: PathBuf,

    /// Overrides `[session] max_recovery_attempts`.
    #[arg(long)]
    max_recovery_attempts: Option<u32>,

    /// Never reload after an error, whatever the config says.
    #[arg(long)]
    never_recover: bool,
}

impl Cli {
    /// Applies command-line overrides on top of settings built from the config file.
    fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(max) = self.max_recovery_attempts {
            settings = settings.with_max_recovery_attempts(max);
        }
        if self.never_recover {
            settings = settings.with_error_recovery(Arc::new(NeverRecover));
        }
        settings
    }
}

async fn open_input(input: &str) -> anyhow::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let file = tokio::fs::File::open(input)
        .await
        .with_context(|| format!("failed to open input file '{input}'"))?;
    Ok(Box::new(BufReader::new(file)))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The config supplies the default log level, so it is read before logging starts.
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let store = SettingsStore::global();
    store.replace(cli.apply_overrides(Settings::from_config(&config)));
    let settings = store.snapshot();
    info!(?settings, "checkout-bridge replay starting");

    let processor = Arc::new(TracingEventProcessor::new());
    let mut session = CheckoutSession::new(processor.clone(), settings);
    session
        .present(cli.url.clone())
        .context("failed to start checkout session")?;
    let handle = spawn_session(session, Arc::new(TracingSurface));

    let mut envelopes = EnvelopeReader::new(open_input(&cli.input).await?);
    loop {
        match envelopes.next_message().await {
            Ok(Some(message)) => {
                if handle.send(message).await.is_err() {
                    info!("session ended; ignoring remaining input");
                    break;
                }
            }
            Ok(None) => break,
            Err(EnvelopeError::Malformed { line, source }) => {
                warn!(line, error = %source, "skipping malformed envelope");
            }
            Err(e) => return Err(e).context("failed to read input"),
        }
    }

    let report = handle.finish().await?;
    let counts = processor.counts();
    println!(
        "session {} finished: state={} recoveries={} routed={} completed={} failed={} pixels={} lifecycle={} dropped={}",
        report.session_id,
        report.final_state,
        report.recovery_attempts,
        report.outcomes.routed(),
        counts.completed,
        counts.failed,
        counts.pixel_events,
        counts.lifecycle_events,
        counts.decoding_failures,
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

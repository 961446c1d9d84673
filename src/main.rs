//! Aphator CLI: interactive customer assistant, or an HTTP chat endpoint
//! with `--serve`.
//!
//! Thin wrapper over the `aphator` library crate.

mod server;

use std::io::{self, BufRead, Write};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use aphator::engagement::DEFAULT_SKIP_PROBABILITY;
use aphator::{DEFAULT_MAX_HISTORY, Engine, EngineConfig, ReferenceData, SessionConfig};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

use crate::server::ServerConfig;

/// Aphator Tech customer assistant: answers questions about the company's
/// products and services from a keyword, similarity and context pipeline.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Company reference data (JSON). Missing or invalid files fall back to
    /// a built-in description.
    #[arg(long, env = "APHATOR_DATA", default_value = "data/company_data.json")]
    data: PathBuf,

    /// PRNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Exchanges remembered per conversation.
    #[arg(long, default_value_t = DEFAULT_MAX_HISTORY)]
    max_history: usize,

    /// Probability of leaving a reply without a follow-up question.
    #[arg(long, default_value_t = DEFAULT_SKIP_PROBABILITY)]
    engagement_skip: f64,

    /// Serve the HTTP chat endpoint instead of the interactive prompt.
    #[arg(long)]
    serve: bool,

    /// Address to bind with `--serve`.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to bind with `--serve`.
    #[arg(long, env = "APHATOR_PORT", default_value_t = 5000)]
    port: u16,

    /// Seconds a chat session may sit idle before it is forgotten.
    #[arg(long, default_value_t = 1800)]
    session_idle_secs: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!(?args, "parsed arguments");

    let data = ReferenceData::load_or_default(&args.data);
    let engine = Engine::new(
        &data,
        EngineConfig {
            max_history: args.max_history,
            engagement_skip_probability: args.engagement_skip,
            ..EngineConfig::default()
        },
    );

    if args.serve {
        let config = ServerConfig {
            host: args.host,
            port: args.port,
            sessions: SessionConfig {
                idle_timeout: Duration::from_secs(args.session_idle_secs),
                seed: args.seed,
                ..SessionConfig::default()
            },
        };
        let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
        return runtime.block_on(server::run_server(Arc::new(engine), config));
    }

    repl(&engine, args.seed)
}

/// One conversation over stdin/stdout until `quit`, `exit` or end of input.
fn repl(engine: &Engine, seed: Option<u64>) -> anyhow::Result<()> {
    let rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let mut session = engine.new_session(rng);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    writeln!(stdout, "Aphator: {}", engine.greet(&mut session))?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = engine.respond(&mut session, trimmed);
        writeln!(stdout, "Aphator: {reply}")?;
        stdout.flush()?;
    }

    Ok(())
}

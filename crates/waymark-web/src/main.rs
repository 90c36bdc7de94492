//! Roadmap API server.
//!
//! # Usage
//!
//! ```bash
//! OPENROUTER_KEY=sk-... cargo run -p waymark-web
//! cargo run -p waymark-web -- --port 8080 --static-dir ./web/out
//! cargo run -p waymark-web -- --local-only --no-delay
//! ```
//!
//! ```bash
//! curl -X POST localhost:3001/api/roadmap -H 'content-type: application/json' \
//!   -d '{"userType":"Freelancer","focusArea":"Content & marketing","aiLevel":"New to AI","priority":"Save time"}'
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use waymark_rs::prelude::*;
use waymark_web::{WebConfig, spawn_web};

/// Roadmap API server.
#[derive(Parser)]
#[command(about = "Serve personalized AI roadmaps over HTTP")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Serve a static front-end build from this directory.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Model to request (overrides WAYMARK_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Generation timeout in seconds (overrides WAYMARK_TIMEOUT_SECS).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// JSON prompt template to use instead of the built-in one.
    #[arg(long)]
    prompt_config: Option<PathBuf>,

    /// Never call the generative backend.
    #[arg(long)]
    local_only: bool,

    /// Answer 503 instead of serving a local blueprint.
    #[arg(long)]
    no_fallback: bool,

    /// Skip the pause before serving a local blueprint.
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = RoadmapConfig::from_env();
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(path) = &args.prompt_config {
        config.prompt = PromptTemplate::from_file(path)?;
    }
    if args.no_delay {
        config.simulated_delay = Duration::ZERO;
    }
    config.local_fallback = !args.no_fallback;

    let credential = if args.local_only {
        Credential::none()
    } else {
        Credential::from_env()
    };
    let resolver = config.build_resolver(&credential)?;
    if resolver.can_generate() {
        info!("generating roadmaps with {}", config.model);
    } else {
        info!("no usable API key; serving local blueprints");
    }

    let web_config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        static_dir: args.static_dir,
    };
    let addr = spawn_web(Arc::new(resolver), web_config)
        .await
        .map_err(|e| format!("failed to bind port {}: {e}", args.port))?;
    println!("Roadmap API: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown: {e}"))?;
    Ok(())
}

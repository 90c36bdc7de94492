//! Command-line roadmap generator.
//!
//! Answers the four questionnaire questions from flags, resolves a roadmap
//! (generated when `WAYMARK_API_KEY` or `OPENROUTER_KEY` holds a usable key,
//! otherwise the local blueprint) and prints or exports it.
//!
//! # Examples
//!
//! ```sh
//! waymark --user-type Freelancer --focus-area "Content & marketing" \
//!     --ai-level "New to AI" --priority "Save time"
//!
//! # Preview depth only, saved as AI_Roadmap_<date>.md
//! waymark ... --tier preview --export
//!
//! # Show the questionnaire vocabulary
//! waymark --list-options
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use waymark_rs::prelude::*;
use waymark_rs::questionnaire::unrecognized_answers;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Personalized AI adoption roadmap generator.
#[derive(Parser)]
#[command(name = "waymark", version)]
struct Cli {
    /// Which best describes you?
    #[arg(long, required_unless_present = "list_options")]
    user_type: Option<String>,

    /// What do you want help with right now?
    #[arg(long, required_unless_present = "list_options")]
    focus_area: Option<String>,

    /// How comfortable are you with AI tools today?
    #[arg(long, required_unless_present = "list_options")]
    ai_level: Option<String>,

    /// What matters most for you this month?
    #[arg(long, required_unless_present = "list_options")]
    priority: Option<String>,

    /// Depth to render.
    #[arg(long, value_enum, default_value_t = RenderTier::Both)]
    tier: RenderTier,

    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Write the roadmap to this file instead of stdout.
    #[arg(long, conflicts_with = "export")]
    out: Option<PathBuf>,

    /// Write the roadmap to AI_Roadmap_<date>.<ext> in the current directory.
    #[arg(long)]
    export: bool,

    /// Never call the generative backend.
    #[arg(long)]
    local_only: bool,

    /// Fail instead of serving a local blueprint.
    #[arg(long)]
    no_fallback: bool,

    /// Skip the pause before serving a local blueprint.
    #[arg(long)]
    no_delay: bool,

    /// Model to request (overrides WAYMARK_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Generation timeout in seconds (overrides WAYMARK_TIMEOUT_SECS).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// JSON prompt template to use instead of the built-in one.
    #[arg(long)]
    prompt_config: Option<PathBuf>,

    /// Print the questionnaire options and exit.
    #[arg(long)]
    list_options: bool,

    /// Log resolution decisions to stderr.
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_options() {
    for question in &QUESTIONS {
        println!("{} (--{}):", question.text, kebab(question.id));
        for option in question.options {
            println!("  - {option}");
        }
    }
}

fn kebab(id: &str) -> String {
    let mut out = String::new();
    for c in id.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn build_config(cli: &Cli) -> Result<RoadmapConfig, String> {
    let mut config = RoadmapConfig::from_env();
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    if cli.no_delay {
        config.simulated_delay = Duration::ZERO;
    }
    if cli.no_fallback {
        config.local_fallback = false;
    }
    if let Some(path) = &cli.prompt_config {
        config.prompt = PromptTemplate::from_file(path)?;
    }
    Ok(config)
}

fn render(resolution: &Resolution, responses: &UserResponses, cli: &Cli) -> Result<String, String> {
    match cli.format {
        OutputFormat::Markdown => Ok(render_markdown(&resolution.roadmap, responses, cli.tier)),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "profile": responses,
                "source": resolution.source,
                "roadmap": resolution.roadmap,
            });
            serde_json::to_string_pretty(&doc)
                .map(|s| s + "\n")
                .map_err(|e| format!("failed to serialize roadmap: {e}"))
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let responses = UserResponses::new(
        cli.user_type.clone().unwrap_or_default(),
        cli.focus_area.clone().unwrap_or_default(),
        cli.ai_level.clone().unwrap_or_default(),
        cli.priority.clone().unwrap_or_default(),
    );
    responses.validate().map_err(|e| e.to_string())?;
    for (field, value) in unrecognized_answers(&responses) {
        warn!("'{value}' is not a listed option for {field}");
    }

    let config = build_config(&cli)?;
    let credential = if cli.local_only {
        Credential::none()
    } else {
        Credential::from_env()
    };
    let resolver = config.build_resolver(&credential)?;

    let resolution = resolver
        .generate(&responses)
        .await
        .map_err(|e| e.to_string())?;
    let text = render(&resolution, &responses, &cli)?;

    let target = match (&cli.out, cli.export) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(format!(
            "AI_Roadmap_{}.{}",
            chrono::Local::now().format("%Y-%m-%d"),
            cli.format.extension()
        ))),
        (None, false) => None,
    };

    match target {
        Some(path) => {
            std::fs::write(&path, text)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("Roadmap written to {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_options {
        print_options();
        return ExitCode::SUCCESS;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

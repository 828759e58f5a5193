use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use vxa_agents::AnalystAgent;
use vxa_core::ToolRegistry;
use vxa_providers::OpenAIProvider;
use vxa_tools::create_topic_tools;
use vxa_v2ex::V2exClient;

mod config;
mod runner;

use config::Config;

const DEFAULT_MODEL: &str = "gpt-5.2";

/// Log level for tracing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Most verbose: all tracing including LLM streaming chunks
    Trace,
    /// Verbose: API requests/responses, tool execution details
    Debug,
    /// Standard: high-level flow, fetch progress
    Info,
    /// Quiet: only warnings and errors
    Warn,
    /// Minimal: only errors
    Error,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser)]
#[command(name = "vxa")]
#[command(version, about = "Analyze a V2EX topic with an LLM analyst agent", long_about = None)]
pub struct Cli {
    /// V2EX topic id to analyze
    #[arg(long)]
    pub topic_id: u64,

    /// Max reply pages to fetch
    #[arg(long, default_value_t = 1)]
    pub max_pages: u32,

    /// Model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Base URL for the OpenAI-compatible API (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for the analysis markdown file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Disable streaming output
    #[arg(long)]
    pub no_stream: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Enable debug logging (shorthand for --log-level debug)
    #[arg(short, long)]
    pub debug: bool,
}

/// Resolved settings from CLI args, config file, and environment
struct ResolvedSettings {
    v2ex_token: String,
    v2ex_api_base: Option<String>,
    openai_api_key: String,
    openai_base_url: Option<String>,
    model: String,
    output_dir: PathBuf,
}

/// Resolution order: CLI > config file > environment > default.
fn resolve_settings(cli: &Cli, config: &Config) -> Result<ResolvedSettings> {
    let v2ex_token = config
        .v2ex
        .token
        .clone()
        .or_else(|| std::env::var("V2EX_TOKEN").ok())
        .ok_or_else(|| {
            vxa_core::Error::config(
                "Missing V2EX token. Set V2EX_TOKEN or [v2ex] token in ~/.config/vxa/config.toml",
            )
        })?;

    let v2ex_api_base = config
        .v2ex
        .api_base
        .clone()
        .or_else(|| std::env::var("V2EX_API_BASE").ok());

    let openai_base_url = cli
        .base_url
        .clone()
        .or_else(|| config.openai.base_url.clone())
        .or_else(|| std::env::var("OPENAI_BASE_URL").ok());

    // A custom base URL (local server) may not need a real key.
    let openai_api_key = cli
        .base_url
        .as_ref()
        .map(|_| "none".to_string())
        .or_else(|| config.openai.api_key.clone())
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .ok_or_else(|| {
            vxa_core::Error::config(
                "Missing OpenAI API key. Set OPENAI_API_KEY or [openai] api_key in ~/.config/vxa/config.toml",
            )
        })?;

    let model = cli
        .model
        .clone()
        .or_else(|| config.openai.model.clone())
        .or_else(|| std::env::var("OPENAI_MODEL").ok())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| config.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from("analysis_outputs"));

    Ok(ResolvedSettings {
        v2ex_token,
        v2ex_api_base,
        openai_api_key,
        openai_base_url,
        model,
        output_dir,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Resolve log level: --debug overrides --log-level
    let log_level = if cli.debug {
        LogLevel::Debug
    } else {
        cli.log_level
    };

    // Logs go to stderr; stdout carries the streamed analysis.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.as_filter()))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let settings = resolve_settings(&cli, &config)?;

    let mut client = V2exClient::new(&settings.v2ex_token);
    if let Some(api_base) = &settings.v2ex_api_base {
        client = client.with_api_base(api_base);
    }

    let mut registry = ToolRegistry::new();
    for tool in create_topic_tools(client) {
        registry.register(tool);
    }

    let mut provider = OpenAIProvider::new(&settings.openai_api_key)
        .with_default_model(&settings.model);
    if let Some(base_url) = &settings.openai_base_url {
        provider = provider.with_base_url(base_url);
    }

    let agent = AnalystAgent::new();
    let options = runner::RunOptions {
        model: Some(settings.model.clone()),
        stream_output: !cli.no_stream,
    };

    let analysis = runner::run_analysis(
        &provider,
        &registry,
        &agent,
        cli.topic_id,
        cli.max_pages,
        &options,
    )
    .await?;

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            settings.output_dir.display()
        )
    })?;
    let output_path = settings
        .output_dir
        .join(format!("analysis_{}.md", cli.topic_id));
    std::fs::write(
        &output_path,
        format!("# V2EX Analysis {}\n\n{}\n", cli.topic_id, analysis.trim()),
    )
    .with_context(|| format!("Failed to write analysis: {}", output_path.display()))?;

    println!("Saved analysis to {}", output_path.display());
    Ok(())
}

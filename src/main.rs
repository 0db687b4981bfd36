// TalkSafe - culturally-aware support conversation engine
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use talksafe::catalog::load_catalog;
use talksafe::cli::{render_reply, Repl};
use talksafe::config::{load_config, Config};
use talksafe::errors::{catalog_invalid_error, config_parse_error, file_not_found_error};
use talksafe::EngineError;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "talksafe")]
#[command(about = "Culturally-aware support chat for students", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: $TALKSAFE_CONFIG or ~/.talksafe/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Response catalog (.toml or .json), overrides the config file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Fixed seed for reproducible replies
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Interactive conversation (default)
    Chat,
    /// Send a single message and print the reply
    Query {
        /// Message text
        text: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a catalog file
    CheckCatalog {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => anyhow::bail!(config_parse_error(&format!("{:#}", e))),
    };
    if let Some(catalog) = args.catalog.clone() {
        config.catalog_path = Some(catalog);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    init_tracing(config.debug_logging);

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(&config),
        Command::Query { text, json } => run_query(&config, &text, json),
        Command::CheckCatalog { path } => run_check_catalog(&path),
    }
}

fn build_engine(config: &Config) -> Result<talksafe::ConversationEngine> {
    if let Some(path) = &config.catalog_path {
        if !path.exists() {
            anyhow::bail!(file_not_found_error(&path.display().to_string(), "Catalog"));
        }
    }
    config.build_engine()
}

fn run_chat(config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    Repl::new(engine).run()
}

fn run_query(config: &Config, text: &str, json: bool) -> Result<()> {
    let mut engine = build_engine(config)?;
    let mut state = engine.new_conversation_state();
    let reply = engine.generate(text, &mut state);

    if json {
        let out = serde_json::to_string_pretty(&reply).context("Failed to serialize reply")?;
        println!("{}", out);
    } else {
        println!("{}", render_reply(&reply));
    }
    Ok(())
}

fn run_check_catalog(path: &Path) -> Result<()> {
    let display = path.display().to_string();
    if !path.exists() {
        anyhow::bail!(file_not_found_error(&display, "Catalog"));
    }

    match load_catalog(Some(path)) {
        Ok(catalog) => {
            println!("✓ {} is valid", display);
            for code in catalog.languages() {
                if let Some(language) = catalog.language(code) {
                    println!(
                        "  {}: {} topics (fallback: {}, crisis: {})",
                        code,
                        language.topics().len(),
                        language.fallback_category(),
                        language
                            .crisis_category()
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| format!("via {}", catalog.default_language())),
                    );
                }
            }
            Ok(())
        }
        Err(e @ (EngineError::Configuration(_) | EngineError::CatalogParse { .. })) => {
            anyhow::bail!(catalog_invalid_error(&display, e))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", display)),
    }
}

/// Initialize tracing on stderr
///
/// Default level is ERROR so log lines stay out of the chat. RUST_LOG
/// overrides; debug_logging forces DEBUG.
fn init_tracing(debug: bool) {
    let env_filter = if debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (rustyline logs through `log`)
    tracing_log::LogTracer::init().ok();
}

//! launchdeck - deployment checklist dashboard with an embedded assistant

mod ask;
mod checklist;
mod config;
mod context;
mod ui;

use anyhow::Context;
use clap::Parser;
use launchdeck_ai::{ModelConfig, providers::google::GeminiService};
use launchdeck_assistant::{AssistantConfig, SessionManager};
use launchdeck_tui::Theme;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::checklist::Plan;
use crate::context::ChecklistContext;

/// launchdeck - track a launch plan and ask an assistant about it
#[derive(Parser, Debug)]
#[command(name = "launchdeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gemini model to use (default: gemini-2.5-flash)
    #[arg(short, long)]
    model: Option<String>,

    /// Load the plan from a JSON file instead of the built-in one
    #[arg(short, long)]
    plan: Option<PathBuf>,

    /// Ask one question about the plan, print the answer and exit
    #[arg(short, long, value_name = "QUESTION")]
    ask: Option<String>,

    /// Use the light color theme
    #[arg(long)]
    light: bool,

    /// Verbose logging (to launchdeck.log in the config directory while the dashboard runs)
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        init_tracing(args.ask.is_none())?;
    }

    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let cfg = config::Config::load();

    let plan = match &args.plan {
        Some(path) => Plan::from_file(path)?,
        None => Plan::embedded()?,
    };

    // CLI takes precedence over config
    let mut model = ModelConfig::with_model(
        args.model
            .or(cfg.model.clone())
            .unwrap_or_else(|| launchdeck_ai::DEFAULT_MODEL.to_string()),
    );
    if let Some(base_url) = &cfg.base_url {
        model = model.with_base_url(base_url);
    }

    // A missing key only disables the assistant: priming fails in the panel
    let api_key = cfg.api_key().unwrap_or_else(|| {
        tracing::warn!("No API key configured; the assistant will be unavailable");
        String::new()
    });
    let service = Arc::new(GeminiService::new(api_key, model));

    let mut assistant_config = AssistantConfig::default().with_reply_timeout(cfg.reply_timeout());
    if let Some(instruction) = cfg
        .system_instruction()
        .context("failed to read system_instruction_file")?
    {
        assistant_config = assistant_config.with_system_instruction(instruction);
    }

    let context = Arc::new(ChecklistContext::new(plan.sections.clone()));
    let manager = SessionManager::new(service, context, assistant_config);

    if let Some(question) = args.ask {
        return ask::run_ask(&manager, &question).await;
    }

    let theme = if args.light {
        Theme::light()
    } else {
        cfg.theme
            .as_deref()
            .and_then(Theme::by_name)
            .unwrap_or_default()
    };

    ui::run_tui(manager, plan, theme).await
}

/// Log to a file while the dashboard owns the terminal, to stderr otherwise
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter("launchdeck=debug,launchdeck_ai=debug,launchdeck_assistant=debug");
    if to_file {
        let dir = config::Config::config_dir();
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::File::create(dir.join("launchdeck.log"))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

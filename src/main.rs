//! # AI Playground
//!
//! Terminal playground for manually trying AI model APIs with your own key.
//! Responses are simulated locally from the embedded model catalog; no real
//! provider call is ever made.
//!
//! ## Features
//! - Interactive terminal UI (TUI) with a streaming chat transcript
//! - Single prompt mode with `-p` or `--prompt`
//! - `--list-models` to print the catalog grouped by provider
//! - API key stored locally, or supplied via `AI_PLAYGROUND_API_KEY`

mod core;
mod tui;

use clap::Parser;
use dotenv::dotenv;

use crate::core::api_key::KeyStore;
use crate::core::app;
use crate::core::catalog::{self, ModelDescriptor};
use crate::core::llm::{CompletionRequest, Simulator};
use crate::core::transcript::{ChatTurn, NewTurn, Transcript};

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version = app::VERSION,
    about = "Terminal playground for trying AI model APIs with your own key"
)]
struct Args {
    /// Send a single prompt then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Provide a prompt to get an immediate simulated response"
    )]
    prompt: Option<String>,

    /// Preselect a model by catalog id (e.g. "qwen/qwen3-32b")
    #[arg(long)]
    model: Option<String>,

    /// Print the model catalog grouped by provider and exit
    #[arg(long)]
    list_models: bool,
}

fn print_catalog() {
    let all: Vec<&ModelDescriptor> = catalog::models().iter().collect();
    for (provider, models) in catalog::grouped(&all) {
        println!("{}", provider);
        for model in models {
            println!("  {:<40} {}", model.id, model.name);
        }
    }
}

/// Resolve the startup model: `--model` when given, else the first catalog entry.
fn resolve_model(arg: Option<&str>) -> ModelDescriptor {
    match arg {
        Some(id) => catalog::find(id).cloned().unwrap_or_else(|| {
            eprintln!("Error: unknown model id '{}' (see --list-models)", id);
            std::process::exit(1);
        }),
        None => catalog::models()[0].clone(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging (warn level by default; use RUST_LOG=debug for verbose)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init()
        .ok();

    let args = Args::parse();

    if args.list_models {
        print_catalog();
        return Ok(());
    }

    let mut key_store = KeyStore::open().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if let Ok(key) = std::env::var("AI_PLAYGROUND_API_KEY") {
        key_store.set_transient(key);
    }

    let model = resolve_model(args.model.as_deref());

    // Handle single prompt mode
    if let Some(prompt) = args.prompt {
        let Some(api_key) = key_store.key() else {
            eprintln!(
                "Error: no API key configured. Set one in the TUI (Alt+K) or via AI_PLAYGROUND_API_KEY."
            );
            std::process::exit(1);
        };
        let mut transcript = Transcript::new();
        transcript.append(NewTurn::user(prompt));
        let turns: Vec<ChatTurn> = transcript.turns().to_vec();
        let simulator = Simulator::new();
        let text = simulator
            .complete(
                CompletionRequest {
                    api_key,
                    model: &model,
                    turns: &turns,
                },
                None,
                None,
            )
            .await?;
        println!("{}", text);
        return Ok(());
    }

    // Default behavior: open the TUI (interactive chat)
    // Spawns a blocking thread to avoid runtime contention
    let join_result: Result<std::io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || tui::run(key_store, model)).await;

    // Handle potential TUI thread failures; surface the actual panic message for debugging
    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(Box::new(std::io::Error::other("TUI thread panicked"))
                as Box<dyn std::error::Error>);
        }
    }

    Ok(())
}

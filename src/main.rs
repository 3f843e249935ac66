//! Prompt Composer CLI
//!
//! Compose prompts with a strategy and send them to a completion endpoint.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prompt_composer::{CompletionClient, Config, PromptComposer, Strategy};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Prompt Composer - strategy-based prompts for completion endpoints
#[derive(Parser)]
#[command(name = "prompt-composer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the composed prompt without sending it
    Compose {
        /// The current prompt fragment
        prompt: String,

        /// Strategy: in-context, chain-of-thought or tree-of-thought (or 1, 2, 3)
        #[arg(short, long, default_value = "in-context")]
        strategy: String,

        /// Prior transcript line (repeatable)
        #[arg(long = "history-line")]
        history: Vec<String>,
    },

    /// Compose a prompt, submit it and print the response
    Ask {
        /// The current prompt fragment
        prompt: String,

        /// Strategy: in-context, chain-of-thought or tree-of-thought (or 1, 2, 3)
        #[arg(short, long, default_value = "chain-of-thought")]
        strategy: String,
    },

    /// Read prompts from stdin, one per line, keeping the transcript between them
    Chat {
        /// Strategy: in-context, chain-of-thought or tree-of-thought (or 1, 2, 3)
        #[arg(short, long, default_value = "in-context")]
        strategy: String,
    },

    /// Test the completion endpoint connection
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compose {
            prompt,
            strategy,
            history,
        } => cmd_compose(prompt, &strategy, history),
        Commands::Ask { prompt, strategy } => cmd_ask(prompt, &strategy).await,
        Commands::Chat { strategy } => cmd_chat(&strategy).await,
        Commands::Test => cmd_test().await,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve a strategy by name or numeric id. Unknown values map to `None`.
fn parse_strategy(value: &str) -> Option<Strategy> {
    match value.trim().parse::<u8>() {
        Ok(id) => Strategy::from_id(id),
        Err(_) => Strategy::from_name(value),
    }
}

fn load_client() -> Result<CompletionClient> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(CompletionClient::new(config.llm))
}

fn cmd_compose(prompt: String, strategy: &str, history: Vec<String>) -> Result<()> {
    // Composing never touches the network, so an unvalidated config is fine.
    let config = Config::load().context("Failed to load configuration")?;
    let client = CompletionClient::new(config.llm);
    let composer =
        PromptComposer::with_history(parse_strategy(strategy), client, history).with_prompt(prompt);

    match composer.compose() {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => anyhow::bail!("No prompt produced: unknown strategy '{}'", strategy),
    }
}

async fn cmd_ask(prompt: String, strategy: &str) -> Result<()> {
    let client = load_client()?;
    let mut composer = PromptComposer::new(parse_strategy(strategy), client);

    match composer.ask(prompt).await.context("Completion request failed")? {
        Some(response) => {
            println!("{}", response);
            Ok(())
        }
        None => anyhow::bail!("No prompt produced: unknown strategy '{}'", strategy),
    }
}

async fn cmd_chat(strategy: &str) -> Result<()> {
    let client = load_client()?;
    let mut composer = PromptComposer::new(parse_strategy(strategy), client);

    if composer.strategy().is_none() {
        anyhow::bail!("No prompt produced: unknown strategy '{}'", strategy);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(response) = composer
            .ask(line)
            .await
            .context("Completion request failed")?
        {
            println!("{}", response);
        }
    }

    eprintln!("Transcript: {} lines", composer.transcript().len());
    Ok(())
}

async fn cmd_test() -> Result<()> {
    println!("Testing completion endpoint connection...\n");

    let config = Config::load().context("Failed to load configuration")?;

    println!("Configuration:");
    println!("  API Base:  {}", config.llm.api_base);
    println!("  Model:     {}", config.llm.model);
    println!(
        "  API Key:   {}...",
        config.llm.api_key.chars().take(8).collect::<String>()
    );
    println!();

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Ok(());
    }

    let client = CompletionClient::new(config.llm);

    println!("Sending test request...");
    match client.test_connection().await {
        Ok(()) => println!("Connection successful!"),
        Err(e) => println!("Connection failed: {}", e),
    }

    Ok(())
}

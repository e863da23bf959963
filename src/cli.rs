//! Command-line interface definition and dispatch for gist.
//!
//! Uses [`clap`] for argument parsing with derive macros. Each subcommand is
//! routed to its handler — `ask` runs the retrieve-then-summarize workflow,
//! `store` inspects the intermediate store, `config` shows configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::Config;
use crate::orchestrator::Workflow;
use crate::output::ConsoleProgress;
use crate::provider::{self, Provider};
use crate::store::Store;
use crate::tools::ToolRegistry;

/// Top-level CLI structure for gist.
///
/// Parsed from command-line arguments via [`clap::Parser`]. Contains a single
/// required subcommand that determines which action gist performs.
#[derive(Parser)]
#[command(name = "gist", about = "A retrieve-then-summarize research agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the gist CLI.
///
/// Each variant maps to a top-level action. The `///` doc comments on variants
/// double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Research a request and print a summary
    Ask {
        /// What to research and summarize
        prompt: Vec<String>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
        /// Provider to use (anthropic, openai, openrouter, ollama)
        #[arg(short, long)]
        provider: Option<String>,
        /// Maximum search calls for this run (overrides config)
        #[arg(long)]
        max_searches: Option<u32>,
        /// Intermediate store file for this run (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Inspect the intermediate store
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `store` command.
#[derive(Subcommand)]
pub enum StoreAction {
    /// Show items retrieved by the most recent run
    Show,
    /// Clear the store
    Clear,
}

/// Subcommands for the `config` command.
///
/// Controls reading gist's TOML configuration file stored at the XDG
/// config path (`~/.config/gist/config.toml`).
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current config
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ask {
            prompt,
            model,
            provider: provider_name,
            max_searches,
            store,
        } => {
            let prompt = prompt.join(" ");
            if prompt.is_empty() {
                anyhow::bail!("No prompt provided. Usage: gist ask \"what to summarize\"");
            }

            let config = Config::load()?;
            let selection =
                provider::resolve_model(provider_name.as_deref(), model.as_deref(), &config)?;

            println!(
                "{} [model: {}]",
                "gist".bold().cyan(),
                selection.model.yellow(),
            );
            println!();
            println!("{} {}", ">".green().bold(), prompt);
            println!();

            let llm = Provider::from_config(&config, &selection)?;
            let tools = ToolRegistry::with_builtins(&config)?;
            let store = Store::at(match store {
                Some(path) => path,
                None => config.store_path()?,
            });
            let max_calls = max_searches.unwrap_or_else(|| config.max_tool_calls());

            let mut progress = ConsoleProgress;
            let workflow = Workflow::new(&llm, &tools, store, max_calls, &mut progress);
            let answer = workflow.run(&prompt).await?;

            println!();
            println!("{}", answer);
            Ok(())
        }
        Commands::Store { action } => {
            let config = Config::load()?;
            let store = Store::at(config.store_path()?);
            match action {
                StoreAction::Show => {
                    println!("{} {}", "Store path:".bold(), store.path().display());
                    println!();
                    let items = store.read_all()?;
                    if items.is_empty() {
                        println!("{}", "store is empty.".dimmed());
                    } else {
                        for (i, item) in items.iter().enumerate() {
                            println!(
                                "{} {}",
                                format!("[{}]", i + 1).bold().cyan(),
                                item.title.bold()
                            );
                            println!("{}", item.content);
                            println!();
                        }
                    }
                }
                StoreAction::Clear => {
                    store.reset()?;
                    println!("{}", "store cleared.".dimmed());
                }
            }
            Ok(())
        }
        Commands::Config { action } => {
            let config = Config::load()?;
            match action {
                ConfigAction::Show => {
                    let path = Config::config_path()?;
                    println!("{} {}", "Config path:".bold(), path.display());
                    println!();
                    let toml_str = toml::to_string_pretty(&config)?;
                    println!("{}", toml_str);
                }
            }
            Ok(())
        }
    }
}

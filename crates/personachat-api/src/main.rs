//! PersonaChat CLI entry point.
//!
//! Binary name: `pchat`
//!
//! Parses CLI arguments, opens the store and wires services, then dispatches
//! to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, CreateResource, ListResource};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,personachat_core=debug,personachat_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "pchat", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Create { resource } => match resource {
            CreateResource::Bot {
                name,
                description,
                persona,
                image_url,
                creator,
            } => {
                let fields = cli::bot::BotFields {
                    name,
                    description,
                    persona,
                    image_url,
                    creator,
                };
                cli::bot::create_bot(&state, fields, cli.json).await?;
            }
        },

        Commands::List { resource } => match resource {
            ListResource::Bots => {
                cli::bot::list_bots(&state, cli.json).await?;
            }
        },

        Commands::Show { bot_id } => {
            cli::bot::show_bot(&state, &bot_id, cli.json).await?;
        }

        Commands::History { bot_id } => {
            cli::chat::show_history(&state, &bot_id, cli.json).await?;
        }

        Commands::Chat { bot_id, message } => {
            cli::chat::chat(&state, &bot_id, message, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

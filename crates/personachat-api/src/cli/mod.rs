//! CLI command definitions for the `pchat` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `pchat create bot`, `pchat list bots`).

pub mod bot;
pub mod chat;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use personachat_types::bot::BotId;

/// Chat with persona-driven bots.
#[derive(Parser)]
#[command(name = "pchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show details of a bot.
    Show {
        /// Bot ID to display.
        bot_id: BotId,
    },

    /// Print the conversation history with a bot.
    History {
        /// Bot ID.
        bot_id: BotId,
    },

    /// Chat with a bot (interactive unless --message is given).
    Chat {
        /// Bot ID to chat with.
        bot_id: BotId,

        /// Send a single message and exit.
        #[arg(long, short)]
        message: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Create a new bot. Missing fields are prompted for.
    Bot {
        /// Display name.
        #[arg(long)]
        name: Option<String>,

        /// Short description shown in listings.
        #[arg(long)]
        description: Option<String>,

        /// Persona instructions prepended to every prompt.
        #[arg(long)]
        persona: Option<String>,

        /// Avatar image URL.
        #[arg(long)]
        image_url: Option<String>,

        /// Creator name (defaults to "User").
        #[arg(long)]
        creator: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List all bots, newest first.
    Bots,
}

//! Chat CLI commands: history and the chat loop.
//!
//! `pchat chat <id>` without `--message` reads lines from stdin until
//! `/exit` or end of input, sending each non-empty line as one exchange.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use personachat_types::bot::{Bot, BotId};
use personachat_types::chat::Message;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::state::{AppState, ConcreteChatService};

const EXIT_COMMAND: &str = "/exit";

/// Number of earlier messages replayed when an interactive chat starts.
const RECENT_HISTORY: usize = 6;

/// A cyan steady-tick spinner with the given message.
pub(crate) fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

/// Print every message exchanged with a bot, oldest first.
///
/// # Examples
///
/// ```bash
/// pchat history 01970c1e-...
/// pchat history 01970c1e-... --json
/// ```
pub async fn show_history(state: &AppState, id: &BotId, json: bool) -> Result<()> {
    let bot = state.bot_service.require_bot(id).await?;
    let messages = state.bot_service.chat_history(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages with '{}' yet. Start with: {}",
            style("i").blue().bold(),
            style(&bot.name).cyan(),
            style(format!("pchat chat {}", bot.id)).yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("  Conversation with '{}'", style(&bot.name).cyan().bold());
    println!();
    for message in &messages {
        print_message(&bot, message);
    }
    println!(
        "  {} message{}",
        style(messages.len()).bold(),
        if messages.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Chat with a bot: one-shot when `message` is given, interactive otherwise.
pub async fn chat(state: &AppState, id: &BotId, message: Option<String>, json: bool) -> Result<()> {
    let bot = state.bot_service.require_bot(id).await?;
    let chat_service = state.chat_service()?;

    if let Some(content) = message {
        return send_once(&chat_service, &bot, &content, json).await;
    }

    print_banner(&bot, &state.config.exchange.model);

    let history = state.bot_service.chat_history(id).await?;
    if !history.is_empty() {
        let skip = history.len().saturating_sub(RECENT_HISTORY);
        if skip > 0 {
            println!(
                "  {}",
                style(format!("... {skip} earlier messages")).dim()
            );
        }
        for message in &history[skip..] {
            print_message(&bot, message);
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("  {} ", style("You:").green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line == EXIT_COMMAND {
            break;
        }
        if line.is_empty() {
            continue;
        }

        send_once(&chat_service, &bot, line, json).await?;
    }

    println!("  {}", style("Goodbye.").dim());
    Ok(())
}

async fn send_once(
    chat_service: &ConcreteChatService,
    bot: &Bot,
    content: &str,
    json: bool,
) -> Result<()> {
    let spinner = spinner("Thinking...")?;
    let result = chat_service.send_message(&bot.id, content).await;
    spinner.finish_and_clear();
    let turn = result?;

    if json {
        println!("{}", serde_json::to_string(&turn)?);
        return Ok(());
    }

    print_message(bot, &turn.reply);
    Ok(())
}

fn print_banner(bot: &Bot, model: &str) {
    println!();
    println!("  {}", style(&bot.name).cyan().bold());
    println!("  {}", style(&bot.description).dim());
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!();
    println!(
        "  {}",
        style(format!("Type {EXIT_COMMAND} or press Ctrl+D to leave")).dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

fn print_message(bot: &Bot, message: &Message) {
    let timestamp = message.timestamp.format("%H:%M");
    if message.is_user {
        println!(
            "  {} {}",
            style("You").green().bold(),
            style(timestamp).dim()
        );
    } else {
        println!(
            "  {} {}",
            style(&bot.name).cyan().bold(),
            style(timestamp).dim()
        );
    }
    for line in message.content.lines() {
        println!("    {line}");
    }
    println!();
}

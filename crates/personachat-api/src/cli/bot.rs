//! Bot CLI commands: create, list, show.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Input;
use personachat_types::bot::{Bot, BotId, CreateBotRequest, DEFAULT_CREATOR};

use crate::state::AppState;

/// Field values supplied on the command line.
pub struct BotFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub persona: Option<String>,
    pub image_url: Option<String>,
    pub creator: Option<String>,
}

/// Create a new bot, prompting for any field not given as a flag.
///
/// # Examples
///
/// ```bash
/// # Interactive
/// pchat create bot
///
/// # One-shot with flags
/// pchat create bot --name "Luna" --description "Night owl" \
///     --persona "You are Luna, a calm astronomer." \
///     --image-url "https://example.com/luna.png"
/// ```
pub async fn create_bot(state: &AppState, fields: BotFields, json: bool) -> Result<()> {
    let name = prompt_if_missing(fields.name, "Bot name", None)?;
    let description = prompt_if_missing(
        fields.description,
        "Short description",
        Some(format!("A bot named {name}")),
    )?;
    let persona = prompt_if_missing(fields.persona, "Persona instructions", None)?;
    let image_url = prompt_if_missing(fields.image_url, "Avatar image URL", None)?;

    let request = CreateBotRequest {
        name,
        description,
        persona,
        image_url,
        creator: fields.creator,
    };

    let spinner = super::chat::spinner("Creating bot...")?;
    let result = state.bot_service.create_bot(request).await;
    spinner.finish_and_clear();
    let bot = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bot)?);
        return Ok(());
    }

    println!();
    println!("  {} Bot created successfully!", style("✓").green().bold());
    println!();
    print_profile(&bot);
    println!();
    println!(
        "  Start chatting: {}",
        style(format!("pchat chat {}", bot.id)).yellow()
    );
    println!();

    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str, default: Option<String>) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

/// List all bots, newest first.
pub async fn list_bots(state: &AppState, json: bool) -> Result<()> {
    let bots = state.bot_service.list_bots().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bots)?);
        return Ok(());
    }

    if bots.is_empty() {
        println!();
        println!(
            "  {} No bots found. Create one with: {}",
            style("i").blue().bold(),
            style("pchat create bot").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Creator").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for bot in &bots {
        table.add_row(vec![
            Cell::new(&bot.name).fg(Color::Cyan),
            Cell::new(bot.id.to_string()).fg(Color::DarkGrey),
            Cell::new(truncate(&bot.description, 50)),
            Cell::new(&bot.creator),
            Cell::new(bot.created_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} bot{}",
        style(bots.len()).bold(),
        if bots.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show the full profile of a bot.
pub async fn show_bot(state: &AppState, id: &BotId, json: bool) -> Result<()> {
    let bot = state.bot_service.require_bot(id).await?;
    let history = state.bot_service.chat_history(id).await?;

    if json {
        let profile = serde_json::json!({
            "bot": bot,
            "messageCount": history.len(),
        });
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!();
    print_profile(&bot);
    println!(
        "  {}  {}",
        style("Messages:").bold(),
        history.len()
    );
    println!();
    println!("  {}", style("Persona").bold().underlined());
    for line in bot.persona.lines() {
        println!("  {}", style(line).dim());
    }
    println!();

    Ok(())
}

fn print_profile(bot: &Bot) {
    println!("  {}  {}", style("Name:").bold(), style(&bot.name).cyan());
    println!("  {}  {}", style("Description:").bold(), &bot.description);
    println!("  {}  {}", style("Image:").bold(), style(&bot.image_url).dim());
    let creator = if bot.creator == DEFAULT_CREATOR {
        style(bot.creator.as_str()).dim()
    } else {
        style(bot.creator.as_str())
    };
    println!("  {}  {}", style("Creator:").bold(), creator);
    println!(
        "  {}  {}",
        style("Created:").bold(),
        bot.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  {}  {}", style("ID:").bold(), style(bot.id.to_string()).dim());
}

/// Shorten `text` to at most `max` characters, ending with "..." when cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

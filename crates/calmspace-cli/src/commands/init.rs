use std::io::IsTerminal;
use std::path::PathBuf;

use calmspace_core::storage::SqliteStore;
use calmspace_core::{Journal, UserId};
use dialoguer::Input;
use tracing::info;
use uuid::Uuid;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_journal_path, write_config, CalmspaceConfig};
use crate::errors::CliError;
use crate::ui::theme::{styled, styles};
use crate::ui::{blank_line, hint, print, receipt, UiContext};

fn print_welcome(ui: &UiContext) {
    if !ui.mode.is_pretty() {
        return;
    }
    println!("{}", styled("Welcome to CalmSpace", styles::bold(), ui.color));
    println!(
        "{}",
        styled(
            "A private journal. Entries are encrypted with a 6-digit PIN.",
            styles::dim(),
            ui.color
        )
    );
    println!();
}

fn prompt_display_name() -> anyhow::Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt("What should we call you? (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read name: {}", e))?;
    let trimmed = value.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false, None);
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Use --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let cli = ctx.cli();
    let journal_path = match args.path.as_deref().or(cli.journal.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_journal_path()?,
    };
    let user_id = match cli.user.as_deref() {
        Some(user) => user.to_string(),
        None => Uuid::new_v4().to_string(),
    };
    let user = UserId::new(user_id.clone())
        .map_err(|e| CliError::invalid_input(format!("Invalid user id: {}", e)))?;

    let interactive = std::io::stdin().is_terminal() && !args.no_input;
    print_welcome(&ui);
    let display_name = match (&args.name, interactive) {
        (Some(name), _) => Some(name.trim().to_string()).filter(|n| !n.is_empty()),
        (None, true) => prompt_display_name()?,
        (None, false) => None,
    };

    let store = SqliteStore::open(&journal_path)?;
    let journal = Journal::open(store, user)?;
    let has_pin = journal.has_pin();

    let config = CalmspaceConfig::new(
        journal_path.clone(),
        user_id.clone(),
        display_name,
        args.editor.clone(),
    );
    write_config(&config_path, &config)?;
    info!(config = %config_path.display(), journal = %journal_path.display(), "initialized");

    if ctx.quiet() {
        return Ok(());
    }
    let config_display = config_path.display().to_string();
    let journal_display = journal_path.display().to_string();
    print(
        &ui,
        &receipt(
            &ui,
            "Journal ready",
            &[
                ("Config", config_display.as_str()),
                ("Journal", journal_display.as_str()),
                ("User", user_id.as_str()),
            ],
        ),
    );
    if !has_pin {
        blank_line(&ui);
        print(
            &ui,
            &hint(&ui, "Run `calmspace pin set` to encrypt your entries with a PIN."),
        );
    }
    Ok(())
}

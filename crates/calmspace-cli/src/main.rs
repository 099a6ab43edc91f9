//! CalmSpace CLI - a private, PIN-protected mood journal
//!
//! Command-line front-end over `calmspace-core`. Each invocation opens the
//! journal, unlocks it if needed, runs one command and exits.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use calmspace_core::VERSION;
use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, PinSubcommand};
use crate::commands::{entries, init, insights, misc, pin, prompt, status};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui(false, None);
        let error_msg = format!("{}", e);
        let (message, hint) = split_error_hint(&error_msg);
        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Split an explicit "Hint:" line off the message, or supply one for
/// common failures.
fn split_error_hint(error: &str) -> (&str, Option<String>) {
    if let Some(idx) = error.find("\nHint:") {
        return (&error[..idx], Some(error[idx + 1..].to_string()));
    }

    let error_lower = error.to_lowercase();
    let hint = if error_lower.contains("entry not found") {
        Some("Hint: Run `calmspace list` to see entry ids.")
    } else if error_lower.contains("journal is locked") {
        Some("Hint: Set CALMSPACE_PIN or run interactively to unlock.")
    } else if error_lower.contains("storage is damaged") {
        Some("Hint: The PIN was accepted but the saved entries could not be read.")
    } else if error_lower.contains("invalid pin") {
        Some("Hint: The PIN is exactly 6 digits.")
    } else {
        None
    };
    (error, hint.map(str::to_string))
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args)?,
        Some(Commands::Status(args)) => status::handle_status(ctx, args)?,
        Some(Commands::Pin(args)) => match &args.command {
            PinSubcommand::Set(set_args) => pin::handle_pin_set(ctx, set_args)?,
        },
        Some(Commands::Add(args)) => entries::handle_add(ctx, args)?,
        Some(Commands::List(args)) => entries::handle_list(ctx, args)?,
        Some(Commands::Show(args)) => entries::handle_show(ctx, args)?,
        Some(Commands::Delete(args)) => entries::handle_delete(ctx, args)?,
        Some(Commands::Insights(args)) => insights::handle_insights(ctx, args)?,
        Some(Commands::Prompt(args)) => prompt::handle_prompt(args)?,
        Some(Commands::Completions(args)) => misc::handle_completions(args)?,
        None => {
            println!("CalmSpace v{}", VERSION);
            println!("\nQuickstart:");
            println!("  calmspace init");
            println!("  calmspace pin set");
            println!("  calmspace add --mood happy --body \"A good day\"");
            println!("  calmspace list");
            println!("  calmspace insights");
            println!("\nRun `calmspace --help` for full usage.");
        }
    }

    Ok(())
}

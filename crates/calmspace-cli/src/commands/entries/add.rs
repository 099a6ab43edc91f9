use std::io::IsTerminal;

use calmspace_core::journal::{EntryStatus, NewEntry};
use calmspace_core::prompts::daily_prompt;
use calmspace_core::LockState;
use chrono::Local;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::{collect_tags, parse_mood, read_entry_body, select_mood};
use crate::output::entry_json;
use crate::ui::{print, receipt, short_id};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(args.json, None);
    let interactive = std::io::stdin().is_terminal() && !args.no_input;

    let mood = match (&args.mood, interactive) {
        (Some(value), _) => parse_mood(value)?,
        (None, true) => select_mood(ui.unicode)?,
        (None, false) => {
            return Err(CliError::invalid_input("--mood is required with --no-input").into())
        }
    };

    let mut journal = ctx.unlocked_journal(args.no_input, &ui)?;
    if journal.state() == LockState::NoPinSet {
        return Err(CliError::invalid_input(
            "No PIN is set, so entries cannot be saved yet.\nHint: Run `calmspace pin set` first.",
        )
        .into());
    }

    let prompt = daily_prompt(Local::now().date_naive());
    let body = read_entry_body(args.no_input, args.body.clone(), ctx.editor()?, prompt)?;
    let status = if args.draft {
        EntryStatus::Draft
    } else {
        EntryStatus::Complete
    };
    let new_entry = NewEntry::new(mood, body)
        .with_tags(collect_tags(&args.tag))
        .with_status(status);

    let entry = journal.add_entry(new_entry)?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry_json(&entry))?);
        return Ok(());
    }
    if !ctx.quiet() {
        let id = short_id(&entry.id);
        let status = entry.status.to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Entry saved",
                &[
                    ("ID", id.as_str()),
                    ("Mood", entry.mood.as_str()),
                    ("Status", status.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

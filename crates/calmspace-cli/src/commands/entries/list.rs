use calmspace_core::insights::displayed_entries;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::errors::CliError;
use crate::helpers::collect_tags;
use crate::output::{entries_json, print_entry_list};
use crate::ui::format::plural;
use crate::ui::{header, hint, print};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    if let Some(format) = args.format.as_deref() {
        if args.json {
            return Err(CliError::invalid_input("--format cannot be used with --json").into());
        }
        if !matches!(format, "table" | "plain") {
            return Err(CliError::invalid_input(format!(
                "Unknown format \"{}\" (use table or plain)",
                format
            ))
            .into());
        }
    }

    let ui = ctx.ui(args.json, args.format.as_deref());
    let journal = ctx.unlocked_journal(args.no_input, &ui)?;
    let tags = collect_tags(&args.tag);

    let mut entries = displayed_entries(journal.entries()?, &tags);
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entries_json(&entries))?);
        return Ok(());
    }

    if entries.is_empty() {
        if !ctx.quiet() {
            println!("No entries found.");
            if !journal.has_pin() {
                print(&ui, &hint(&ui, "Run `calmspace pin set`, then `calmspace add`."));
            }
        }
        return Ok(());
    }

    if !ctx.quiet() {
        let context = if tags.is_empty() {
            plural(entries.len(), "entry", "entries")
        } else {
            format!("{}, tagged {}", plural(entries.len(), "entry", "entries"), tags.join(", "))
        };
        print(&ui, &header(&ui, "list", Some(&context)));
    }
    print_entry_list(&ui, &entries);
    Ok(())
}

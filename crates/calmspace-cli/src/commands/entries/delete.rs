use std::io::IsTerminal;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::{confirm, resolve_entry};
use crate::ui::format::single_line;
use crate::ui::{print, receipt, short_id, truncate};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false, None);
    let mut journal = ctx.unlocked_journal(args.no_input, &ui)?;
    let entry = resolve_entry(journal.entries()?, &args.id)?;
    let id = entry.id.clone();

    if !args.yes {
        let interactive = std::io::stdin().is_terminal() && !args.no_input;
        if !interactive {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation.\nHint: Pass --yes to confirm.",
            )
            .into());
        }
        let preview = truncate(&single_line(&entry.content), 50);
        if !confirm(&format!("Delete entry {} \"{}\"?", short_id(&id), preview))? {
            print(&ui, "Cancelled.");
            return Ok(());
        }
    }

    let removed = journal.delete_entry(&id)?;
    if !ctx.quiet() {
        print(&ui, &receipt(&ui, "Entry deleted", &[("ID", removed.id.as_str())]));
    }
    Ok(())
}

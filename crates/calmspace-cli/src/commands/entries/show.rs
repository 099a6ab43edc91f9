use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::resolve_entry;
use crate::output::{entry_json, print_entry};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(args.json, None);
    let journal = ctx.unlocked_journal(args.no_input, &ui)?;
    let entry = resolve_entry(journal.entries()?, &args.id)?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry_json(entry))?);
    } else {
        print_entry(&ui, entry);
    }
    Ok(())
}

use calmspace_core::LockState;

use crate::app::AppContext;
use crate::cli::StatusArgs;
use crate::ui::{badge, header, kv, print, Badge};

/// Report where the journal lives and whether a PIN protects it.
///
/// Never prompts for the PIN.
pub fn handle_status(ctx: &AppContext, args: &StatusArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(args.json, None);
    let path = ctx.journal_path()?;
    let exists = path.exists();

    let (user, state, iterations) = if exists {
        let journal = ctx.open_journal()?;
        (
            Some(journal.user().to_string()),
            Some(journal.state()),
            journal.kdf_params().iterations(),
        )
    } else {
        (None, None, 0)
    };

    if ui.mode.is_json() {
        let value = serde_json::json!({
            "journal": path.display().to_string(),
            "exists": exists,
            "user": user,
            "state": state.map(|s| s.to_string()),
            "pin_set": matches!(state, Some(LockState::Locked | LockState::Unlocked)),
            "kdf_iterations": exists.then_some(iterations),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let greeting = ctx.display_name()?.map(|name| format!("hello, {}", name));
    print(&ui, &header(&ui, "status", greeting.as_deref()));
    print(&ui, &kv(&ui, "Journal", &path.display().to_string()));
    match (user, state) {
        (Some(user), Some(state)) => {
            print(&ui, &kv(&ui, "User", &user));
            print(&ui, &kv(&ui, "State", &state.to_string()));
            print(&ui, &kv(&ui, "KDF iterations", &iterations.to_string()));
            if state == LockState::NoPinSet {
                print(
                    &ui,
                    &badge(&ui, Badge::Warn, "No PIN set; entries will not be saved."),
                );
            }
        }
        _ => print(&ui, &kv(&ui, "State", "missing")),
    }
    Ok(())
}

use std::io::IsTerminal;

use calmspace_core::JournalError;

use crate::app::AppContext;
use crate::cli::PinSetArgs;
use crate::errors::CliError;
use crate::helpers::{pin_in_env, prompt_new_pin};
use crate::ui::{print, receipt, Spinner};

pub fn handle_pin_set(ctx: &AppContext, args: &PinSetArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false, None);
    let mut journal = ctx.open_journal()?;
    if journal.has_pin() {
        return Err(CliError::invalid_input(
            "A PIN is already set for this journal.\nHint: PINs cannot be changed or reset.",
        )
        .into());
    }

    let interactive = std::io::stdin().is_terminal() && !args.no_input;
    let retry = interactive && !pin_in_env();
    journal.begin_pin_setup()?;

    loop {
        let (pin, confirmation) = prompt_new_pin(interactive)?;
        let spinner = Spinner::start(&ui, "Encrypting journal");
        let result = journal.complete_pin_setup(&pin, &confirmation);
        spinner.stop();

        match result {
            Ok(()) => break,
            Err(err @ (JournalError::SetupMismatch | JournalError::InvalidPin(_))) if retry => {
                eprintln!("{}", err);
            }
            Err(err) => {
                journal.cancel_pin_setup()?;
                return Err(err.into());
            }
        }
    }

    if !ctx.quiet() {
        print(
            &ui,
            &receipt(
                &ui,
                "PIN set",
                &[("User", journal.user().as_str()), ("State", "unlocked")],
            ),
        );
        print(
            &ui,
            "Remember this PIN. A forgotten PIN cannot be recovered.",
        );
    }
    Ok(())
}

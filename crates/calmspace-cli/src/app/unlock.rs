//! PIN entry and unlock with retry.

use calmspace_core::crypto::key::DEFAULT_ITERATIONS;
use calmspace_core::{Journal, JournalError, KeyValueStore, SharedJournal, UnlockOutcome};
use tracing::{debug, info};

use crate::errors::CliError;
use crate::helpers::{pin_in_env, prompt_pin};
use crate::ui::{Spinner, UiContext};

/// Unlock a locked journal.
///
/// Interactive sessions re-prompt after a wrong PIN without limit. A PIN
/// from CALMSPACE_PIN or a non-interactive session gets one attempt.
pub fn unlock_with_retry<S: KeyValueStore + 'static>(
    journal: Journal<S>,
    interactive: bool,
    ui: &UiContext,
) -> anyhow::Result<Journal<S>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to start runtime: {}", e))?;
    let iterations = journal.kdf_params().iterations();
    let shared = SharedJournal::new(journal);
    let retry = interactive && !pin_in_env();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let pin = prompt_pin(interactive)?;
        let spinner = Spinner::start(ui, "Unlocking");
        let outcome = runtime.block_on(shared.unlock(&pin));
        spinner.stop();

        match outcome {
            Ok(UnlockOutcome::Unlocked) | Ok(UnlockOutcome::AlreadyUnlocked) => {
                info!(attempts, "journal unlocked");
                break;
            }
            Ok(UnlockOutcome::IncorrectPin) if retry => {
                debug!(attempts, "incorrect PIN, prompting again");
                eprintln!("Incorrect PIN. Please try again.");
            }
            Ok(UnlockOutcome::IncorrectPin) => {
                return Err(
                    CliError::auth_failed_with_hint("Incorrect PIN.", incorrect_pin_hint(iterations))
                        .into(),
                );
            }
            Ok(UnlockOutcome::Busy) => {
                return Err(anyhow::anyhow!("Another unlock is already in progress"));
            }
            Err(JournalError::InvalidPin(reason)) if retry => {
                eprintln!("Invalid PIN: {}", reason);
            }
            Err(err) => return Err(err.into()),
        }
    }

    shared
        .into_inner()
        .map_err(|_| anyhow::anyhow!("Journal is still shared after unlock"))
}

/// Point at a changed iteration count before declaring the PIN lost.
fn incorrect_pin_hint(iterations: u32) -> String {
    if iterations == DEFAULT_ITERATIONS {
        "Hint: A forgotten PIN cannot be recovered; the entries stay encrypted.".to_string()
    } else {
        format!(
            "Hint: kdf_iterations is set to {} in the config. If it changed after the PIN was set, restore the earlier value.",
            iterations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calmspace_core::journal::UserId;
    use calmspace_core::storage::MemoryStore;
    use calmspace_core::LockState;

    use crate::ui::OutputMode;

    fn plain_ui() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    fn locked_journal() -> Journal<MemoryStore> {
        let mut journal = Journal::open(MemoryStore::new(), UserId::new("u").unwrap()).unwrap();
        journal.begin_pin_setup().unwrap();
        journal.complete_pin_setup("135790", "135790").unwrap();
        journal.lock();
        journal
    }

    #[test]
    fn test_non_interactive_without_pin_is_invalid_input() {
        if pin_in_env() {
            return;
        }
        let err = unlock_with_retry(locked_journal(), false, &plain_ui()).unwrap_err();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli.exit_code(), crate::constants::exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_incorrect_pin_hint_mentions_changed_iterations() {
        assert!(incorrect_pin_hint(DEFAULT_ITERATIONS).contains("cannot be recovered"));
        let hint = incorrect_pin_hint(DEFAULT_ITERATIONS * 2);
        assert!(hint.contains("kdf_iterations is set to 200000"));
    }

    #[test]
    fn test_locked_journal_fixture() {
        assert_eq!(locked_journal().state(), LockState::Locked);
    }
}

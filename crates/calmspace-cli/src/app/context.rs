//! Application context for the CalmSpace CLI.
//!
//! Combines CLI arguments with the lazily-loaded config file.

use std::io::IsTerminal;
use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use calmspace_core::crypto::KdfParams;
use calmspace_core::storage::SqliteStore;
use calmspace_core::{Journal, LockState};

use crate::cli::Cli;
use crate::config::{read_config, CalmspaceConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{missing_journal_error, resolve_config_path, resolve_journal_path, resolve_user};
use super::unlock::unlock_with_retry;

/// CLI args plus config, loaded on first use.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<CalmspaceConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, or `None` if it does not exist.
    pub fn config(&self) -> anyhow::Result<Option<&CalmspaceConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                debug!(path = %path.display(), "no config file");
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.and_then(|c| c.ui.editor.as_deref()))
    }

    /// Display name from the profile, if set.
    pub fn display_name(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.and_then(|c| c.profile.display_name.as_deref()))
    }

    pub fn journal_path(&self) -> anyhow::Result<PathBuf> {
        resolve_journal_path(self.cli, self.config()?)
    }

    /// UI context for a command's output flags.
    pub fn ui(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }

    fn kdf_params(&self) -> anyhow::Result<KdfParams> {
        match self.config()? {
            Some(config) => KdfParams::new(config.security.kdf_iterations)
                .map_err(|e| CliError::invalid_input(format!("Invalid config: {}", e)).into()),
            None => Ok(KdfParams::default()),
        }
    }

    /// Open the journal without unlocking it.
    pub fn open_journal(&self) -> anyhow::Result<Journal<SqliteStore>> {
        let path = self.journal_path()?;
        if !path.exists() {
            return Err(missing_journal_error(&path).into());
        }
        let user = resolve_user(self.cli, self.config()?)?;
        let store = SqliteStore::open(&path)?;
        let params = self.kdf_params()?;
        debug!(path = %path.display(), iterations = params.iterations(), "opening journal");
        Ok(Journal::open_with(
            store,
            user,
            params,
            Box::new(calmspace_core::crypto::OsRandom),
        )?)
    }

    /// Open the journal and unlock it if a PIN is set.
    ///
    /// A journal without a PIN is returned as is.
    pub fn unlocked_journal(
        &self,
        no_input: bool,
        ui: &UiContext,
    ) -> anyhow::Result<Journal<SqliteStore>> {
        let journal = self.open_journal()?;
        if journal.state() != LockState::Locked {
            return Ok(journal);
        }
        let interactive = std::io::stdin().is_terminal() && !no_input;
        unlock_with_retry(journal, interactive, ui)
    }
}

//! Path and identity resolution for config and journal files.

use std::path::{Path, PathBuf};

use calmspace_core::UserId;

use crate::cli::Cli;
use crate::config::{default_config_path, CalmspaceConfig};
use crate::constants::env;
use crate::errors::CliError;

/// Resolve the config file path, checking CALMSPACE_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Journal database path: `--journal` / CALMSPACE_PATH, then config.
pub fn resolve_journal_path(
    cli: &Cli,
    config: Option<&CalmspaceConfig>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.journal.as_deref() {
        return Ok(PathBuf::from(path));
    }
    match config {
        Some(config) => Ok(PathBuf::from(&config.journal.path)),
        None => Err(missing_config_error(&resolve_config_path()?).into()),
    }
}

/// User id: `--user` / CALMSPACE_USER, then config.
pub fn resolve_user(cli: &Cli, config: Option<&CalmspaceConfig>) -> anyhow::Result<UserId> {
    let raw = match (cli.user.as_deref(), config) {
        (Some(user), _) => user.to_string(),
        (None, Some(config)) => config.profile.user_id.clone(),
        (None, None) => return Err(missing_config_error(&resolve_config_path()?).into()),
    };
    UserId::new(raw).map_err(|e| CliError::invalid_input(format!("Invalid user id: {}", e)).into())
}

pub fn missing_journal_error(path: &Path) -> CliError {
    CliError::not_found(
        format!("No journal found at {}", path.display()),
        "Hint: Run `calmspace init` to create one, or pass --journal <PATH>.",
    )
}

pub fn missing_config_error(config_path: &Path) -> CliError {
    CliError::not_found(
        format!("No config found at {}", config_path.display()),
        "Hint: Run `calmspace init`, or pass --journal <PATH> and --user <ID>.",
    )
}

use std::path::{Path, PathBuf};

use calmspace_core::crypto::key::DEFAULT_ITERATIONS;
use serde::{Deserialize, Serialize};

use crate::constants::{APP_DIR, JOURNAL_FILE};

#[derive(Debug, Serialize, Deserialize)]
pub struct CalmspaceConfig {
    pub journal: JournalSection,
    pub profile: ProfileSection,
    #[serde(default)]
    pub security: SecuritySection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JournalSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileSection {
    pub user_id: String,
    pub display_name: Option<String>,
}

/// Key derivation settings.
///
/// The iteration count is not stored with the journal, so changing it after
/// a PIN has been set makes that PIN stop working.
#[derive(Debug, Serialize, Deserialize)]
pub struct SecuritySection {
    pub kdf_iterations: u32,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            kdf_iterations: DEFAULT_ITERATIONS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UiSection {
    pub editor: Option<String>,
}

impl CalmspaceConfig {
    pub fn new(
        journal_path: PathBuf,
        user_id: String,
        display_name: Option<String>,
        editor: Option<String>,
    ) -> Self {
        Self {
            journal: JournalSection {
                path: journal_path.to_string_lossy().to_string(),
            },
            profile: ProfileSection {
                user_id,
                display_name,
            },
            security: SecuritySection::default(),
            ui: UiSection { editor },
        }
    }
}

const SECURITY_NOTE: &[&str] = &[
    "# kdf_iterations must stay at the value in use when the PIN was set.",
    "# Changing it afterwards makes the correct PIN fail to unlock the journal.",
];

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_journal_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(JOURNAL_FILE))
}

pub fn read_config(path: &Path) -> anyhow::Result<CalmspaceConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &CalmspaceConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    let contents = annotate_security(&contents);
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

/// Place the iteration warning above the `[security]` table.
fn annotate_security(contents: &str) -> String {
    let mut out = String::with_capacity(contents.len() + 160);
    for line in contents.lines() {
        if line.trim() == "[security]" {
            for note in SECURITY_NOTE {
                out.push_str(note);
                out.push('\n');
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_DIR))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join(APP_DIR))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

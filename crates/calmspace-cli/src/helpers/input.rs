//! Input handling helpers for PINs, moods and entry bodies.

use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::Command;

use calmspace_core::journal::Mood;
use dialoguer::{Confirm, Password, Select};
use zeroize::Zeroizing;

use crate::constants::env;
use crate::errors::CliError;

fn env_value(name: &str) -> Option<Zeroizing<String>> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Zeroizing::new)
}

/// Whether CALMSPACE_PIN supplies the PIN.
pub fn pin_in_env() -> bool {
    env_value(env::PIN).is_some()
}

/// PIN from CALMSPACE_PIN, or prompt when interactive.
pub fn prompt_pin(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(pin) = env_value(env::PIN) {
        return Ok(pin);
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No PIN provided and no TTY available. Set {}.",
            env::PIN
        ))
        .into());
    }
    Password::new()
        .with_prompt("PIN")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))
}

/// A new PIN and its confirmation.
///
/// Non-interactive callers supply CALMSPACE_PIN and optionally
/// CALMSPACE_PIN_CONFIRM, which defaults to the PIN itself.
pub fn prompt_new_pin(
    interactive: bool,
) -> anyhow::Result<(Zeroizing<String>, Zeroizing<String>)> {
    if let Some(pin) = env_value(env::PIN) {
        let confirmation = env_value(env::PIN_CONFIRM).unwrap_or_else(|| pin.clone());
        return Ok((pin, confirmation));
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No PIN provided and no TTY available. Set {}.",
            env::PIN
        ))
        .into());
    }
    let pin = Password::new()
        .with_prompt("Choose a 6-digit PIN")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))?;
    let confirmation = Password::new()
        .with_prompt("Confirm PIN")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))?;
    Ok((pin, confirmation))
}

/// Pick a mood from a list.
pub fn select_mood(unicode: bool) -> anyhow::Result<Mood> {
    let labels: Vec<String> = Mood::ALL
        .iter()
        .map(|mood| crate::ui::theme::mood_label(*mood, unicode))
        .collect();
    let index = Select::new()
        .with_prompt("How are you feeling?")
        .items(&labels)
        .default(2)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read mood: {}", e))?;
    Ok(Mood::ALL[index])
}

/// Yes/no confirmation, defaulting to no.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Read entry body from --body flag, stdin, or the editor.
///
/// The editor buffer starts with `prompt` as a comment line.
pub fn read_entry_body(
    no_input: bool,
    body: Option<String>,
    editor_override: Option<&str>,
    prompt: &str,
) -> anyhow::Result<String> {
    if let Some(value) = body {
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer.trim_end().to_string());
    }

    if no_input {
        return Err(CliError::invalid_input(
            "--no-input requires --body or content on stdin",
        )
        .into());
    }

    read_body_from_editor(editor_override, prompt)
}

fn read_body_from_editor(editor_override: Option<&str>, prompt: &str) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("EDITOR").ok())
        .ok_or_else(|| {
            anyhow::anyhow!("$EDITOR is not set; use --body or pipe content via stdin")
        })?;

    let filename = format!("calmspace_entry_{}.md", uuid::Uuid::new_v4());
    let path = std::env::temp_dir().join(filename);
    write_private(&path, &editor_template(prompt))?;

    let status = Command::new(&editor).arg(&path).status();
    let contents = std::fs::read_to_string(&path);
    let _ = std::fs::remove_file(&path);

    let status = status.map_err(|e| anyhow::anyhow!("Failed to launch editor: {}", e))?;
    if !status.success() {
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }
    let contents = Zeroizing::new(
        contents.map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?,
    );
    Ok(strip_comments(&contents))
}

fn editor_template(prompt: &str) -> String {
    format!(
        "\n# {}\n# Lines starting with '#' are ignored. An empty entry is not saved.\n",
        prompt
    )
}

fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn write_private(path: &Path, contents: &str) -> anyhow::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;
    std::io::Write::write_all(&mut file, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write temp file: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_template_round_trip_is_empty() {
        let template = editor_template("What made you smile today?");
        assert!(template.contains("What made you smile today?"));
        assert_eq!(strip_comments(&template), "");
    }

    #[test]
    fn test_strip_comments_keeps_body() {
        let text = "# prompt\nFirst line\n\nSecond line\n# trailing";
        assert_eq!(strip_comments(text), "First line\n\nSecond line");
    }

    #[test]
    fn test_body_flag_wins() {
        let body = read_entry_body(true, Some("hello".to_string()), None, "p").unwrap();
        assert_eq!(body, "hello");
    }
}

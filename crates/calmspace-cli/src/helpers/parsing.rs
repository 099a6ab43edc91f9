//! Parsing helpers for moods, tags and entry ids.

use calmspace_core::journal::{parse_tags, JournalEntry, Mood};

use crate::constants::MIN_ID_PREFIX;
use crate::errors::CliError;

/// Parse a mood name (case-insensitive) or its 1-5 value.
pub fn parse_mood(value: &str) -> anyhow::Result<Mood> {
    if let Ok(number) = value.trim().parse::<u8>() {
        return Mood::from_value(number).ok_or_else(|| {
            CliError::invalid_input(format!("Mood value must be 1-5, got {}", number)).into()
        });
    }
    value.parse::<Mood>().map_err(|_| {
        CliError::invalid_input(format!(
            "Unknown mood \"{}\" (expected ecstatic, happy, neutral, sad or anxious)",
            value.trim()
        ))
        .into()
    })
}

/// Flatten repeated and comma-separated `--tag` values.
pub fn collect_tags(values: &[String]) -> Vec<String> {
    parse_tags(&values.join(","))
}

/// Find an entry by full id or unique prefix.
pub fn resolve_entry<'a>(
    entries: &'a [JournalEntry],
    id: &str,
) -> anyhow::Result<&'a JournalEntry> {
    let id = id.trim();
    if let Some(entry) = entries.iter().find(|e| e.id == id) {
        return Ok(entry);
    }
    if id.chars().count() < MIN_ID_PREFIX {
        return Err(CliError::invalid_input(format!(
            "Entry id prefix must be at least {} characters",
            MIN_ID_PREFIX
        ))
        .into());
    }

    let mut matches = entries.iter().filter(|e| e.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Ok(entry),
        (None, _) => Err(CliError::not_found(
            format!("Entry not found: {}", id),
            "Hint: Run `calmspace list` to see entry ids.",
        )
        .into()),
        (Some(_), Some(_)) => Err(CliError::invalid_input(format!(
            "Entry id prefix \"{}\" is ambiguous; use more characters",
            id
        ))
        .into()),
    }
}

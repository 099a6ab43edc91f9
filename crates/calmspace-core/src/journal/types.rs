//! Core data types for the journal.
//!
//! The serialized form of [`JournalEntry`] is the plaintext stored inside the
//! encrypted entries envelope:
//! `{id, date, mood, content, tags, status}`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{JournalError, Result};

/// Opaque, stable identifier supplied by the identity provider.
///
/// All storage keys for a user's journal are derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Wrap a user identifier.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Validation` if the value is empty or contains
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(JournalError::Validation(
                "User id cannot be empty".to_string(),
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(JournalError::Validation(
                "User id cannot contain whitespace".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the user felt when writing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Ecstatic,
    Happy,
    Neutral,
    Sad,
    Anxious,
}

impl Mood {
    /// All moods, best to worst.
    pub const ALL: [Mood; 5] = [
        Mood::Ecstatic,
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Anxious,
    ];

    /// Numeric score used for trends (Ecstatic = 5 .. Anxious = 1).
    pub fn value(&self) -> u8 {
        match self {
            Mood::Ecstatic => 5,
            Mood::Happy => 4,
            Mood::Neutral => 3,
            Mood::Sad => 2,
            Mood::Anxious => 1,
        }
    }

    pub fn from_value(value: u8) -> Option<Mood> {
        Mood::ALL.into_iter().find(|mood| mood.value() == value)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Ecstatic => "\u{1F929}",
            Mood::Happy => "\u{1F60A}",
            Mood::Neutral => "\u{1F610}",
            Mood::Sad => "\u{1F622}",
            Mood::Anxious => "\u{1F61F}",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Ecstatic => "Ecstatic",
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = JournalError;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                JournalError::Validation(format!(
                    "Unknown mood \"{}\" (expected one of: ecstatic, happy, neutral, sad, anxious)",
                    trimmed
                ))
            })
    }
}

/// Whether an entry was saved as finished or as a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Complete,
    Draft,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Complete => f.write_str("complete"),
            EntryStatus::Draft => f.write_str("draft"),
        }
    }
}

/// A journal entry.
///
/// The id, body and tags are wiped when an entry is dropped, including
/// clones handed out to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct JournalEntry {
    /// Unique identifier for this entry
    pub id: String,

    /// When this entry was created (ISO-8601, UTC)
    #[zeroize(skip)]
    pub date: DateTime<Utc>,

    /// Mood at the time of writing
    #[zeroize(skip)]
    pub mood: Mood,

    /// Free-text body
    pub content: String,

    /// Free-text tags
    pub tags: Vec<String>,

    /// Complete or draft
    #[zeroize(skip)]
    pub status: EntryStatus,
}

impl JournalEntry {
    /// Build a stored entry from editor input, assigning a fresh id.
    pub fn from_new(new_entry: NewEntry, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            mood: new_entry.mood,
            content: new_entry.content,
            tags: new_entry.tags,
            status: new_entry.status,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == EntryStatus::Complete
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Builder for creating new entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub mood: Mood,
    pub content: String,
    pub tags: Vec<String>,
    pub status: EntryStatus,
}

impl NewEntry {
    /// A completed entry with no tags.
    pub fn new(mood: Mood, content: impl Into<String>) -> Self {
        Self {
            mood,
            content: content.into(),
            tags: Vec::new(),
            status: EntryStatus::Complete,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_validation() {
        assert!(UserId::new("mock_user_12345").is_ok());
        assert!(UserId::new("").is_err());
        assert!(UserId::new("has space").is_err());
    }

    #[test]
    fn test_mood_values_and_lookup() {
        assert_eq!(Mood::Ecstatic.value(), 5);
        assert_eq!(Mood::Anxious.value(), 1);
        assert_eq!(Mood::from_value(4), Some(Mood::Happy));
        assert_eq!(Mood::from_value(0), None);
    }

    #[test]
    fn test_mood_parse_case_insensitive() {
        assert_eq!("happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!(" ANXIOUS ".parse::<Mood>().unwrap(), Mood::Anxious);
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = JournalEntry {
            id: "1722247200000".to_string(),
            date: DateTime::parse_from_rfc3339("2024-07-29T10:00:00.000Z")
                .unwrap()
                .with_timezone(&Utc),
            mood: Mood::Happy,
            content: "Good day".to_string(),
            tags: vec!["gratitude".to_string()],
            status: EntryStatus::Complete,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["mood"], "Happy");
        assert_eq!(value["status"], "complete");
        assert_eq!(value["tags"][0], "gratitude");
        assert!(value["date"].as_str().unwrap().starts_with("2024-07-29T10:00:00"));
    }

    #[test]
    fn test_entry_parses_browser_json() {
        let json = r#"{"id":"1722247200000","date":"2024-07-29T10:00:00.000Z","mood":"Sad","content":"Rough day","tags":[],"status":"draft"}"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.mood, Mood::Sad);
        assert_eq!(entry.status, EntryStatus::Draft);
        assert!(!entry.is_complete());
    }

    #[test]
    fn test_from_new_assigns_unique_ids() {
        let now = Utc::now();
        let a = JournalEntry::from_new(NewEntry::new(Mood::Happy, "a"), now);
        let b = JournalEntry::from_new(NewEntry::new(Mood::Happy, "b"), now);
        assert_ne!(a.id, b.id);
        assert_ne!(a.id[..8], b.id[..8]);
        assert_eq!(a.date, now);
    }

    #[test]
    fn test_zeroize_clears_text_but_keeps_metadata() {
        let mut entry = JournalEntry::from_new(
            NewEntry::new(Mood::Anxious, "private words").with_tags(vec!["work".to_string()]),
            Utc::now(),
        );
        entry.zeroize();
        assert!(entry.id.is_empty());
        assert!(entry.content.is_empty());
        assert!(entry.tags.is_empty());
        assert_eq!(entry.mood, Mood::Anxious);
    }
}

//! Reflective writing prompts shown above the entry editor.

use chrono::{Datelike, NaiveDate};

use crate::crypto::RandomSource;
use crate::error::Result;

pub const PROMPTS: [&str; 10] = [
    "What was the highlight of your day?",
    "Describe a specific event from today and how it made you feel.",
    "What challenged you today, and how did you respond?",
    "What is one thing you're grateful for that happened today?",
    "Write about a conversation that stood out to you.",
    "What's something that made you smile or laugh today?",
    "How did you take care of your well-being today?",
    "What was on your mind the most throughout the day?",
    "Describe a simple pleasure you enjoyed today.",
    "What is one thing you learned today, about yourself or the world?",
];

/// The prompt for a given day. Stable for the whole day.
pub fn daily_prompt(date: NaiveDate) -> &'static str {
    PROMPTS[date.ordinal() as usize % PROMPTS.len()]
}

/// A uniformly chosen prompt.
pub fn random_prompt(rng: &dyn RandomSource) -> Result<&'static str> {
    let mut buf = [0u8; 4];
    rng.fill(&mut buf)?;
    let index = u32::from_le_bytes(buf) as usize % PROMPTS.len();
    Ok(PROMPTS[index])
}

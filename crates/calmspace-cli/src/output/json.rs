//! JSON output formatting.

use calmspace_core::insights::TrendPoint;
use calmspace_core::journal::{JournalEntry, Mood};

pub fn entry_json(entry: &JournalEntry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "date": entry.date,
        "mood": entry.mood,
        "mood_value": entry.mood.value(),
        "content": entry.content,
        "tags": entry.tags,
        "status": entry.status,
    })
}

pub fn entries_json(entries: &[&JournalEntry]) -> Vec<serde_json::Value> {
    entries.iter().map(|entry| entry_json(entry)).collect()
}

/// Summary numbers shown by `insights`.
pub struct InsightsSummary<'a> {
    pub window: &'a str,
    pub streak: u32,
    pub journaled_today: bool,
    pub entry_count: usize,
    pub trend: &'a [TrendPoint],
    pub most_frequent_mood: Option<Mood>,
    pub tags: &'a [String],
}

pub fn insights_json(summary: &InsightsSummary<'_>) -> serde_json::Value {
    let trend: Vec<serde_json::Value> = summary
        .trend
        .iter()
        .map(|point| {
            serde_json::json!({
                "day": point.day,
                "mood_value": point.mood_value,
                "mood": point.rounded_mood(),
            })
        })
        .collect();
    serde_json::json!({
        "window": summary.window,
        "streak": summary.streak,
        "journaled_today": summary.journaled_today,
        "entry_count": summary.entry_count,
        "trend": trend,
        "most_frequent_mood": summary.most_frequent_mood,
        "tags": summary.tags,
    })
}

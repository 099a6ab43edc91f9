//! Derived views over decrypted entries: tag filters, mood trends, streaks.
//!
//! Everything here is pure and works on a slice of entries, so it can run on
//! whatever an unlocked journal hands out. Days are UTC calendar days.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{JournalError, Result};
use crate::journal::{JournalEntry, Mood};

/// Entries newest first, keeping only those that carry every active tag.
pub fn displayed_entries<'a>(
    entries: &'a [JournalEntry],
    active_tags: &[String],
) -> Vec<&'a JournalEntry> {
    let mut shown: Vec<&JournalEntry> = entries
        .iter()
        .filter(|entry| active_tags.iter().all(|tag| entry.has_tag(tag)))
        .collect();
    shown.sort_by(|a, b| b.date.cmp(&a.date));
    shown
}

/// Distinct tags in first-seen order.
pub fn all_tags(entries: &[JournalEntry]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in entries.iter().flat_map(|entry| entry.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Time range considered by [`mood_trend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendWindow {
    #[default]
    Week,
    Month,
    All,
}

impl TrendWindow {
    fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TrendWindow::Week => Some(now - Duration::days(7)),
            TrendWindow::Month => Some(now - Duration::days(30)),
            TrendWindow::All => None,
        }
    }
}

impl fmt::Display for TrendWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendWindow::Week => f.write_str("7d"),
            TrendWindow::Month => f.write_str("30d"),
            TrendWindow::All => f.write_str("all"),
        }
    }
}

impl FromStr for TrendWindow {
    type Err = JournalError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "7d" | "week" => Ok(TrendWindow::Week),
            "30d" | "month" => Ok(TrendWindow::Month),
            "all" => Ok(TrendWindow::All),
            other => Err(JournalError::Validation(format!(
                "Unknown trend window \"{}\" (expected 7d, 30d or all)",
                other
            ))),
        }
    }
}

/// Average mood on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub mood_value: f64,
}

impl TrendPoint {
    /// The mood whose value is nearest the day's average.
    pub fn rounded_mood(&self) -> Option<Mood> {
        let rounded = self.mood_value.round();
        if !(1.0..=5.0).contains(&rounded) {
            return None;
        }
        Mood::from_value(rounded as u8)
    }
}

/// Average mood value per day over complete entries in `window`, oldest day
/// first.
pub fn mood_trend(entries: &[JournalEntry], window: TrendWindow, now: DateTime<Utc>) -> Vec<TrendPoint> {
    let start = window.start(now);
    let mut by_day: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();

    for entry in entries.iter().filter(|entry| entry.is_complete()) {
        if start.is_some_and(|start| entry.date < start) {
            continue;
        }
        let slot = by_day.entry(entry.date.date_naive()).or_insert((0, 0));
        slot.0 += u32::from(entry.mood.value());
        slot.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(day, (sum, count))| TrendPoint {
            day,
            mood_value: f64::from(sum) / f64::from(count),
        })
        .collect()
}

/// The mood that most days in the trend round to.
///
/// Ties go to the mood seen on the earliest day.
pub fn most_frequent_mood(trend: &[TrendPoint]) -> Option<Mood> {
    let mut counts: Vec<(Mood, usize)> = Vec::new();
    for mood in trend.iter().filter_map(TrendPoint::rounded_mood) {
        match counts.iter_mut().find(|(seen, _)| *seen == mood) {
            Some((_, count)) => *count += 1,
            None => counts.push((mood, 1)),
        }
    }

    let mut best: Option<(Mood, usize)> = None;
    for (mood, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood)
}

/// Consecutive days with a complete entry, ending today.
///
/// If nothing has been written today the streak is counted from yesterday,
/// so it does not reset until a full day is missed.
pub fn streak(entries: &[JournalEntry], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = entries
        .iter()
        .filter(|entry| entry.is_complete())
        .map(|entry| entry.date.date_naive())
        .collect();

    let mut expected = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut count = 0;
    while days.contains(&expected) {
        count += 1;
        match expected.pred_opt() {
            Some(previous) => expected = previous,
            None => break,
        }
    }
    count
}

/// Whether a complete entry exists for `today`.
pub fn has_journaled_today(entries: &[JournalEntry], today: NaiveDate) -> bool {
    entries
        .iter()
        .any(|entry| entry.is_complete() && entry.date.date_naive() == today)
}

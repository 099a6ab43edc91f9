//! Text and table output for entries.

use calmspace_core::journal::{EntryStatus, JournalEntry};

use crate::ui::theme::{mood_label, mood_style, styled};
use crate::ui::{divider, format_datetime, kv, short_id, simple_table, single_line, truncate};
use crate::ui::{Column, UiContext};

/// Print a single entry with its metadata.
pub fn print_entry(ui: &UiContext, entry: &JournalEntry) {
    let pretty = ui.mode.is_pretty();
    let mood = styled(&mood_label(entry.mood, ui.unicode), mood_style(entry.mood), ui.color);

    println!("{}", kv(ui, "ID", &entry.id));
    println!("{}", kv(ui, "Date", &format_datetime(&entry.date, pretty)));
    println!("{}", kv(ui, "Mood", &mood));
    if !entry.tags.is_empty() {
        println!("{}", kv(ui, "Tags", &entry.tags.join(", ")));
    }
    if entry.status == EntryStatus::Draft {
        println!("{}", kv(ui, "Status", "draft"));
    }
    println!("{}", divider(ui));
    println!("{}", entry.content);
}

/// Print entries as a table, one row each.
pub fn print_entry_list(ui: &UiContext, entries: &[&JournalEntry]) {
    let pretty = ui.mode.is_pretty();
    let content_width = ui.width.saturating_sub(60).max(20);

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let mut tags = entry.tags.join(",");
            if entry.status == EntryStatus::Draft {
                tags = if tags.is_empty() {
                    "[draft]".to_string()
                } else {
                    format!("[draft] {}", tags)
                };
            }
            let mood = if pretty {
                styled(&mood_label(entry.mood, ui.unicode), mood_style(entry.mood), ui.color)
            } else {
                entry.mood.as_str().to_string()
            };
            let content = single_line(&entry.content);
            vec![
                if pretty { short_id(&entry.id) } else { entry.id.clone() },
                format_datetime(&entry.date, pretty),
                mood,
                tags,
                if pretty { truncate(&content, content_width) } else { content },
            ]
        })
        .collect();

    let columns = [
        Column::new("ID"),
        Column::new("DATE"),
        Column::new("MOOD"),
        Column::new("TAGS"),
        Column::new("ENTRY"),
    ];
    println!("{}", simple_table(ui, &columns, &rows));
}

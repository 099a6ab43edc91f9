use calmspace_core::insights::{
    all_tags, has_journaled_today, mood_trend, most_frequent_mood, streak, TrendWindow,
};
use chrono::Utc;

use crate::app::AppContext;
use crate::cli::InsightsArgs;
use crate::errors::CliError;
use crate::output::{insights_json, InsightsSummary};
use crate::ui::format::plural;
use crate::ui::theme::{mood_label, mood_style, styled};
use crate::ui::{blank_line, header, kv, print, simple_table, Column};

pub fn handle_insights(ctx: &AppContext, args: &InsightsArgs) -> anyhow::Result<()> {
    let window: TrendWindow = args
        .window
        .parse()
        .map_err(|e| CliError::invalid_input(format!("{}", e)))?;
    let ui = ctx.ui(args.json, None);
    let journal = ctx.unlocked_journal(args.no_input, &ui)?;
    let entries = journal.entries()?;

    let now = Utc::now();
    let today = now.date_naive();
    let trend = mood_trend(entries, window, now);
    let tags = all_tags(entries);
    let window_label = window.to_string();
    let summary = InsightsSummary {
        window: &window_label,
        streak: streak(entries, today),
        journaled_today: has_journaled_today(entries, today),
        entry_count: entries.len(),
        trend: &trend,
        most_frequent_mood: most_frequent_mood(&trend),
        tags: &tags,
    };

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&insights_json(&summary))?);
        return Ok(());
    }

    print(&ui, &header(&ui, "insights", Some(&window_label)));
    print(
        &ui,
        &kv(&ui, "Streak", &plural(summary.streak as usize, "day", "days")),
    );
    print(
        &ui,
        &kv(
            &ui,
            "Today",
            if summary.journaled_today {
                "journaled"
            } else {
                "not yet"
            },
        ),
    );
    print(&ui, &kv(&ui, "Entries", &summary.entry_count.to_string()));
    let frequent = match summary.most_frequent_mood {
        Some(mood) => styled(&mood_label(mood, ui.unicode), mood_style(mood), ui.color),
        None => "-".to_string(),
    };
    print(&ui, &kv(&ui, "Most frequent mood", &frequent));
    if !tags.is_empty() {
        print(&ui, &kv(&ui, "Tags", &tags.join(", ")));
    }

    if !trend.is_empty() {
        blank_line(&ui);
        let rows: Vec<Vec<String>> = trend
            .iter()
            .map(|point| {
                let mood = point
                    .rounded_mood()
                    .map(|m| mood_label(m, ui.unicode))
                    .unwrap_or_default();
                vec![
                    point.day.to_string(),
                    format!("{:.1}", point.mood_value),
                    mood,
                ]
            })
            .collect();
        print(
            &ui,
            &simple_table(
                &ui,
                &[Column::new("DAY"), Column::new("AVERAGE"), Column::new("MOOD")],
                &rows,
            ),
        );
    }
    Ok(())
}

//! Output formatting helpers for the CLI.
//!
//! Entries and insights as JSON, tables, or plain text.

mod json;
mod text;

pub use json::{entries_json, entry_json, insights_json, InsightsSummary};
pub use text::{print_entry, print_entry_list};

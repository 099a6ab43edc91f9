//! UI primitives for the CalmSpace CLI.
//!
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges, styles, mood colors
//! - **Render**: Tables, headers, receipts, hints
//! - **Progress**: Unlock spinner
//! - **Format**: String utilities

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, header, hint, kv, print, print_error, receipt, simple_table,
    Column,
};

pub use progress::Spinner;

pub use format::{format_datetime, short_id, single_line, truncate};

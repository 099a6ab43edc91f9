//! Input and parsing helper functions for the CLI.
//!
//! - PIN prompting, mood selection and entry body reading (`input`)
//! - Mood, tag and entry id parsing (`parsing`)

mod input;
mod parsing;

pub use input::{confirm, pin_in_env, prompt_new_pin, prompt_pin, read_entry_body, select_mood};
pub use parsing::{collect_tags, parse_mood, resolve_entry};

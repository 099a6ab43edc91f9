//! Application-level utilities for the CalmSpace CLI.
//!
//! - Path and user resolution for config and journal files
//! - Lazily loaded config in [`AppContext`]
//! - PIN prompting with unlock retry

mod context;
mod resolver;
mod unlock;

pub use context::AppContext;
pub use resolver::resolve_config_path;

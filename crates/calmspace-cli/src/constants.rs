//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, journal, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong PIN).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variables read by the CLI.
pub mod env {
    pub const CONFIG: &str = "CALMSPACE_CONFIG";
    pub const PIN: &str = "CALMSPACE_PIN";
    pub const PIN_CONFIRM: &str = "CALMSPACE_PIN_CONFIRM";
    pub const LOG: &str = "CALMSPACE_LOG";
}

/// Directory name under the XDG config and data homes.
pub const APP_DIR: &str = "calmspace";

/// Default journal database file name.
pub const JOURNAL_FILE: &str = "journal.db";

/// Minimum prefix length accepted when resolving entry ids.
pub const MIN_ID_PREFIX: usize = 4;

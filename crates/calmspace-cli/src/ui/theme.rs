//! Theme definitions for colors, symbols, and badges.

use calmspace_core::journal::Mood;
use owo_colors::{OwoColorize, Style};

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
}

impl Badge {
    /// Badge text, with a symbol when unicode is enabled.
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",
            (Self::Ok, false) => "[OK]",
            (Self::Warn, true) => "[\u{26A0}]",
            (Self::Warn, false) => "[WARN]",
            (Self::Err, true) => "[\u{2717}]",
            (Self::Err, false) => "[ERR]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::green(),
            Self::Warn => styles::yellow(),
            Self::Err => styles::red(),
        }
    }
}

/// Named styles used across the renderer.
pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn green() -> Style {
        Style::new().green()
    }

    pub fn yellow() -> Style {
        Style::new().yellow()
    }

    pub fn red() -> Style {
        Style::new().red()
    }

    pub fn cyan() -> Style {
        Style::new().cyan()
    }

    pub fn magenta() -> Style {
        Style::new().magenta()
    }
}

/// Apply `style` to `text` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Color associated with each mood.
pub fn mood_style(mood: Mood) -> Style {
    match mood {
        Mood::Ecstatic => styles::magenta(),
        Mood::Happy => styles::green(),
        Mood::Neutral => styles::dim(),
        Mood::Sad => styles::cyan(),
        Mood::Anxious => styles::yellow(),
    }
}

/// Mood label, prefixed with its emoji when unicode is enabled.
pub fn mood_label(mood: Mood, unicode: bool) -> String {
    if unicode {
        format!("{} {}", mood.emoji(), mood.as_str())
    } else {
        mood.as_str().to_string()
    }
}

/// Spinner frames for unicode and ASCII terminals.
pub fn spinner_frames(unicode: bool) -> &'static [&'static str] {
    if unicode {
        &[
            "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}",
            "\u{2827}", "\u{2807}", "\u{280F}", "",
        ]
    } else {
        &["|", "/", "-", "\\", ""]
    }
}

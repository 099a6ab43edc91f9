//! String formatting utilities for UI rendering.

use chrono::{DateTime, Local, Utc};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// First 8 characters of an entry id.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Pretty output shows local time; plain output keeps RFC 3339 UTC.
pub fn format_datetime(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.with_timezone(&Local)
            .format("%a %b %-d %Y, %H:%M")
            .to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Collapse whitespace and newlines into a single line.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// "1 day" / "3 days".
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0192f1c2-aaaa-bbbb"), "0192f1c2");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_format_datetime_plain_is_rfc3339() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(format_datetime(&dt, false), "2024-03-01T09:30:00+00:00");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("one\n\ntwo   three"), "one two three");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "day", "days"), "1 day");
        assert_eq!(plural(0, "day", "days"), "0 days");
    }
}

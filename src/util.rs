//! Shared formatting helpers for table cells

use chrono::{DateTime, TimeDelta, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to at most `max_width` terminal columns, appending `…`
/// when something was cut. Wide characters (CJK, emoji) count as two.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1; // room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Pad a string with spaces to exactly `width` columns (truncating if longer)
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut cell = truncate_to_width(s, width);
    let used = cell.width();
    cell.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    cell
}

/// Format a large number with commas for readability
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, ch);
    }

    result
}

/// Compact span: `45s`, `12m`, `3h`, `9d`
pub fn format_span(span: TimeDelta) -> String {
    let secs = span.num_seconds().max(0);
    match secs {
        0..=59 => format!("{}s", secs),
        60..=3_599 => format!("{}m", secs / 60),
        3_600..=86_399 => format!("{}h", secs / 3_600),
        _ => format!("{}d", secs / 86_400),
    }
}

/// Relative age of a timestamp, e.g. `3h ago`
pub fn format_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if at > now {
        return "just now".to_string();
    }
    format!("{} ago", format_span(now - at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK character is two columns wide
        assert_eq!(truncate_to_width("日本語", 5), "日本…");
        assert_eq!(truncate_to_width("日本語", 6), "日本語");
    }

    #[test]
    fn test_truncate_to_zero() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abc…");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1000), "1,000");
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now - TimeDelta::seconds(30), now), "30s ago");
        assert_eq!(format_age(now - TimeDelta::minutes(90), now), "1h ago");
        assert_eq!(format_age(now - TimeDelta::days(3), now), "3d ago");
        assert_eq!(format_age(now + TimeDelta::minutes(1), now), "just now");
    }
}

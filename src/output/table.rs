//
//  bitbucket-api
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table rendering and cell formatting.

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Builds a table with optionally colored headers.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::output::TableBuilder;
///
/// let table = TableBuilder::new()
///     .color(false)
///     .headers(["ID", "TITLE"])
///     .row(["1", "Fix login"])
///     .build();
/// assert!(table.to_string().contains("Fix login"));
/// ```
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a state name by what it means.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "open" | "new" | "in_progress" | "running" | "inprogress" => {
            style(status).green().to_string()
        }
        "merged" | "resolved" | "completed" | "successful" => style(status).blue().to_string(),
        "declined" | "closed" | "failed" | "error" | "stopped" | "invalid" => {
            style(status).red().to_string()
        }
        "pending" | "paused" | "on hold" | "superseded" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    if !color {
        return text.to_string();
    }
    use console::style;
    if value {
        style(text).green().to_string()
    } else {
        style(text).dim().to_string()
    }
}

/// Shortens a string to `max_len` characters, ending in `...` when cut.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::output::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("a rather long title", 10), "a rathe...");
/// ```
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// "3 hours ago" style timestamps.
pub fn format_relative_time(time: &DateTime<Utc>) -> String {
    let diff = Utc::now().signed_duration_since(*time).num_seconds();
    if diff < 0 {
        return "in the future".to_string();
    }

    let (amount, unit) = match diff {
        0..=59 => return "just now".to_string(),
        60..=3_599 => (diff / 60, "minute"),
        3_600..=86_399 => (diff / 3_600, "hour"),
        86_400..=2_591_999 => (diff / 86_400, "day"),
        2_592_000..=31_535_999 => (diff / 2_592_000, "month"),
        _ => (diff / 31_536_000, "year"),
    };
    format!("{} {}{} ago", amount, unit, if amount == 1 { "" } else { "s" })
}

/// Compact durations: `45s`, `3m 20s`, `2h 5m`.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3_600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86_400 {
        format!("{}h {}m", secs / 3_600, (secs % 3_600) / 60)
    } else {
        format!("{}d {}h", secs / 86_400, (secs % 86_400) / 3_600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn test_relative_time() {
        assert_eq!(format_relative_time(&Utc::now()), "just now");
        assert_eq!(
            format_relative_time(&(Utc::now() - Duration::hours(3))),
            "3 hours ago"
        );
        assert_eq!(
            format_relative_time(&(Utc::now() - Duration::days(1))),
            "1 day ago"
        );
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(200), "3m 20s");
        assert_eq!(format_duration(7_500), "2h 5m");
    }

    #[test]
    fn test_status_without_color() {
        assert_eq!(format_status("OPEN", false), "OPEN");
        assert_eq!(format_bool(true, false), "Yes");
    }
}

//! Timeline view of the aggregated deadlines. Past items are dimmed, upcoming ones highlighted.

use crate::domain::DeadlineItem;
use chrono::{DateTime, Local, Utc};
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{Write, stdout};

/// Local, human-readable due time. Out-of-range timestamps fall back to the raw number.
pub fn format_due(due: i64) -> String {
    DateTime::<Utc>::from_timestamp(due, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| due.to_string())
}

/// One rendered timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub when: String,
    pub title: String,
    pub detail: String,
    pub url: String,
    pub past: bool,
}

pub fn entries(items: &[DeadlineItem], now: i64) -> Vec<TimelineEntry> {
    items
        .iter()
        .map(|item| {
            let mut detail = format!("{} · Status: {}", item.course, item.status);
            if let Some(late) = item.latedue {
                detail.push_str(&format!(" · late until {}", format_due(late)));
            }
            TimelineEntry {
                when: format_due(item.due),
                title: item.title.clone(),
                detail,
                url: item.url.clone(),
                past: item.is_past(now),
            }
        })
        .collect()
}

/// Print the timeline to stdout.
pub fn print_timeline(items: &[DeadlineItem]) {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Bold));
    let _ = out.execute(Print("\r\nYour DDLs\r\n"));
    let _ = out.execute(SetAttribute(Attribute::Reset));

    if items.is_empty() {
        let _ = out.execute(Print("  (nothing due)\r\n"));
        let _ = out.flush();
        return;
    }

    let now = Utc::now().timestamp();
    for entry in entries(items, now) {
        let color = if entry.past {
            Color::DarkGrey
        } else {
            Color::Cyan
        };
        let _ = out.execute(SetForegroundColor(color));
        let _ = out.execute(Print(format!("  {}  ● {}\r\n", entry.when, entry.title)));
        let _ = out.execute(SetForegroundColor(Color::DarkGrey));
        let _ = out.execute(Print(format!("                    {}\r\n", entry.detail)));
        if !entry.url.is_empty() {
            let _ = out.execute(Print(format!("                    {}\r\n", entry.url)));
        }
        let _ = out.execute(ResetColor);
    }
    let _ = out.flush();
}

/// Print provider notices (failures) in red.
pub fn print_notices(notices: &[String]) {
    let mut out = stdout();
    for notice in notices {
        let _ = out.execute(SetForegroundColor(Color::Red));
        let _ = out.execute(Print(format!("! {}\r\n", notice)));
        let _ = out.execute(ResetColor);
    }
    let _ = out.flush();
}

//! Plain-text rendering of tasks and history for the console menu.

use std::io::{self, Write};

use crate::fields::month_name;
use crate::task::{Deadline, TaskRecord, TaskSummary};

/// Render a deadline as `<day> <Month> <year>`.
///
/// A month outside 1-12 is shown as its number.
pub fn format_deadline(deadline: &Deadline) -> String {
    match month_name(deadline.month) {
        Some(month) => format!("{} {} {}", deadline.day, month, deadline.year),
        None => format!("{} {} {}", deadline.day, deadline.month, deadline.year),
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Write tasks as a fixed-width table.
pub fn write_task_table<'a, W, I>(out: &mut W, tasks: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a TaskRecord>,
{
    writeln!(
        out,
        "{:<6}{:<20}{:<10}{:<20}{}",
        "Code", "Name", "Priority", "Deadline", "Category"
    )?;
    for t in tasks {
        writeln!(
            out,
            "{:<6}{:<20}{:<10}{:<20}{}",
            t.code,
            truncate(&t.name, 19),
            t.priority,
            format_deadline(&t.deadline),
            t.category
        )?;
    }
    Ok(())
}

/// Write completed tasks, one per line.
pub fn write_completed<'a, W, I>(out: &mut W, summaries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a TaskSummary>,
{
    for s in summaries {
        writeln!(out, "- {} [priority: {}]", s.name, s.priority)?;
    }
    Ok(())
}

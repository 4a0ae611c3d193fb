//! Task data structures.
//!
//! This module defines the `TaskRecord` held by the store, the unvalidated
//! `Deadline` triple, and the reduced `TaskSummary` that survives a move into
//! the recovery or completion history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sequential task identifier, issued once and never reused.
pub type TaskCode = u64;

/// A calendar deadline as entered by the user.
///
/// Values are stored exactly as given; nothing checks that the triple names a
/// real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

impl Deadline {
    pub fn new(day: i32, month: i32, year: i32) -> Self {
        Deadline { day, month, year }
    }

    /// Ordering key used by the deadline sort: year, then month, then day.
    pub fn sort_key(&self) -> (i32, i32, i32) {
        (self.year, self.month, self.day)
    }

    /// The deadline as a calendar date, if the triple happens to be one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        let month = u32::try_from(self.month).ok()?;
        let day = u32::try_from(self.day).ok()?;
        NaiveDate::from_ymd_opt(self.year, month, day)
    }
}

/// A pending task owned by the `TaskStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub code: TaskCode,
    pub name: String,
    pub priority: i32,
    pub deadline: Deadline,
    pub category: String,
}

impl TaskRecord {
    /// Reduce the record to the fields kept in history.
    pub fn into_summary(self) -> TaskSummary {
        TaskSummary {
            name: self.name,
            priority: self.priority,
        }
    }

    /// True if `keyword` occurs in the name or the category (case-sensitive).
    pub fn matches(&self, keyword: &str) -> bool {
        self.name.contains(keyword) || self.category.contains(keyword)
    }
}

/// Name and priority of a task that has left the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub name: String,
    pub priority: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(name: &str, category: &str) -> TaskRecord {
        TaskRecord {
            code: 7,
            name: name.to_string(),
            priority: 2,
            deadline: Deadline::new(10, 6, 2025),
            category: category.to_string(),
        }
    }

    #[test]
    fn summary_keeps_only_name_and_priority() {
        let summary = record("Report", "Work").into_summary();
        assert_eq!(
            summary,
            TaskSummary {
                name: "Report".to_string(),
                priority: 2
            }
        );
    }

    #[rstest]
    #[case("Rep", true)]
    #[case("Wor", true)]
    #[case("report", false)]
    #[case("", true)]
    #[case("Home", false)]
    fn matches_name_or_category_case_sensitively(#[case] keyword: &str, #[case] expected: bool) {
        assert_eq!(record("Report", "Work").matches(keyword), expected);
    }

    #[rstest]
    #[case(Deadline::new(10, 6, 2025), NaiveDate::from_ymd_opt(2025, 6, 10))]
    #[case(Deadline::new(31, 2, 2025), None)]
    #[case(Deadline::new(1, 13, 2025), None)]
    #[case(Deadline::new(-1, 1, 2025), None)]
    fn as_date_only_for_real_dates(#[case] deadline: Deadline, #[case] expected: Option<NaiveDate>) {
        assert_eq!(deadline.as_date(), expected);
    }

    #[test]
    fn sort_key_orders_year_before_month_before_day() {
        let early = Deadline::new(31, 12, 2024);
        let late = Deadline::new(1, 1, 2025);
        assert!(early.sort_key() < late.sort_key());
    }
}

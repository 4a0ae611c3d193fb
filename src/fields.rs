//! Enumerations and lookup tables used around the task store.
//!
//! This module defines the sort keys, the store's current ordering, the
//! month-name table used for deadline rendering, and priority labels.

use clap::ValueEnum;
use serde::Serialize;

/// Available orderings for the pending task list.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SortKey {
    Priority,
    Deadline,
    Name,
}

/// Which ordering the store currently holds.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StoreOrder {
    /// Ascending priority, insertion order among equals.
    #[default]
    Priority,
    /// Ascending (year, month, day), replaced on the next insert.
    Deadline,
    /// Alphabetical by name ignoring case, replaced on the next insert.
    Name,
}

/// Month names indexed from 1. Slot 0 is unused.
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Look up the name of a 1-based month number.
pub fn month_name(month: i32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTH_NAMES[month as usize]),
        _ => None,
    }
}

/// Short label for the suggested 1-5 priority scale.
pub fn priority_label(priority: i32) -> &'static str {
    match priority {
        1 => "Critical",
        2 => "High",
        3 => "Medium",
        4 => "Low",
        5 => "Minimal",
        _ => "Custom",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, Some("Januari"))]
    #[case(6, Some("Juni"))]
    #[case(12, Some("Desember"))]
    #[case(0, None)]
    #[case(13, None)]
    #[case(-4, None)]
    fn month_lookup_is_one_based(#[case] month: i32, #[case] expected: Option<&str>) {
        assert_eq!(month_name(month), expected);
    }

    #[test]
    fn priority_outside_suggested_scale_is_custom() {
        assert_eq!(priority_label(1), "Critical");
        assert_eq!(priority_label(9), "Custom");
        assert_eq!(priority_label(-1), "Custom");
    }
}

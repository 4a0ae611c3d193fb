//! Add-task form for the terminal user interface.

use chrono::{Datelike, NaiveDate};

use crate::error::InputError;
use crate::menu::{parse_deadline, parse_number};
use crate::task::Deadline;
use crate::tui::input::InputField;

pub const NAME_FIELD: usize = 0;
pub const PRIORITY_FIELD: usize = 1;
pub const DEADLINE_FIELD: usize = 2;
pub const CATEGORY_FIELD: usize = 3;
pub const FIELD_COUNT: usize = 4;

/// Labels shown next to each field, in field order.
pub const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "Name",
    "Priority (1-5)",
    "Deadline (dd mm yyyy)",
    "Category",
];

/// Parsed form contents, ready for `TaskService::add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub priority: i32,
    pub deadline: Deadline,
    pub category: String,
}

/// Form state for a new task.
pub struct TaskForm {
    pub fields: [InputField; FIELD_COUNT],
    pub current_field: usize,
}

impl TaskForm {
    /// A blank form with priority 3 and today's date filled in.
    pub fn new(today: NaiveDate) -> Self {
        let deadline = format!("{} {} {}", today.day(), today.month(), today.year());
        let mut form = TaskForm {
            fields: [
                InputField::new(),
                InputField::with_value("3"),
                InputField::with_value(&deadline),
                InputField::new(),
            ],
            current_field: NAME_FIELD,
        };
        form.fields[NAME_FIELD].active = true;
        form
    }

    pub fn current_mut(&mut self) -> &mut InputField {
        &mut self.fields[self.current_field]
    }

    fn focus(&mut self, index: usize) {
        self.fields[self.current_field].active = false;
        self.current_field = index;
        self.fields[self.current_field].active = true;
    }

    pub fn next_field(&mut self) {
        self.focus((self.current_field + 1) % FIELD_COUNT);
    }

    pub fn prev_field(&mut self) {
        self.focus((self.current_field + FIELD_COUNT - 1) % FIELD_COUNT);
    }

    /// Parse the numeric fields. Name and category are taken as typed.
    pub fn parse(&self) -> Result<TaskDraft, InputError> {
        Ok(TaskDraft {
            name: self.fields[NAME_FIELD].value.clone(),
            priority: parse_number(&self.fields[PRIORITY_FIELD].value)?,
            deadline: parse_deadline(&self.fields[DEADLINE_FIELD].value)?,
            category: self.fields[CATEGORY_FIELD].value.clone(),
        })
    }
}

//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    TaskList,
    Completed,
    AddTask,
    Help,
    Confirm,
}

/// Input mode for the task list filter lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    None,
    Search,
    Category,
}

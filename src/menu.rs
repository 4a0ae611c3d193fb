//! Numbered text menu driving a `TaskService`.
//!
//! The menu reads one line per prompt from any `BufRead` and writes to any
//! `Write`, so a session can run against stdin/stdout or against in-memory
//! buffers. Parsing errors are reported and the menu is shown again; the
//! service is only called with fully parsed values.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::error::InputError;
use crate::render::{write_completed, write_task_table};
use crate::service::TaskService;
use crate::task::{Deadline, TaskCode};

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    ShowAll,
    Finish,
    ShowCompleted,
    Redo,
    Search,
    SortByPriority,
    SortByDeadline,
    FilterCategory,
    Snapshot,
    SortByName,
    Exit,
}

const MENU_ITEMS: [(MenuChoice, &str); 13] = [
    (MenuChoice::Add, "Add task"),
    (MenuChoice::Delete, "Delete task"),
    (MenuChoice::ShowAll, "Show all tasks"),
    (MenuChoice::Finish, "Mark task as finished"),
    (MenuChoice::ShowCompleted, "Show finished tasks"),
    (MenuChoice::Redo, "Redo last deleted task"),
    (MenuChoice::Search, "Search tasks"),
    (MenuChoice::SortByPriority, "Sort by priority"),
    (MenuChoice::SortByDeadline, "Sort by deadline"),
    (MenuChoice::FilterCategory, "Filter by category"),
    (MenuChoice::Snapshot, "Print JSON snapshot"),
    (MenuChoice::SortByName, "Sort by name"),
    (MenuChoice::Exit, "Exit"),
];

impl MenuChoice {
    fn number(self) -> usize {
        match self {
            MenuChoice::Exit => 0,
            other => MENU_ITEMS
                .iter()
                .position(|(choice, _)| *choice == other)
                .map_or(0, |i| i + 1),
        }
    }
}

impl FromStr for MenuChoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("q") {
            return Ok(MenuChoice::Exit);
        }
        let n: usize = s
            .parse()
            .map_err(|_| InputError::UnknownChoice(s.to_string()))?;
        MENU_ITEMS
            .iter()
            .map(|(choice, _)| *choice)
            .find(|choice| choice.number() == n)
            .ok_or_else(|| InputError::UnknownChoice(s.to_string()))
    }
}

/// Parse a whole number, ignoring surrounding whitespace.
pub fn parse_number<T: FromStr>(s: &str) -> Result<T, InputError> {
    let s = s.trim();
    s.parse().map_err(|_| InputError::NotANumber(s.to_string()))
}

/// Parse a deadline typed as `dd mm yyyy`. The values are not checked
/// against the calendar.
pub fn parse_deadline(s: &str) -> Result<Deadline, InputError> {
    let bad = || InputError::BadDeadline(s.trim().to_string());
    let parts: Vec<i32> = s
        .split_whitespace()
        .map(|p| p.parse().map_err(|_| bad()))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [day, month, year] => Ok(Deadline::new(*day, *month, *year)),
        _ => Err(bad()),
    }
}

#[derive(Debug, Error)]
enum StepError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Interactive read-eval loop over a task service.
pub struct Menu<'a, R, W> {
    service: &'a mut TaskService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a mut TaskService, input: R, output: W) -> Self {
        Menu {
            service,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let parsed = self
                .prompt("Choose: ")
                .and_then(|line| line.parse::<MenuChoice>().map_err(StepError::from));
            let choice = match parsed {
                Ok(choice) => choice,
                Err(StepError::Input(InputError::EndOfInput)) => break,
                Err(StepError::Input(e)) => {
                    writeln!(self.output, "{e}")?;
                    continue;
                }
                Err(StepError::Io(e)) => return Err(e),
            };
            debug!(?choice, "menu choice");

            if choice == MenuChoice::Exit {
                writeln!(self.output, "Goodbye.")?;
                break;
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(StepError::Input(InputError::EndOfInput)) => break,
                Err(StepError::Input(e)) => writeln!(self.output, "{e}")?,
                Err(StepError::Io(e)) => return Err(e),
            }
        }
        self.output.flush()
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== TASK STACK ===")?;
        for (choice, label) in MENU_ITEMS {
            writeln!(self.output, "{}. {}", choice.number(), label)?;
        }
        Ok(())
    }

    /// Print `label` and read one line without its line ending.
    fn prompt(&mut self, label: &str) -> Result<String, StepError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(InputError::EndOfInput.into());
        }
        // Invalid UTF-8 is replaced with U+FFFD.
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<(), StepError> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::Delete => {
                let code = self.prompt_code("Code of the task to delete: ")?;
                match self.service.delete(code) {
                    Ok(_) => writeln!(self.output, "Task {code} deleted; it can be restored with redo.")?,
                    Err(e) => writeln!(self.output, "{e}")?,
                }
                Ok(())
            }
            MenuChoice::ShowAll => {
                match self.service.list_all() {
                    Ok(tasks) => {
                        writeln!(self.output, "\nTask list:")?;
                        write_task_table(&mut self.output, tasks)?;
                    }
                    Err(e) => writeln!(self.output, "{e}")?,
                }
                Ok(())
            }
            MenuChoice::Finish => {
                let code = self.prompt_code("Code of the finished task: ")?;
                match self.service.finish(code) {
                    Ok(_) => writeln!(self.output, "Task {code} marked as finished.")?,
                    Err(e) => writeln!(self.output, "{e}")?,
                }
                Ok(())
            }
            MenuChoice::ShowCompleted => {
                match self.service.list_completed() {
                    Ok(done) => {
                        writeln!(self.output, "\nFinished tasks:")?;
                        write_completed(&mut self.output, done)?;
                    }
                    Err(e) => writeln!(self.output, "{e}")?,
                }
                Ok(())
            }
            MenuChoice::Redo => {
                match self.service.redo() {
                    Ok(task) => writeln!(
                        self.output,
                        "Task \"{}\" restored with code {}.",
                        task.name, task.code
                    )?,
                    Err(e) => writeln!(self.output, "{e}")?,
                }
                Ok(())
            }
            MenuChoice::Search => {
                let keyword = self.prompt("Search keyword: ")?;
                match self.service.search(&keyword) {
                    Ok(hits) => {
                        writeln!(self.output, "\nResults for \"{keyword}\":")?;
                        write_task_table(&mut self.output, hits)?;
                    }
                    Err(e) => writeln!(self.output, "{e}")?,
                }
                Ok(())
            }
            MenuChoice::SortByPriority => {
                self.service.sort_by_priority();
                writeln!(self.output, "Tasks sorted by priority.")?;
                Ok(())
            }
            MenuChoice::SortByDeadline => {
                self.service.sort_by_deadline();
                writeln!(self.output, "Tasks sorted by deadline.")?;
                Ok(())
            }
            MenuChoice::SortByName => {
                self.service.sort_by_name();
                writeln!(self.output, "Tasks sorted by name.")?;
                Ok(())
            }
            MenuChoice::FilterCategory => {
                let category = self.prompt("Category: ")?;
                match self.service.filter_by_category(&category) {
                    Ok(hits) => {
                        writeln!(self.output, "\nTasks in \"{category}\":")?;
                        write_task_table(&mut self.output, hits)?;
                    }
                    Err(e) => writeln!(self.output, "{e}")?,
                }
                Ok(())
            }
            MenuChoice::Snapshot => {
                let json = serde_json::to_string_pretty(&self.service.snapshot())
                    .map_err(io::Error::other)?;
                writeln!(self.output, "{json}")?;
                Ok(())
            }
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add(&mut self) -> Result<(), StepError> {
        let name = self.prompt("Task name: ")?;
        let priority: i32 = parse_number(&self.prompt("Priority (1-5): ")?)?;
        let deadline = parse_deadline(&self.prompt("Deadline (dd mm yyyy): ")?)?;
        let category = self.prompt("Category: ")?;

        let code = self.service.add(name.as_str(), priority, deadline, category);
        writeln!(self.output, "Task \"{name}\" added with code {code}.")?;
        Ok(())
    }

    fn prompt_code(&mut self, label: &str) -> Result<TaskCode, StepError> {
        Ok(parse_number(&self.prompt(label)?)?)
    }
}

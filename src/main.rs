//! # taskstack - In-Memory Task Tracker
//!
//! A small single-user task tracker with a numbered text menu and an optional
//! terminal user interface (TUI). All state lives in process memory and is
//! gone when the program exits.
//!
//! ## Key Features
//!
//! - **Priority Ordering**: Pending tasks stay sorted by priority (lower is
//!   more urgent); equal priorities keep the order they were added in
//! - **Redo for Deletions**: Deleted tasks go onto a stack and can be restored
//!   one at a time under a new code
//! - **Finished History**: Completed tasks are kept for the session, newest first
//! - **Search and Filter**: Case-sensitive keyword search over name and
//!   category, exact category filter
//! - **Deadline View**: Re-sort by deadline until the next task is added
//!
//! ## Quick Start
//!
//! ```bash
//! # Numbered text menu
//! taskstack
//!
//! # Start with sample tasks in the TUI, sorted by deadline
//! taskstack --sample ui --sort deadline
//!
//! # Debug logging goes to stderr
//! TASKSTACK_LOG=taskstack=debug taskstack menu
//! ```
//!
//! ## Codes and Redo
//!
//! Every task gets the next code starting at 1. Codes are never reused: a task
//! restored by redo gets a fresh code, and since only its name and priority
//! were kept it comes back with the deadline 1 Januari 2025 and category
//! "General".

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod history;
pub mod logging;
pub mod menu;
pub mod render;
pub mod service;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use logging::init_logging;
use service::TaskService;

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Menu);

    init_logging(cli.log.as_deref(), matches!(command, Commands::Ui { .. }));

    let session = || {
        let mut service = TaskService::new();
        if cli.sample {
            service.seed_samples();
        }
        service
    };

    match command {
        Commands::Menu => cmd_menu(&mut session()),
        Commands::Ui { sort } => cmd_ui(&mut session(), sort),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}

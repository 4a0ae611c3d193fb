//! Command implementations for the CLI interface.
//!
//! Each handler receives the session's `TaskService` and drives it through
//! one of the presentation surfaces: the numbered text menu or the TUI.

use std::io;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::fields::SortKey;
use crate::menu::Menu;
use crate::service::TaskService;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the numbered text menu (default).
    Menu,

    /// Launch the interactive terminal interface.
    Ui {
        /// Ordering to apply before the first render.
        #[arg(long, value_enum, default_value_t = SortKey::Priority)]
        sort: SortKey,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run the text menu on stdin/stdout.
pub fn cmd_menu(service: &mut TaskService) {
    let result = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        Menu::new(service, stdin.lock(), stdout.lock()).run()
    };
    if let Err(e) = result {
        eprintln!("Menu error: {e}");
        std::process::exit(1);
    }
    info!(pending = service.store().len(), "menu session ended");
}

/// Launch the terminal user interface.
pub fn cmd_ui(service: &mut TaskService, sort: SortKey) {
    service.sort(sort);
    if let Err(e) = run_tui(service) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

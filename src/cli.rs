use clap::Parser;

use crate::cmd::Commands;

/// In-memory task tracker with undo for deletions.
/// Nothing is saved; every session starts empty unless --sample is given.
#[derive(Parser)]
#[command(name = "taskstack", version, about = "Prioritised in-memory task tracker")]
pub struct Cli {
    /// Log filter, e.g. "taskstack=debug".
    #[arg(long, global = true, env = "TASKSTACK_LOG")]
    pub log: Option<String>,

    /// Start the session with a few sample tasks.
    #[arg(long, global = true)]
    pub sample: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["taskstack", "--sample"]).expect("valid args");
        assert!(cli.sample);
        assert!(cli.command.is_none());
    }

    #[test]
    fn ui_subcommand_accepts_global_flags() {
        let cli = Cli::try_parse_from(["taskstack", "ui", "--log", "taskstack=debug"])
            .expect("valid args");
        assert!(matches!(cli.command, Some(Commands::Ui { .. })));
        assert_eq!(cli.log.as_deref(), Some("taskstack=debug"));
    }
}

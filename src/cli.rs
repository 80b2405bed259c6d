use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::Variant;

/// In-memory to-do list. Nothing is saved; tasks live until the program exits.
#[derive(Parser)]
#[command(name = "todo", version, about = "Single-screen to-do list")]
pub struct Cli {
    /// Duplicate handling: simple allows repeated text, unique rejects it.
    /// Empty text is rejected on add and on save in both variants.
    #[arg(long, global = true, value_enum, default_value_t = Variant::Unique)]
    pub variant: Variant,

    /// Log file for the terminal UI. Defaults to todo.log in the temp directory.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "todo_list=debug". RUST_LOG overrides it.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults_and_globals() {
        let cli = Cli::try_parse_from(["todo", "ui"]).unwrap();
        assert_eq!(cli.variant, Variant::Unique);
        assert_eq!(cli.log_level, "info");
        assert!(matches!(cli.command, Commands::Ui));

        let cli = Cli::try_parse_from(["todo", "script", "events.jsonl", "--variant", "simple"]).unwrap();
        assert_eq!(cli.variant, Variant::Simple);
        match cli.command {
            Commands::Script { input } => assert_eq!(input, Some(PathBuf::from("events.jsonl"))),
            _ => panic!("expected script command"),
        }
    }
}

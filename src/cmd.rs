//! Command implementations for the CLI interface.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::controller::TaskListController;
use crate::error::AppError;
use crate::fields::Variant;
use crate::script::run_script;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal UI.
    Ui,

    /// Replay a JSON-lines event script and print state snapshots.
    Script {
        /// Script file. Reads stdin when omitted or "-".
        input: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(variant: Variant) -> Result<(), AppError> {
    run_tui(variant.policy())?;
    Ok(())
}

/// Replay a script from a file or stdin against a fresh controller.
pub fn cmd_script(variant: Variant, input: Option<PathBuf>) -> Result<(), AppError> {
    let mut controller = TaskListController::new(variant.policy());
    let mut stdout = io::stdout().lock();

    let summary = match input {
        Some(path) if path.as_os_str() != "-" => {
            info!(path = %path.display(), ?variant, "replaying script");
            let reader = BufReader::new(File::open(&path)?);
            run_script(&mut controller, reader, &mut stdout)?
        }
        _ => {
            info!(?variant, "replaying script from stdin");
            run_script(&mut controller, io::stdin().lock(), &mut stdout)?
        }
    };

    if summary.rejected > 0 {
        info!(rejected = summary.rejected, "some commands were rejected");
    }
    Ok(())
}

/// Print shell completions to stdout.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

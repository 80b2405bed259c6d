use clap::Parser;
use tracing::info;

use todo_list::cli::Cli;
use todo_list::cmd::*;
use todo_list::error::AppError;
use todo_list::logging::{default_log_file, init_tracing, LogTarget};

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Ui => {
            let log_file = cli.log_file.unwrap_or_else(default_log_file);
            let _guard = init_tracing(&cli.log_level, LogTarget::File(log_file))?;
            info!(variant = ?cli.variant, "starting todo");
            cmd_ui(cli.variant)
        }
        Commands::Script { input } => {
            let target = match cli.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Stderr,
            };
            let _guard = init_tracing(&cli.log_level, target)?;
            cmd_script(cli.variant, input)
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("todo: {e}");
        std::process::exit(1);
    }
}

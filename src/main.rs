use clap::Parser;
use doctester::cli::commands;
use doctester::cli::{Cli, Commands};
use doctester::config;
use doctester::logging::init_logging;
use doctester::DoctesterError;
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        // Continue without logging rather than aborting
    }

    let dir = config::resolve_report_dir(cli.dir.as_deref());

    let result = match cli.command {
        Commands::Status => commands::status::execute(&dir, cli.json),
        Commands::RebuildIndex => commands::rebuild_index::execute(&dir),
        Commands::Clean { force } => commands::clean::execute(&dir, force),
        Commands::Version => commands::version::execute(cli.json),
    };

    if let Err(e) = result {
        handle_error(&e, cli.json);
    }
}

/// Print the error and exit non-zero.
///
/// When --json is set or stdout is not a TTY, emits a structured JSON
/// object to stderr; otherwise a human-readable message with an optional
/// recovery suggestion.
fn handle_error(err: &DoctesterError, json_mode: bool) -> ! {
    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let payload = serde_json::json!({
            "error": err.to_string(),
            "suggestion": err.suggestion(),
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
        );
    } else {
        eprintln!("Error: {err}");
        if let Some(suggestion) = err.suggestion() {
            eprintln!("Hint: {suggestion}");
        }
    }

    std::process::exit(err.exit_code());
}

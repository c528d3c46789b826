// src/main.rs
// =============================================================================
// This is the entry point of boilerdump.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Resolve the config, token and gist id (pipeline.rs)
// 3. Download the gist (github/)
// 4. Write its files into the current directory (materialize/)
// 5. Print the gist's .boilerdump.md message
// 6. Exit with proper code (0 = success, 1 = config/argument error,
//    2 = GitHub or filesystem error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;          // src/cli.rs - command-line parsing
mod config;       // src/config/ - config file, token and aliases
mod error;        // src/error.rs - fatal errors and exit codes
mod github;       // src/github/ - GitHub gist API client
mod logging;      // src/logging.rs - --debug output
mod materialize;  // src/materialize/ - writing files to disk
mod pipeline;     // src/pipeline.rs - steps before the download

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use error::AppError;
use github::GistClient;
use materialize::{LocalFileIndex, MaterializeError};

// Printed after the gist message on every successful run
const CONFLICT_NOTICE: &str = "(Any conflicting filenames have been appended with a number)";

// The #[tokio::main] attribute transforms our async main into a real main function
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => report(&e),
    };

    std::process::exit(exit_code);
}

// This is the main application logic
//
// Every expected failure is an AppError so report() can pick the exit code.
// Anything else (like a vanished working directory) exits with 2.
async fn run(cli: Cli) -> Result<()> {
    tracing::debug!(
        gist = ?cli.gist,
        config = ?cli.config,
        token_given = cli.token.is_some(),
        "cli args"
    );

    // The warning prints right away, even if a fatal error follows
    let request = pipeline::prepare(&cli, |reason| eprintln!("{}", config_warning(reason)))?;

    let client = GistClient::new(request.token).map_err(AppError::from)?;
    let files = client
        .fetch_gist(&request.gist_id)
        .await
        .map_err(AppError::from)?;

    tracing::debug!(files = ?files.keys().collect::<Vec<_>>(), "gist files");

    let cwd = std::env::current_dir().context("could not determine the current directory")?;
    tracing::debug!(cwd = %cwd.display(), "current working directory");

    // One snapshot of the directory, taken before the first write
    let index = LocalFileIndex::snapshot(&cwd).map_err(|source| {
        AppError::from(MaterializeError::ListDir {
            path: cwd.clone(),
            source,
        })
    })?;
    tracing::debug!(existing = ?index.sorted(), "current directory files");

    let result = materialize::materialize(&cwd, &files, index).map_err(AppError::from)?;

    for file in &result.written {
        tracing::debug!(path = %file.path.display(), bytes = file.content.len(), "wrote file");
    }

    print!("{}", post_run_output(&result.message));
    Ok(())
}

// Prints a fatal error and returns the exit code for it
fn report(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<AppError>() {
        Some(app_error) => {
            eprintln!("Error: {}", app_error);
            if let Some(hint) = app_error.hint() {
                eprintln!("{}", hint);
            }
            app_error.exit_code()
        }
        None => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", error);
            2
        }
    }
}

// Tells the user their config file was ignored, and why
fn config_warning(reason: &config::ValidationError) -> String {
    format!(
        "Warning: Invalid Config ({})\n\
         Possible Issues:\n  \
         - Missing GitHub API Token\n  \
         - Entries with invalid types under \"gist\"\n\
         Make sure the JSON Schema is included and that your editor can detect schema errors.\n\
         Check the README.md for more details.",
        reason
    )
}

// The gist's .boilerdump.md content (empty if it had none) framed by blank
// lines and followed by the conflict notice
fn post_run_output(message: &str) -> String {
    format!("\n{}\n{}\n\n", message, CONFLICT_NOTICE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;

    #[test]
    fn test_config_warning_lists_both_causes() {
        let warning = config_warning(&ValidationError::InvalidAlias { index: 2 });

        assert!(warning
            .starts_with("Warning: Invalid Config (entry 2 under \"gist\" has invalid types)\n"));
        assert!(warning.contains("\n  - Missing GitHub API Token\n"));
        assert!(warning.contains("\n  - Entries with invalid types under \"gist\"\n"));
        assert!(warning.ends_with("Check the README.md for more details."));
    }

    #[test]
    fn test_post_run_output_prints_message_verbatim() {
        let message = "## Next steps\n\n  cargo run\n";
        assert_eq!(
            post_run_output(message),
            format!("\n{}\n{}\n\n", message, CONFLICT_NOTICE)
        );
        assert!(post_run_output(message).contains("\n## Next steps\n\n  cargo run\n\n(Any"));
    }

    #[test]
    fn test_post_run_output_without_message() {
        assert_eq!(
            post_run_output(""),
            "\n\n(Any conflicting filenames have been appended with a number)\n\n"
        );
    }
}

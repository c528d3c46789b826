// src/pipeline.rs
// =============================================================================
// Everything that happens before the network request:
//
// 1. Find the config file (--config, or ~/.boilerdump.jsonc)
// 2. Load and validate it
// 3. Merge in --token and make sure we have a token
// 4. Make sure a GIST argument was given
// 5. Resolve GIST through the alias table
//
// The output is a FetchRequest: which gist to download and with what token.
// An invalid config file is reported through `on_warning` as soon as it is
// found, before any of the fatal checks can end the run.
// =============================================================================

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{self, ValidationError};
use crate::error::AppError;

// What to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: String,
    pub gist_id: String,
}

// Runs steps 1-5 for the parsed command line
pub fn prepare(
    cli: &Cli,
    on_warning: impl FnOnce(&ValidationError),
) -> Result<FetchRequest, AppError> {
    let config_path = config_location(cli);

    prepare_with(
        config_path.as_deref(),
        cli.token.clone(),
        cli.gist.as_deref(),
        on_warning,
    )
}

// Same as prepare() with every input passed in explicitly
//
// Parameters:
//   config_path: where to look for the config file, None if unknown
//   cli_token: value of --token
//   gist: the positional GIST argument
//   on_warning: receives the reason an invalid config file was ignored
pub fn prepare_with(
    config_path: Option<&Path>,
    cli_token: Option<String>,
    gist: Option<&str>,
    on_warning: impl FnOnce(&ValidationError),
) -> Result<FetchRequest, AppError> {
    tracing::debug!(config = ?config_path, "config location");

    let file = match config_path {
        Some(path) => config::load_file(path)?,
        None => None,
    };

    // The token is checked before the GIST argument, so a user with no
    // setup at all learns about the token first
    let config = config::resolve(file, cli_token, on_warning)?;

    // An empty id would request /gists/, which lists gists instead
    let requested = gist.filter(|g| !g.is_empty()).ok_or(AppError::MissingGist)?;
    let gist_id = config::resolve_alias(requested, &config);
    if gist_id.is_empty() {
        return Err(AppError::MissingGist);
    }
    tracing::debug!(requested, gist_id = %gist_id, "resolved gist id");

    Ok(FetchRequest {
        token: config.credential,
        gist_id,
    })
}

// Config file to read: --config if given, else ~/.boilerdump.jsonc
pub fn config_location(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(config::default_config_path)
}

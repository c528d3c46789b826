// src/error.rs
// =============================================================================
// Fatal errors of a boilerdump run, and how each one exits.
//
// Exit codes:
//   1 = bad configuration or arguments (the user can fix their command)
//   2 = GitHub or the local filesystem failed
// =============================================================================

use thiserror::Error;

use crate::config::ConfigError;
use crate::github::FetchError;
use crate::materialize::MaterializeError;

/// Everything that can stop a run.
#[derive(Debug, Error)]
pub enum AppError {
    /// No positional GIST argument was given.
    #[error("Missing a gist id or alias")]
    MissingGist,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::MissingGist | AppError::Config(_) => 1,
            AppError::Fetch(_) | AppError::Materialize(_) => 2,
        }
    }

    // Extra lines telling the user how to fix the problem
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::MissingToken) => Some(
                "Be sure to include a GitHub API Token in either your config\n\
                 or with the --token flag.\n\
                 Example: boilerdump --token=YOUR_TOKEN GIST_ID",
            ),
            AppError::MissingGist => Some("Example: boilerdump GIST_ID_OR_ALIAS"),
            AppError::Fetch(FetchError::Unauthorized { .. }) => {
                Some("Check that your GitHub API Token is valid and has the gist scope.")
            }
            _ => None,
        }
    }
}

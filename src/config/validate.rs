// src/config/validate.rs
// =============================================================================
// This module turns the untyped contents of the config file into a typed
// Config, or rejects it.
//
// The config file is user-edited JSON with comments, so anything can be in
// it. We only trust two fields:
// - "github_api_token": must be a string
// - "gist": optional list of { "name": string, "id": string } aliases
//
// Everything else in the file is ignored and dropped. One bad alias entry
// rejects the whole file, we never keep half of an alias list.
//
// Rust concepts:
// - serde_json::Value: An enum that can hold any JSON value
// - Result<T, E>: Valid config or the reason it was rejected
// - thiserror: Derives std::error::Error for our error enum
// =============================================================================

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// JSON key holding the GitHub API token.
const TOKEN_KEY: &str = "github_api_token";

/// JSON key holding the alias list.
const ALIASES_KEY: &str = "gist";

// A validated configuration
//
// After resolution `credential` is always a non-empty token. Before that
// (straight out of the validator) it may be empty; the resolver decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Token used to authenticate against the GitHub API
    #[serde(rename = "github_api_token")]
    pub credential: String,
    /// User-defined short names for gist ids, in file order
    #[serde(rename = "gist", skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<AliasEntry>>,
}

// One alias from the "gist" list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    /// Short name typed on the command line
    pub name: String,
    /// Gist id the name stands for
    pub id: String,
}

/// Why a config file was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The token is missing or is not a string.
    #[error("missing GitHub API token")]
    MissingToken,

    /// An entry under "gist" is not a `{ name, id }` pair of strings.
    #[error("entry {index} under \"gist\" has invalid types")]
    InvalidAlias {
        /// Position of the first bad entry in the list.
        index: usize,
    },

    /// The file could not be parsed as JSON with comments.
    #[error("config file is not valid JSONC: {message}")]
    Unparsable {
        /// Parser error detail.
        message: String,
    },
}

// Validates a raw config record
//
// Parameters:
//   raw: the parsed config file, any JSON shape
//
// Returns:
//   Ok(Config) with only the recognized fields
//   Err(ValidationError) if the token is missing or any alias is malformed
pub fn validate(raw: &Value) -> Result<Config, ValidationError> {
    // .get() on a non-object Value returns None, so a config file that is
    // an array or a bare string lands here too
    let credential = raw
        .get(TOKEN_KEY)
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingToken)?
        .to_string();

    let aliases = match raw.get(ALIASES_KEY).and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => Some(validate_aliases(entries)?),
        // Absent, not a list, or an empty list: no alias table
        _ => None,
    };

    Ok(Config {
        credential,
        aliases,
    })
}

// Checks every alias entry, failing on the first bad one
fn validate_aliases(entries: &[Value]) -> Result<Vec<AliasEntry>, ValidationError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = entry.get("name").and_then(Value::as_str);
            let id = entry.get("id").and_then(Value::as_str);

            match (name, id) {
                (Some(name), Some(id)) => Ok(AliasEntry {
                    name: name.to_string(),
                    id: id.to_string(),
                }),
                _ => Err(ValidationError::InvalidAlias { index }),
            }
        })
        // Collecting an iterator of Results stops at the first Err
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not #[derive(Deserialize)] on Config directly?
//    - serde would give one error for the first bad field, with no way to
//      say "the token is fine but alias 3 is broken"
//    - Walking a serde_json::Value lets us decide exactly what counts as
//      valid and what gets ignored
//
// 2. What does .collect() into Result<Vec<_>, _> do?
//    - It gathers the Ok values into a Vec
//    - It stops at the first Err and returns that Err instead
// -----------------------------------------------------------------------------

// src/config/alias.rs
// =============================================================================
// Resolves the positional GIST argument through the user's alias table.
//
// Example config:
//   "gist": [ { "name": "rust", "id": "aa5a315d61ae9438b18d" } ]
//
//   boilerdump rust            -> fetches gist aa5a315d61ae9438b18d
//   boilerdump 0123456789abcd  -> no alias matches, used as the id as-is
//
// Lookup is an exact, case-sensitive match and the first entry wins when
// a name appears more than once.
// =============================================================================

use super::Config;

// Maps a requested name to a gist id
//
// Never fails: an unknown name is assumed to already be a gist id.
pub fn resolve_alias(requested: &str, config: &Config) -> String {
    config
        .aliases
        .iter()
        .flatten()
        .find(|alias| alias.name == requested)
        .map(|alias| alias.id.clone())
        .unwrap_or_else(|| requested.to_string())
}

// src/config/mod.rs
// =============================================================================
// This module handles the user's configuration.
//
// Submodules:
// - validate: Turns the raw config file into a typed Config
// - resolve: Loads the file and merges it with command-line flags
// - alias: Maps short alias names to gist ids
// =============================================================================

mod alias;
mod resolve;
mod validate;

pub use alias::resolve_alias;
pub use resolve::{default_config_path, load_file, resolve, ConfigError};
pub use validate::{Config, ValidationError};

#[cfg(test)]
pub use validate::AliasEntry;

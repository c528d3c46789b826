// src/config/resolve.rs
// =============================================================================
// Loads the config file and merges it with the --token flag.
//
// Precedence (highest first):
// 1. --token flag
// 2. "github_api_token" in the config file
//
// A missing config file is fine. A config file that exists but fails
// validation is reported as a warning and then ignored completely,
// including its aliases. Ending up with no token at all is fatal.
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::validate::{validate, Config, ValidationError};

/// Name of the config file looked up in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".boilerdump.jsonc";

/// Fatal configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the config file nor --token supplied a token.
    #[error("No GitHub API Token Provided")]
    MissingToken,

    /// The config file exists but could not be read.
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        /// Location of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

// Returns ~/.boilerdump.jsonc, or None when there is no home directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE))
}

// Reads and validates the config file at `path`
//
// Returns:
//   Ok(None)          the file does not exist
//   Ok(Some(Ok(_)))   the file is a valid config
//   Ok(Some(Err(_)))  the file exists but is unparsable or invalid
//   Err(_)            the file exists but could not be read
pub fn load_file(path: &Path) -> Result<Option<Result<Config, ValidationError>>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file found");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    // json5 is a superset of JSON that accepts comments and trailing
    // commas, which covers everything a .jsonc file can contain
    let parsed = json5::from_str::<Value>(&text)
        .map_err(|e| ValidationError::Unparsable {
            message: e.to_string(),
        })
        .and_then(|raw| validate(&raw));

    Ok(Some(parsed))
}

// Merges the file config with the --token override
//
// Parameters:
//   file: result of load_file(), None when there was no file
//   cli_token: value of --token, if given
//   on_warning: called with the reason the file was ignored, before the
//     token check, so the user sees it even when resolution then fails
//
// Returns: the merged config, or ConfigError::MissingToken when no
// non-empty token came from either source
pub fn resolve(
    file: Option<Result<Config, ValidationError>>,
    cli_token: Option<String>,
    on_warning: impl FnOnce(&ValidationError),
) -> Result<Config, ConfigError> {
    let mut config = match file {
        Some(Ok(config)) => config,
        Some(Err(reason)) => {
            tracing::debug!(%reason, "ignoring invalid config file");
            on_warning(&reason);
            Config::default()
        }
        None => Config::default(),
    };

    // The flag always wins over the file
    if let Some(token) = cli_token {
        config.credential = token;
    }

    if config.credential.is_empty() {
        return Err(ConfigError::MissingToken);
    }

    tracing::debug!(
        token = "<redacted>",
        aliases = config.aliases.as_ref().map_or(0, Vec::len),
        "resolved config"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AliasEntry;
    use std::fs;
    use tempfile::TempDir;

    fn file_config(token: &str) -> Config {
        Config {
            credential: token.to_string(),
            aliases: Some(vec![AliasEntry {
                name: "a".to_string(),
                id: "1".to_string(),
            }]),
        }
    }

    // Resolves without caring about warnings
    fn resolve_quietly(
        file: Option<Result<Config, ValidationError>>,
        cli_token: Option<&str>,
    ) -> Result<Config, ConfigError> {
        resolve(file, cli_token.map(str::to_string), |_| {})
    }

    #[test]
    fn test_file_config_is_the_base() {
        let mut warned = false;
        let config =
            resolve(Some(Ok(file_config("from-file"))), None, |_| warned = true).unwrap();
        assert_eq!(config, file_config("from-file"));
        assert!(!warned);
    }

    #[test]
    fn test_cli_token_overrides_file_token() {
        let config = resolve_quietly(Some(Ok(file_config("from-file"))), Some("from-cli")).unwrap();
        assert_eq!(config.credential, "from-cli");
        // Aliases from the file survive the override
        assert_eq!(config.aliases, file_config("").aliases);
    }

    #[test]
    fn test_cli_token_without_file() {
        let config = resolve_quietly(None, Some("T")).unwrap();
        assert_eq!(config.credential, "T");
        assert_eq!(config.aliases, None);
    }

    #[test]
    fn test_invalid_file_becomes_warning() {
        let mut warning = None;
        let config = resolve(
            Some(Err(ValidationError::InvalidAlias { index: 0 })),
            Some("T".to_string()),
            |reason| warning = Some(reason.clone()),
        )
        .unwrap();

        assert_eq!(config.credential, "T");
        assert_eq!(config.aliases, None);
        assert_eq!(warning, Some(ValidationError::InvalidAlias { index: 0 }));
    }

    #[test]
    fn test_warning_is_reported_even_when_token_is_missing() {
        let mut warning = None;
        let result = resolve(
            Some(Err(ValidationError::InvalidAlias { index: 0 })),
            None,
            |reason| warning = Some(reason.clone()),
        );

        assert!(matches!(result, Err(ConfigError::MissingToken)));
        assert_eq!(warning, Some(ValidationError::InvalidAlias { index: 0 }));
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let result = resolve_quietly(Some(Err(ValidationError::MissingToken)), None);
        assert!(matches!(result, Err(ConfigError::MissingToken)));

        let result = resolve_quietly(None, None);
        assert!(matches!(result, Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_empty_token_is_fatal() {
        let result = resolve_quietly(Some(Ok(file_config(""))), None);
        assert!(matches!(result, Err(ConfigError::MissingToken)));

        let result = resolve_quietly(Some(Ok(file_config("from-file"))), Some(""));
        assert!(matches!(result, Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let loaded = load_file(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_file_with_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"{
                // token for the API
                "github_api_token": "abc",
                /* aliases */
                "gist": [
                    { "name": "rust", "id": "42" },
                ],
            }"#,
        )
        .unwrap();

        let config = load_file(&path).unwrap().unwrap().unwrap();
        assert_eq!(config.credential, "abc");
        assert_eq!(config.aliases.unwrap()[0].id, "42");
    }

    #[test]
    fn test_load_unparsable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let loaded = load_file(&path).unwrap().unwrap();
        assert!(matches!(loaded, Err(ValidationError::Unparsable { .. })));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = load_file(dir.path());
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

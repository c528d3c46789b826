// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   boilerdump [--config <path>] [--token <token>] [--debug] <GIST>
//
// GIST is a gist id or an alias from the config file.
//
// Note that GIST is an Option here even though it is required. If clap
// enforced it, a missing GIST would exit with clap's usage error (code 2).
// We want our own message and exit code 1, so run() checks it instead.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to generate the parsing code from the fields
#[derive(Parser, Debug)]
#[command(
    name = "boilerdump",
    version,
    about = "Dump the files of a GitHub gist into the current directory",
    long_about = "boilerdump downloads a gist and writes its files into the current directory. \
                  Files that would clash with existing ones get a number appended. \
                  A file named .boilerdump.md in the gist is printed instead of written."
)]
pub struct Cli {
    /// Gist id, or an alias defined under "gist" in the config file
    pub gist: Option<String>,

    /// Path to the config file (default: ~/.boilerdump.jsonc)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub API token, overrides "github_api_token" from the config file
    ///
    /// Accepts both --token TOKEN and --token=TOKEN
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Print debug output to stderr
    #[arg(long)]
    pub debug: bool,
}

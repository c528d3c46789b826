// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub gists API.
//
// Submodules:
// - gist: The fetched file set and the API response shapes
// - fetch: The HTTP client that downloads a gist
// =============================================================================

mod fetch;
mod gist;

pub use fetch::{FetchError, GistClient};
pub use gist::RemoteFileSet;

#[cfg(test)]
pub use gist::RemoteFile;

// src/github/gist.rs
// =============================================================================
// Data types for a fetched gist.
//
// The GitHub API returns a gist's files as a JSON object keyed by filename:
//
//   "files": {
//     "main.rs": { "filename": "main.rs", "content": "fn main() {}", ... },
//     ".boilerdump.md": { "filename": ".boilerdump.md", "content": "..." }
//   }
//
// We keep both the key and the nested filename, and we keep the order
// GitHub sent them in (serde_json's preserve_order feature).
// =============================================================================

use serde::Deserialize;

// One file of a gist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// The nested "filename" field, used as the name on disk
    pub filename: String,
    /// File contents
    pub content: String,
}

impl RemoteFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

// All files of a gist, keyed by their map key, in API order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteFileSet {
    entries: Vec<(String, RemoteFile)>,
}

impl RemoteFileSet {
    /// Iterates `(key, file)` pairs in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RemoteFile)> {
        self.entries.iter().map(|(key, file)| (key.as_str(), file))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K: Into<String>> FromIterator<(K, RemoteFile)> for RemoteFileSet {
    fn from_iter<I: IntoIterator<Item = (K, RemoteFile)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, file)| (key.into(), file))
                .collect(),
        }
    }
}

// Shape of one entry under "files" in the API response
//
// "content" is null for files GitHub will not inline (binary files)
#[derive(Debug, Deserialize)]
pub(super) struct ApiFile {
    pub filename: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub truncated: bool,
}

// The part of GET /gists/{id} we care about
#[derive(Debug, Deserialize)]
pub(super) struct ApiGist {
    pub files: serde_json::Map<String, serde_json::Value>,
}

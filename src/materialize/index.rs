// src/materialize/index.rs
// =============================================================================
// LocalFileIndex: the names already taken in the target directory.
//
// The directory is listed once, before the first write. After that the
// writer only adds the names it picks itself; the disk is never re-read.
// =============================================================================

use std::collections::HashSet;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFileIndex {
    names: HashSet<String>,
}

impl LocalFileIndex {
    // Lists the entries of `dir` (files, folders and links alike, since
    // any of them blocks a file of the same name)
    pub fn snapshot(dir: &Path) -> io::Result<Self> {
        let mut names = HashSet::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(Self { names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Records a name as taken. Returns false if it already was.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Names in sorted order, for log output.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for LocalFileIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

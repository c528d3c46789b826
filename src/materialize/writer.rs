// src/materialize/writer.rs
// =============================================================================
// This module writes a fetched gist into a directory.
//
// For every file in the gist:
// 1. If its key is ".boilerdump.md", keep its content as the message to
//    print after the run. It is never written.
// 2. Otherwise start from its "filename". While that name is taken, try
//    filename0, filename1, ... until a free one turns up.
// 3. Mark the chosen name as taken and write the file.
//
// Step 3 marks names as taken as we go, so two gist files that share a
// filename end up as "notes.txt" and "notes.txt0" instead of the second
// one overwriting the first.
//
// There is no rollback. If a write fails, the files before it stay.
//
// Rust concepts:
// - Lifetimes: Plan<'a> borrows contents from the RemoteFileSet
// - PathBuf: Owned filesystem paths
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::index::LocalFileIndex;
use crate::github::RemoteFileSet;

/// Gist file printed to the terminal instead of being written.
pub const RESERVED_MESSAGE_FILE: &str = ".boilerdump.md";

/// Errors from writing gist files to disk.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The target directory could not be listed.
    #[error("could not list directory {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A gist filename would land outside the target directory.
    #[error("refusing to write gist file with unsafe name '{filename}'")]
    UnsafeFilename { filename: String },

    /// Writing one of the files failed.
    #[error("could not write '{filename}': {source}")]
    Write {
        filename: String,
        #[source]
        source: io::Error,
    },
}

// A file we are about to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite<'a> {
    /// Collision-free name inside the target directory
    pub name: String,
    pub content: &'a str,
}

// Everything the writer will do, decided before touching the disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan<'a> {
    /// Files to write, in gist order
    pub writes: Vec<PlannedWrite<'a>>,
    /// Content of .boilerdump.md, or "" when the gist has none
    pub message: &'a str,
}

// A file that made it to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub content: String,
}

// Result of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Materialized {
    pub written: Vec<WrittenFile>,
    pub message: String,
}

// Picks a name for every gist file without writing anything
//
// Parameters:
//   files: the fetched gist
//   index: names already present in the target directory
//
// Returns: the plan, or UnsafeFilename if any filename is not a plain name
pub fn plan(files: &RemoteFileSet, mut index: LocalFileIndex) -> Result<Plan<'_>, MaterializeError> {
    let mut plan = Plan::default();

    for (key, file) in files.iter() {
        // The map key decides, not the nested filename
        if key == RESERVED_MESSAGE_FILE {
            plan.message = &file.content;
            continue;
        }

        if !is_plain_filename(&file.filename) {
            return Err(MaterializeError::UnsafeFilename {
                filename: file.filename.clone(),
            });
        }

        let name = free_name(&file.filename, &index);
        tracing::debug!(key, name = %name, "picked filename");

        index.insert(name.clone());
        plan.writes.push(PlannedWrite {
            name,
            content: &file.content,
        });
    }

    Ok(plan)
}

// Plans and performs all writes into `dir`
//
// Returns: the written files in gist order plus the post-run message
pub fn materialize(
    dir: &Path,
    files: &RemoteFileSet,
    index: LocalFileIndex,
) -> Result<Materialized, MaterializeError> {
    tracing::debug!(existing = index.len(), incoming = files.len(), "materializing gist");

    let plan = plan(files, index)?;
    let mut written = Vec::with_capacity(plan.writes.len());

    for write in plan.writes {
        let path = dir.join(&write.name);

        std::fs::write(&path, write.content).map_err(|source| MaterializeError::Write {
            filename: write.name.clone(),
            source,
        })?;

        written.push(WrittenFile {
            path,
            content: write.content.to_string(),
        });
    }

    Ok(Materialized {
        written,
        message: plan.message.to_string(),
    })
}

// First name in filename, filename0, filename1, ... that is not taken
fn free_name(filename: &str, index: &LocalFileIndex) -> String {
    let mut candidate = filename.to_string();
    let mut attempt: u32 = 0;

    while index.contains(&candidate) {
        candidate = format!("{filename}{attempt}");
        attempt += 1;
    }

    candidate
}

// Gists are flat, so a name with a separator (or "..") is never legitimate
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RemoteFile;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn gist(files: &[(&str, &str, &str)]) -> RemoteFileSet {
        files
            .iter()
            .map(|(key, filename, content)| (*key, RemoteFile::new(*filename, *content)))
            .collect()
    }

    fn index(names: &[&str]) -> LocalFileIndex {
        names.iter().copied().collect()
    }

    fn names<'a>(plan: &'a Plan<'_>) -> Vec<&'a str> {
        plan.writes.iter().map(|w| w.name.as_str()).collect()
    }

    #[rstest]
    #[case::free(&[], "f.txt")]
    #[case::taken(&["f.txt"], "f.txt0")]
    #[case::taken_twice(&["f.txt", "f.txt0"], "f.txt1")]
    #[case::gap(&["f.txt", "f.txt1"], "f.txt0")]
    #[case::unrelated(&["g.txt", "f.txt0"], "f.txt")]
    fn test_collision_suffix(#[case] existing: &[&str], #[case] expected: &str) {
        let files = gist(&[("f.txt", "f.txt", "x")]);
        let planned = plan(&files, index(existing)).unwrap();
        assert_eq!(names(&planned), vec![expected]);
    }

    #[test]
    fn test_reserved_file_becomes_message() {
        let files = gist(&[
            ("main.rs", "main.rs", "fn main() {}"),
            (".boilerdump.md", ".boilerdump.md", "Next: cargo run"),
        ]);

        let planned = plan(&files, index(&[])).unwrap();

        assert_eq!(names(&planned), vec!["main.rs"]);
        assert_eq!(planned.message, "Next: cargo run");
    }

    #[test]
    fn test_reserved_check_uses_key_not_filename() {
        // Key is reserved, nested filename is not: still diverted
        let files = gist(&[(".boilerdump.md", "notes.md", "hello")]);
        let planned = plan(&files, index(&[])).unwrap();
        assert!(planned.writes.is_empty());
        assert_eq!(planned.message, "hello");

        // Nested filename is reserved, key is not: written like any file
        let files = gist(&[("notes.md", ".boilerdump.md", "hello")]);
        let planned = plan(&files, index(&[])).unwrap();
        assert_eq!(names(&planned), vec![".boilerdump.md"]);
        assert_eq!(planned.message, "");
    }

    #[test]
    fn test_duplicate_filenames_do_not_overwrite() {
        let files = gist(&[
            ("a", "notes.txt", "first"),
            ("b", "notes.txt", "second"),
            ("c", "notes.txt", "third"),
        ]);

        let planned = plan(&files, index(&["notes.txt"])).unwrap();

        assert_eq!(names(&planned), vec!["notes.txt0", "notes.txt1", "notes.txt2"]);
    }

    #[test]
    fn test_output_follows_gist_order() {
        let files = gist(&[
            ("z.rs", "z.rs", "z"),
            ("a.rs", "a.rs", "a"),
            ("m.rs", "m.rs", "m"),
        ]);
        let planned = plan(&files, index(&[])).unwrap();
        assert_eq!(names(&planned), vec!["z.rs", "a.rs", "m.rs"]);
    }

    #[rstest]
    #[case::parent("../escape.txt")]
    #[case::nested("dir/file.txt")]
    #[case::windows("dir\\file.txt")]
    #[case::dot_dot("..")]
    #[case::empty("")]
    fn test_unsafe_filenames_are_rejected(#[case] filename: &str) {
        let files = gist(&[("ok.txt", "ok.txt", "ok"), ("bad", filename, "bad")]);
        let result = plan(&files, index(&[]));
        assert!(matches!(
            result,
            Err(MaterializeError::UnsafeFilename { filename: f }) if f == filename
        ));
    }

    #[test]
    fn test_materialize_writes_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.rs"), "old").unwrap();

        let files = gist(&[
            ("main.rs", "main.rs", "new"),
            ("lib.rs", "lib.rs", "pub fn f() {}"),
            (".boilerdump.md", ".boilerdump.md", "done"),
        ]);
        let index = LocalFileIndex::snapshot(dir.path()).unwrap();

        let result = materialize(dir.path(), &files, index).unwrap();

        let paths: Vec<PathBuf> = result.written.iter().map(|w| w.path.clone()).collect();
        assert_eq!(paths, vec![dir.path().join("main.rs0"), dir.path().join("lib.rs")]);
        assert_eq!(result.message, "done");

        // The existing file is untouched and the reserved file is not on disk
        assert_eq!(fs::read_to_string(dir.path().join("main.rs")).unwrap(), "old");
        assert_eq!(fs::read_to_string(dir.path().join("main.rs0")).unwrap(), "new");
        assert!(!dir.path().join(".boilerdump.md").exists());
    }

    #[test]
    fn test_write_failure_names_the_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-there");

        let files = gist(&[("a.txt", "a.txt", "a")]);
        let result = materialize(&missing, &files, index(&[]));

        match result {
            Err(MaterializeError::Write { filename, .. }) => assert_eq!(filename, "a.txt"),
            other => panic!("expected write error, got {other:?}"),
        }
    }

    #[test]
    fn test_files_before_a_failed_write_stay_on_disk() {
        let dir = TempDir::new().unwrap();
        // A folder named like the second file makes its write fail. The
        // index is empty, as if the folder appeared after the snapshot.
        fs::create_dir(dir.path().join("b.txt")).unwrap();

        let files = gist(&[
            ("a.txt", "a.txt", "first"),
            ("b.txt", "b.txt", "second"),
            ("c.txt", "c.txt", "third"),
        ]);
        let result = materialize(dir.path(), &files, index(&[]));

        match result {
            Err(MaterializeError::Write { filename, .. }) => assert_eq!(filename, "b.txt"),
            other => panic!("expected write error, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "first");
        assert!(!dir.path().join("c.txt").exists());
    }
}

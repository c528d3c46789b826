// src/materialize/mod.rs
// =============================================================================
// This module puts a fetched gist on disk.
//
// Submodules:
// - index: Snapshot of the names already present in the target directory
// - writer: Collision-free naming and the actual file writes
// =============================================================================

mod index;
mod writer;

pub use index::LocalFileIndex;
pub use writer::{materialize, MaterializeError};

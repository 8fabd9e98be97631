//! Read-only browsing operations over the allowed-directory boundary.
//!
//! Every operation validates its path(s) through [`Context::validate_path`]
//! before touching the filesystem. Single-path operations fail the whole
//! request on denial or IO error; the batch read and recursive search
//! isolate per-item failures instead.

use crate::boundary::AllowedDirectories;

mod context;
mod io;
mod list_dir;
mod patterns;
mod read;
mod read_many;
mod search;
mod stat;
mod tree;

pub use list_dir::{ListDirEntry, ListDirRequest, ListDirResponse, list_dir};
pub use read::{ReadRequest, ReadResponse, read_file};
pub use read_many::{ReadManyRequest, ReadManyResponse, read_many_files};
pub use search::{SearchRequest, SearchResponse, search_files};
pub use stat::{StatRequest, StatResponse, stat_file};
pub use tree::{EntryKind, TreeEntry, TreeRequest, TreeResponse, build_tree};

/// Shared state for all operations: a handle to the allowed-directory store.
pub struct Context {
    allowed: AllowedDirectories,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("allowed", &self.allowed.snapshot())
            .finish()
    }
}

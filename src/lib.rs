//! `fs-browse` provides read-only, boundary-checked filesystem browsing for
//! protocol bridges.
//!
//! The crate enforces a dynamically updatable set of allowed directories
//! in-process and offers stable request/response types for read (full, head,
//! tail, line-range), batch read, list, tree, search, and stat operations.
//! Every request path passes a two-stage containment check (lexical, then
//! post-symlink-resolution) before any filesystem access.

mod boundary;
mod error;
pub mod guard;
mod normalize;
pub mod ops;
pub mod roots;

pub use boundary::AllowedDirectories;
pub use error::{Error, Result};
pub use normalize::{expand_home, normalize};

pub use ops::{
    Context, EntryKind, ListDirEntry, ListDirRequest, ListDirResponse, ReadManyRequest,
    ReadManyResponse, ReadRequest, ReadResponse, SearchRequest, SearchResponse, StatRequest,
    StatResponse, TreeEntry, TreeRequest, TreeResponse, build_tree, list_dir, read_file,
    read_many_files, search_files, stat_file,
};
pub use roots::{RootCandidate, update_allowed_directories, valid_root_directories};

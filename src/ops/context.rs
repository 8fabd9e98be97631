use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::boundary::AllowedDirectories;
use crate::error::{Error, Result};
use crate::roots::RootCandidate;
use crate::{guard, normalize};

use super::{
    Context, ListDirRequest, ListDirResponse, ReadManyRequest, ReadManyResponse, ReadRequest,
    ReadResponse, SearchRequest, SearchResponse, StatRequest, StatResponse, TreeRequest,
    TreeResponse,
};

impl Context {
    /// Builds a context from the startup boundary set.
    ///
    /// Each directory is home-expanded, absolutized and canonicalized, and
    /// must exist as a directory. Unlike runtime root updates, startup
    /// validation is strict: a bad entry is a configuration error, not a
    /// skippable candidate.
    pub fn new(dirs: Vec<String>) -> Result<Self> {
        if dirs.is_empty() {
            return Err(Error::InvalidRoot(
                "no allowed directories configured".to_string(),
            ));
        }
        let mut validated = Vec::with_capacity(dirs.len());
        for dir in &dirs {
            let expanded = normalize::expand_home(dir);
            let absolute = normalize::resolve_absolute(&expanded)?;
            let canonical = absolute.canonicalize().map_err(|err| {
                Error::InvalidRoot(format!(
                    "failed to resolve allowed directory {}: {err}",
                    absolute.display()
                ))
            })?;
            let meta = fs::metadata(&canonical).map_err(|err| {
                Error::InvalidRoot(format!(
                    "failed to stat allowed directory {}: {err}",
                    canonical.display()
                ))
            })?;
            if !meta.is_dir() {
                return Err(Error::InvalidRoot(format!(
                    "allowed directory {} is not a directory",
                    canonical.display()
                )));
            }
            validated.push(normalize::normalize(&canonical.to_string_lossy()));
        }
        Ok(Self {
            allowed: AllowedDirectories::new(validated),
        })
    }

    /// Builds a context around an existing store handle, for hosts that own
    /// the store themselves (e.g. to share it with a transport layer).
    pub fn with_store(allowed: AllowedDirectories) -> Self {
        Self { allowed }
    }

    pub fn allowed_directories(&self) -> &AllowedDirectories {
        &self.allowed
    }

    pub fn allowed_snapshot(&self) -> Vec<String> {
        self.allowed.snapshot()
    }

    /// Routes a peer roots announcement into the store; see
    /// [`crate::roots::update_allowed_directories`].
    pub fn update_allowed_directories(&self, candidates: &[RootCandidate]) {
        crate::roots::update_allowed_directories(&self.allowed, candidates);
    }

    /// Validates a requested path against the boundary and returns the path
    /// operations should use.
    ///
    /// Two-stage check: stage 1 is lexical (home expansion, absolutization,
    /// normalization, containment), blocking traversal before any disk
    /// access; stage 2 resolves symlinks and re-checks containment of the
    /// real path, blocking links that lexically sit inside the boundary but
    /// point outside it. A path that does not exist on the real filesystem is
    /// returned unresolved: entries visible only through a virtual filesystem
    /// overlay have no real path, and stage 1 already vetted them.
    pub fn validate_path(&self, requested: &str) -> Result<PathBuf> {
        // One snapshot for both stages: a boundary update landing between
        // them must not let the two checks disagree.
        let allowed = self.allowed.snapshot();

        let expanded = normalize::expand_home(requested);
        let absolute = normalize::resolve_absolute(&expanded)?;
        let normalized = normalize::normalize(&absolute.to_string_lossy());

        if !guard::is_path_within_allowed(&normalized, &allowed)? {
            return Err(Error::PathOutsideAllowed {
                path: absolute,
                allowed: allowed.join(", "),
            });
        }

        match absolute.canonicalize() {
            Ok(real) => {
                let normalized_real = normalize::normalize(&real.to_string_lossy());
                if !guard::is_path_within_allowed(&normalized_real, &allowed)? {
                    return Err(Error::SymlinkOutsideAllowed {
                        path: real,
                        allowed: allowed.join(", "),
                    });
                }
                Ok(real)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(absolute),
            Err(err) => Err(Error::io_path("canonicalize", absolute, err)),
        }
    }

    pub fn read_file(&self, request: ReadRequest) -> Result<ReadResponse> {
        super::read_file(self, request)
    }

    pub fn read_many_files(&self, request: ReadManyRequest) -> Result<ReadManyResponse> {
        super::read_many_files(self, request)
    }

    pub fn list_dir(&self, request: ListDirRequest) -> Result<ListDirResponse> {
        super::list_dir(self, request)
    }

    pub fn build_tree(&self, request: TreeRequest) -> Result<TreeResponse> {
        super::build_tree(self, request)
    }

    pub fn search_files(&self, request: SearchRequest) -> Result<SearchResponse> {
        super::search_files(self, request)
    }

    pub fn stat_file(&self, request: StatRequest) -> Result<StatResponse> {
        super::stat_file(self, request)
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::Result;

use super::patterns;
use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub path: String,
    pub pattern: String,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub matches: Vec<PathBuf>,
}

/// Recursive search under `path` for entries whose root-relative path matches
/// the glob `pattern`. Returns absolute paths.
///
/// Entries that fail validation are skipped silently (and their subtrees
/// pruned) so boundary errors never surface as search noise; unreadable
/// directories are skipped the same way. Symlinks are not followed.
pub fn search_files(ctx: &Context, request: SearchRequest) -> Result<SearchResponse> {
    let matcher = patterns::build_glob(&request.pattern)?;
    let excludes = request
        .exclude_patterns
        .iter()
        .map(|pattern| patterns::build_glob(pattern))
        .collect::<Result<Vec<_>>>()?;

    let root = ctx.validate_path(&request.path)?;

    let mut matches = Vec::new();
    let mut walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    loop {
        let entry = match walker.next() {
            None => break,
            Some(Err(_)) => continue,
            Some(Ok(entry)) => entry,
        };
        if entry.depth() == 0 {
            continue;
        }

        if ctx
            .validate_path(&entry.path().to_string_lossy())
            .is_err()
        {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&root) else {
            continue;
        };
        if excludes
            .iter()
            .any(|glob| patterns::glob_match(glob, relative))
        {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }
        if patterns::glob_match(&matcher, relative) {
            matches.push(entry.path().to_path_buf());
        }
    }

    Ok(SearchResponse { matches })
}

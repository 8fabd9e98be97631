use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::patterns::ExcludePatterns;
use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRequest {
    pub path: String,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeResponse {
    pub path: PathBuf,
    pub entries: Vec<TreeEntry>,
}

/// Recursive directory tree rooted at `path`.
///
/// Every directory level is re-validated before listing; a denial anywhere in
/// the tree fails the whole request. Excluded entries (matched against the
/// path relative to the tree root) are omitted along with their subtrees.
/// Symlinked directories appear as files and are not descended into, which
/// also keeps symlink cycles out of the recursion.
pub fn build_tree(ctx: &Context, request: TreeRequest) -> Result<TreeResponse> {
    let excludes = ExcludePatterns::compile(&request.exclude_patterns)?;
    let root = ctx.validate_path(&request.path)?;
    let entries = tree_level(ctx, &root, &root, &excludes)?;
    Ok(TreeResponse {
        path: root,
        entries,
    })
}

fn tree_level(
    ctx: &Context,
    current: &Path,
    root: &Path,
    excludes: &ExcludePatterns,
) -> Result<Vec<TreeEntry>> {
    let dir = ctx.validate_path(&current.to_string_lossy())?;

    let mut rows = fs::read_dir(&dir)
        .map_err(|err| Error::io_path("read_dir", &dir, err))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|err| Error::io_path("read_dir", &dir, err))?;
    rows.sort_by_key(|entry| entry.file_name());

    let mut result = Vec::new();
    for entry in rows {
        let name = entry.file_name().to_string_lossy().into_owned();
        let joined = current.join(entry.file_name());
        let relative = joined.strip_prefix(root).unwrap_or(&joined);
        if excludes.matches(relative) {
            continue;
        }

        let file_type = entry
            .file_type()
            .map_err(|err| Error::io_path("file_type", &joined, err))?;
        if file_type.is_dir() {
            let children = tree_level(ctx, &joined, root, excludes)?;
            result.push(TreeEntry {
                name,
                kind: EntryKind::Directory,
                children: Some(children),
            });
        } else {
            result.push(TreeEntry {
                name,
                kind: EntryKind::File,
                children: None,
            });
        }
    }
    Ok(result)
}

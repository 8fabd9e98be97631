use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDirRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDirEntry {
    pub name: String,
    pub is_directory: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDirResponse {
    pub path: PathBuf,
    pub entries: Vec<ListDirEntry>,
}

/// Non-recursive listing, sorted by name. Symlinks report as non-directories;
/// they are not followed here.
pub fn list_dir(ctx: &Context, request: ListDirRequest) -> Result<ListDirResponse> {
    let dir = ctx.validate_path(&request.path)?;

    let mut rows = fs::read_dir(&dir)
        .map_err(|err| Error::io_path("read_dir", &dir, err))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|err| Error::io_path("read_dir", &dir, err))?;
    rows.sort_by_key(|entry| entry.file_name());

    let mut entries = Vec::with_capacity(rows.len());
    for entry in rows {
        let file_type = entry
            .file_type()
            .map_err(|err| Error::io_path("file_type", entry.path(), err))?;
        entries.push(ListDirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_directory: file_type.is_dir(),
        });
    }

    Ok(ListDirResponse { path: dir, entries })
}

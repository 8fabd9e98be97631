//! The containment decision: does a path lie inside the allowed boundary?
//!
//! This check is purely lexical. Both sides are re-absolutized and
//! re-normalized before comparison, then compared as strings.
//! Symlink resolution is the caller's job: `Context::validate_path` runs this
//! check twice, before and after resolving the real path.

use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::error::{Error, Result};
use crate::normalize;

/// Returns whether `path` lies within any of the `allowed` directories.
///
/// Deny outcomes (`Ok(false)`): empty path, empty boundary set, NUL bytes in
/// the path. Boundary entries that are empty or contain NUL bytes are skipped
/// rather than matched. A path that is still not absolute after normalization
/// is a contract violation and fails the whole check with
/// [`Error::NotAbsolute`] instead of denying.
///
/// `/allowed-evil` must not match the boundary `/allowed`, so a prefix only
/// counts when it is followed by a separator (or the boundary is the
/// filesystem root itself).
pub fn is_path_within_allowed(path: &str, allowed: &[String]) -> Result<bool> {
    if path.is_empty() || allowed.is_empty() {
        return Ok(false);
    }
    if path.contains('\0') {
        return Ok(false);
    }

    let resolved = resolve_for_containment(path)?;

    for dir in allowed {
        if dir.is_empty() || dir.contains('\0') {
            continue;
        }
        let resolved_dir = resolve_for_containment(dir)?;
        if resolved == resolved_dir {
            return Ok(true);
        }
        if resolved_dir == MAIN_SEPARATOR_STR {
            // Boundary is the filesystem root.
            if resolved.starts_with(MAIN_SEPARATOR) {
                return Ok(true);
            }
            continue;
        }
        let mut prefix = resolved_dir;
        prefix.push(MAIN_SEPARATOR);
        if resolved.starts_with(&prefix) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn resolve_for_containment(path: &str) -> Result<String> {
    let absolute = normalize::resolve_absolute(path)?;
    if !absolute.is_absolute() {
        return Err(Error::NotAbsolute(absolute));
    }
    Ok(absolute.to_string_lossy().into_owned())
}

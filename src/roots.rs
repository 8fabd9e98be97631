//! Dynamic boundary updates from peer-supplied roots.
//!
//! A connected peer may announce a new list of root directories at any time
//! (and once at connection initialization). Every announcement routes through
//! [`update_allowed_directories`] so both call sites get identical
//! validation: each candidate is resolved to a real, existing directory or
//! dropped with a logged reason, and the store is swapped only when at least
//! one candidate survives.

use std::fs;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::boundary::AllowedDirectories;
use crate::normalize;

/// A candidate allowed-directory root supplied by the remote peer.
///
/// The URI may be `file://`-prefixed or a bare path, and may start with a
/// home-directory shorthand (`~`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootCandidate {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Resolves a root URI to a normalized absolute directory path via the live
/// filesystem. `None` means the path does not resolve at all.
fn parse_root_uri(uri: &str) -> Option<String> {
    let raw = uri.strip_prefix("file://").unwrap_or(uri);
    let expanded = normalize::expand_home(raw);
    let absolute = normalize::resolve_absolute(&expanded).ok()?;
    let real = absolute.canonicalize().ok()?;
    Some(normalize::normalize(&real.to_string_lossy()))
}

/// Validates each candidate root, logging and dropping the invalid ones.
pub fn valid_root_directories(candidates: &[RootCandidate]) -> Vec<String> {
    let mut validated = Vec::new();
    for candidate in candidates {
        let Some(resolved) = parse_root_uri(&candidate.uri) else {
            warn!(uri = %candidate.uri, "skipping invalid or inaccessible root");
            continue;
        };
        match fs::metadata(&resolved) {
            Ok(meta) if meta.is_dir() => validated.push(resolved),
            Ok(_) => warn!(path = %resolved, "skipping non-directory root"),
            Err(err) => warn!(path = %resolved, error = %err, "skipping unreadable root"),
        }
    }
    validated
}

/// Replaces the allowed-directory set from peer-supplied roots.
///
/// When no candidate validates the previous set stays in place: an empty
/// boundary would deny every request, which is worse than a stale one.
pub fn update_allowed_directories(allowed: &AllowedDirectories, candidates: &[RootCandidate]) {
    let validated = valid_root_directories(candidates);
    if validated.is_empty() {
        warn!("no valid root directories provided by peer; keeping current allowed directories");
        return;
    }
    info!(
        count = validated.len(),
        "updated allowed directories from peer roots"
    );
    allowed.replace(&validated);
}

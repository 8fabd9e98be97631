//! Canonical string form for paths.
//!
//! Containment decisions are string-prefix comparisons, so every
//! representation of the same filesystem location must collapse to one
//! canonical string before it reaches the guard. `C:/x`, `c:\x\` and `C:\x`
//! are the same directory on Windows; `/a//b/` and `/a/b` are the same on
//! POSIX. This module is purely lexical and never resolves symlinks.
//!
//! Invariants of `normalize`:
//! - Idempotent: `normalize(normalize(x)) == normalize(x)`.
//! - POSIX-style paths keep their `.`/`..` segments untouched (callers
//!   absolutize through [`resolve_absolute`] first, which removes them).
//! - Windows-drive paths come out backslash-separated with an uppercase
//!   drive letter, on every host platform.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Expands a leading home-directory token (`~` or `~/...`).
///
/// Paths without the token, and hosts without a resolvable home directory,
/// pass through unchanged.
pub fn expand_home(path: &str) -> String {
    if path != "~" && !path.starts_with("~/") {
        return path.to_string();
    }
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let rest = path[1..].trim_start_matches('/');
    if rest.is_empty() {
        home.to_string_lossy().into_owned()
    } else {
        home.join(rest).to_string_lossy().into_owned()
    }
}

/// Canonicalizes a raw path string into the platform-consistent form used for
/// containment checks.
pub fn normalize(raw: &str) -> String {
    let p = strip_wrapping_quotes(raw.trim());

    // WSL mounts like /mnt/c/... are POSIX paths even though they name a
    // drive; on non-Windows hosts every /-rooted path is POSIX; on Windows a
    // /-rooted path is POSIX unless it is drive-absolute (/c/...).
    let posix_style = p.starts_with('/')
        && (is_wsl_mount(p) || !cfg!(windows) || !is_drive_absolute_posixish(p));
    if posix_style {
        return normalize_posix(p);
    }

    let mut p = p.to_string();
    if starts_with_drive(&p) {
        p = p.replace('/', "\\");
    }
    let normalized = normalize_path_lexical(Path::new(&p))
        .to_string_lossy()
        .into_owned();
    if starts_with_drive(&normalized) {
        let mut result = normalized.replace('/', "\\");
        if result.as_bytes()[0].is_ascii_lowercase() {
            let upper = result[..1].to_ascii_uppercase();
            result.replace_range(..1, &upper);
        }
        return result;
    }
    if cfg!(windows) {
        return normalized.replace('/', "\\");
    }
    normalized
}

/// Resolves a path to a lexically normalized absolute `PathBuf`, joining
/// relative inputs onto the current working directory.
pub(crate) fn resolve_absolute(path: &str) -> Result<PathBuf> {
    let candidate = Path::new(path);
    let absolute = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        std::env::current_dir()?.join(candidate)
    };
    Ok(normalize_path_lexical(&absolute))
}

fn strip_wrapping_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &s[1..s.len() - 1];
        }
    }
    s
}

// `/mnt/<letter>/...`
fn is_wsl_mount(p: &str) -> bool {
    let bytes = p.as_bytes();
    bytes.len() >= 7
        && p[..5].eq_ignore_ascii_case("/mnt/")
        && bytes[5].is_ascii_alphabetic()
        && bytes[6] == b'/'
}

// `/<letter>/...`
fn is_drive_absolute_posixish(p: &str) -> bool {
    let bytes = p.as_bytes();
    bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b'/'
}

fn starts_with_drive(p: &str) -> bool {
    let bytes = p.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

// Collapse runs of `/` and drop a single trailing `/`, keeping the bare root.
fn normalize_posix(p: &str) -> String {
    let mut out = String::with_capacity(p.len());
    let mut prev_slash = false;
    for ch in p.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(ch);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Lexical path normalization: removes `.` segments, resolves `..` against
/// preceding normal segments, preserves leading `..` on relative paths, and
/// never lets `..` escape an absolute root (`/../etc` becomes `/etc`).
/// Windows prefixes (drive, UNC, verbatim) survive normalization.
pub(crate) fn normalize_path_lexical(path: &Path) -> PathBuf {
    let mut prefix: Option<OsString> = None;
    let mut has_root = false;
    let mut leading_parents = 0usize;
    let mut parts: Vec<OsString> = Vec::new();

    for comp in path.components() {
        match comp {
            Component::Prefix(pre) => prefix = Some(pre.as_os_str().to_os_string()),
            Component::RootDir => has_root = true,
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() && !has_root {
                    leading_parents += 1;
                }
            }
            Component::Normal(part) => parts.push(part.to_os_string()),
        }
    }

    let mut out = PathBuf::new();
    if let Some(prefix) = prefix {
        out.push(Path::new(&prefix));
    }
    if has_root {
        // Pushing `RootDir` after a Windows prefix would reset the path, so
        // append the separator to the prefix instead.
        out.as_mut_os_string()
            .push(std::path::MAIN_SEPARATOR.to_string());
    }
    for _ in 0..leading_parents {
        out.push("..");
    }
    for part in parts {
        out.push(part);
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            "/a//b/",
            "  '/quoted/path' ",
            "/mnt/c/Users/dev",
            "c:/Projects/app/",
            "/",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalize_strips_whitespace_and_matching_quotes() {
        assert_eq!(normalize("  /a/b  "), "/a/b");
        assert_eq!(normalize("\"/a/b\""), "/a/b");
        assert_eq!(normalize("'/a/b'"), "/a/b");
        // Mismatched quotes are content, not wrapping.
        assert_eq!(normalize("'/a/b\""), "'/a/b\"");
    }

    #[test]
    fn normalize_collapses_posix_separator_runs() {
        assert_eq!(normalize("/a//b///c"), "/a/b/c");
        assert_eq!(normalize("/a/b/"), "/a/b");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("//"), "/");
    }

    #[test]
    fn normalize_keeps_wsl_mounts_posix() {
        assert_eq!(normalize("/mnt/c/Users//dev/"), "/mnt/c/Users/dev");
        assert_eq!(normalize("/MNT/D/data"), "/MNT/D/data");
    }

    #[test]
    fn normalize_uppercases_drive_and_backslashes_drive_paths() {
        assert_eq!(normalize("c:/Projects/app"), "C:\\Projects\\app");
        assert_eq!(normalize("C:/x"), "C:\\x");
    }

    #[test]
    fn normalize_path_lexical_removes_dots() {
        assert_eq!(
            normalize_path_lexical(Path::new("a/./b/../c")),
            PathBuf::from("a/c")
        );
        assert_eq!(normalize_path_lexical(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(normalize_path_lexical(Path::new("")), PathBuf::from("."));
    }

    #[test]
    fn normalize_path_lexical_preserves_leading_parents() {
        assert_eq!(
            normalize_path_lexical(Path::new("../../a/../b")),
            PathBuf::from("../../b")
        );
    }

    #[test]
    #[cfg(not(windows))]
    fn normalize_path_lexical_cannot_escape_absolute_root() {
        assert_eq!(
            normalize_path_lexical(Path::new("/../etc")),
            PathBuf::from("/etc")
        );
        assert_eq!(
            normalize_path_lexical(Path::new("/repo/../etc/passwd")),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    #[cfg(windows)]
    fn normalize_path_lexical_keeps_windows_prefixes() {
        assert_eq!(
            normalize_path_lexical(Path::new(r"C:\foo\..\bar")),
            PathBuf::from(r"C:\bar")
        );
        assert_eq!(
            normalize_path_lexical(Path::new(r"\\server\share\a\..")),
            PathBuf::from("\\\\server\\share\\")
        );
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home("/a/~/b"), "/a/~/b");
        assert_eq!(expand_home("~user/x"), "~user/x");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home.to_string_lossy());
            assert_eq!(
                expand_home("~/project"),
                home.join("project").to_string_lossy()
            );
        }
    }
}

//! Glob compilation and exclude-pattern rules shared by tree and search.

use std::ffi::OsStr;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{Error, Result};

/// Compiles a single glob. `*` does not cross separators; use `**` to match
/// across directories.
pub(super) fn build_glob(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
    Ok(glob.compile_matcher())
}

pub(super) fn glob_match(glob: &GlobMatcher, relative: &Path) -> bool {
    #[cfg(windows)]
    {
        // Globs are written with forward slashes; match against a slashed
        // rendition of the relative path.
        let slashed = relative.to_string_lossy().replace('\\', "/");
        glob.is_match(Path::new(&slashed))
    }
    #[cfg(not(windows))]
    {
        glob.is_match(relative)
    }
}

enum ExcludeRule {
    Glob(GlobMatcher),
    Literal(String),
}

/// Exclude patterns for tree building.
///
/// A pattern containing `*` is a glob matched against the path relative to
/// the tree root. A pattern without `*` matches the exact relative path or
/// any single path segment at any depth, so `node_modules` excludes every
/// `node_modules` directory in the tree, however deeply nested.
pub(super) struct ExcludePatterns {
    rules: Vec<ExcludeRule>,
}

impl ExcludePatterns {
    pub(super) fn compile(patterns: &[String]) -> Result<Self> {
        let mut rules = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            if pattern.contains('*') {
                rules.push(ExcludeRule::Glob(build_glob(pattern)?));
            } else {
                rules.push(ExcludeRule::Literal(pattern.clone()));
            }
        }
        Ok(Self { rules })
    }

    pub(super) fn matches(&self, relative: &Path) -> bool {
        self.rules.iter().any(|rule| match rule {
            ExcludeRule::Glob(glob) => glob_match(glob, relative),
            ExcludeRule::Literal(name) => {
                let name = OsStr::new(name.as_str());
                relative.as_os_str() == name || relative.iter().any(|segment| segment == name)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn compile(patterns: &[&str]) -> ExcludePatterns {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ExcludePatterns::compile(&patterns).expect("compile")
    }

    #[test]
    fn literal_pattern_matches_segment_at_any_depth() {
        let excludes = compile(&["node_modules"]);
        assert!(excludes.matches(Path::new("node_modules")));
        assert!(excludes.matches(Path::new("pkg/node_modules")));
        assert!(excludes.matches(Path::new("pkg/node_modules/lodash/index.js")));
        assert!(!excludes.matches(Path::new("pkg/node_modules_backup")));
    }

    #[test]
    fn literal_pattern_matches_exact_relative_path() {
        let excludes = compile(&["docs/internal"]);
        assert!(excludes.matches(Path::new("docs/internal")));
        assert!(!excludes.matches(Path::new("docs/internal-notes")));
    }

    #[test]
    fn star_pattern_is_a_glob_over_the_relative_path() {
        let excludes = compile(&["*.log"]);
        assert!(excludes.matches(Path::new("debug.log")));
        // `*` does not cross separators.
        assert!(!excludes.matches(Path::new("sub/debug.log")));

        let excludes = compile(&["**/*.log"]);
        assert!(excludes.matches(Path::new("sub/debug.log")));
    }

    #[test]
    fn bad_glob_is_a_pattern_error() {
        let patterns = vec!["src/[".to_string()];
        assert!(matches!(
            ExcludePatterns::compile(&patterns),
            Err(crate::error::Error::InvalidPattern { .. })
        ));
    }
}

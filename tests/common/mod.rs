use std::path::{Path, PathBuf};

use fs_browse::ops::Context;

pub fn test_context(root: &Path) -> Context {
    Context::new(vec![root.to_string_lossy().into_owned()]).expect("context")
}

/// Canonical form of `root`, matching the paths operations return.
pub fn real_root(root: &Path) -> PathBuf {
    root.canonicalize().expect("canonicalize root")
}

#[allow(dead_code)]
pub fn write_lines(path: &Path, count: usize) -> Vec<String> {
    let lines: Vec<String> = (1..=count).map(|i| format!("line-{i:04}")).collect();
    std::fs::write(path, lines.join("\n")).expect("write");
    lines
}

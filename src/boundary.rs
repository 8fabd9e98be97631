use std::sync::{Arc, RwLock};

/// Process-wide set of allowed root directories.
///
/// Cloning yields another handle to the same underlying set. The set is only
/// ever replaced wholesale (there is no add/remove API), so a reader taking
/// a [`snapshot`](AllowedDirectories::snapshot) during a concurrent
/// [`replace`](AllowedDirectories::replace) observes either the previous list
/// or the new one, never a partially updated mix.
#[derive(Debug, Clone, Default)]
pub struct AllowedDirectories {
    inner: Arc<RwLock<Vec<String>>>,
}

impl AllowedDirectories {
    pub fn new(dirs: Vec<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dirs)),
        }
    }

    /// Replaces the whole set with a defensive copy of `dirs`.
    pub fn replace(&self, dirs: &[String]) {
        let mut guard = self
            .inner
            .write()
            .expect("allowed directories lock poisoned");
        *guard = dirs.to_vec();
    }

    /// Returns a defensive copy of the current set.
    pub fn snapshot(&self) -> Vec<String> {
        self.inner
            .read()
            .expect("allowed directories lock poisoned")
            .clone()
    }
}

use crate::error::{Result, UpdateError};
use crate::git::VersionControl;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Mock repository for testing without actual git operations
///
/// Changed files are shared through a mutex so a fake update tool can mark
/// files dirty between steps.
pub struct MockRepository {
    remote_refs: HashMap<String, Vec<String>>,
    local_tags: Vec<String>,
    changed_files: Mutex<HashSet<String>>,
    fetches: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            remote_refs: HashMap::new(),
            local_tags: Vec::new(),
            changed_files: Mutex::new(HashSet::new()),
            fetches: Mutex::new(Vec::new()),
        }
    }

    /// Advertise a ref on a remote URL
    pub fn add_remote_ref(&mut self, url: impl Into<String>, name: impl Into<String>) {
        self.remote_refs.entry(url.into()).or_default().push(name.into());
    }

    /// Add a local tag
    pub fn add_local_tag(&mut self, name: impl Into<String>) {
        self.local_tags.push(name.into());
    }

    /// Replace the set of files that currently differ from the last commit
    pub fn set_changed_files(&self, files: &[&str]) {
        let mut changed = self.changed_files.lock().unwrap_or_else(|e| e.into_inner());
        changed.clear();
        changed.extend(files.iter().map(|f| f.to_string()));
    }

    /// Remotes that `fetch_tags` was called with, in order
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal glob supporting `*` wildcards, enough for tag patterns like `v*.*`
fn glob_matches(pattern: &str, text: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == text,
        Some((prefix, rest)) => {
            let Some(remaining) = text.strip_prefix(prefix) else {
                return false;
            };
            (0..=remaining.len())
                .filter(|&i| remaining.is_char_boundary(i))
                .any(|i| glob_matches(rest, &remaining[i..]))
        }
    }
}

impl VersionControl for MockRepository {
    fn list_remote_refs(&self, url: &str) -> Result<Vec<String>> {
        self.remote_refs
            .get(url)
            .cloned()
            .ok_or_else(|| UpdateError::tool(format!("Remote not reachable: {}", url)))
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.fetches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(remote.to_string());
        Ok(())
    }

    fn list_local_tags(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self
            .local_tags
            .iter()
            .filter(|tag| glob_matches(pattern, tag))
            .cloned()
            .collect())
    }

    fn has_changes(&self, path: &str) -> Result<bool> {
        Ok(self
            .changed_files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(path))
    }
}

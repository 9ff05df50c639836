//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the Git operations the
//! release walk needs, allowing for multiple implementations including a real
//! repository and a mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [VersionControl] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use lean_update::git::VersionControl;
//! # fn example<V: VersionControl>(vcs: &V) -> Result<(), Box<dyn std::error::Error>> {
//! let refs = vcs.list_remote_refs("https://github.com/leanprover-community/mathlib4.git")?;
//! let changed = vcs.has_changes("lake-manifest.json")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations used by the release walk
///
/// All implementors must be `Send + Sync`, and all methods return
/// [crate::error::Result<T>]; implementations map underlying errors (like
/// `git2::Error`) to [crate::error::UpdateError] variants.
pub trait VersionControl: Send + Sync {
    /// List the refs a remote advertises, as `git ls-remote` would
    ///
    /// # Arguments
    /// * `url` - URL of the remote repository
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Full ref names, e.g. `refs/tags/v4.9.0` and the
    ///   peeled duplicate `refs/tags/v4.9.0^{}` for annotated tags
    /// * `Err` - If the remote cannot be reached
    fn list_remote_refs(&self, url: &str) -> Result<Vec<String>>;

    /// Fetch every tag from a configured remote into the local repository
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// List local tag names matching a glob pattern such as `v*.*`
    fn list_local_tags(&self, pattern: &str) -> Result<Vec<String>>;

    /// Whether a working-tree file differs from the last commit
    ///
    /// Whitespace-only differences are ignored. A file that is neither tracked
    /// nor present counts as unchanged. A tracked file that was deleted counts
    /// as changed, as with `git diff -w`; staging it then fails because there
    /// is nothing to copy.
    ///
    /// # Arguments
    /// * `path` - Path relative to the package directory
    fn has_changes(&self, path: &str) -> Result<bool>;
}

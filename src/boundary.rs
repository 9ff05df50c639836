use std::fmt;

/// Non-fatal conditions met during a run.
/// These are reported to the user but never stop the walk.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The project has no release tags to anchor an incremental walk
    NoLocalReleases,
    /// Upstream has no release newer than our latest one
    NoNewerReleases { latest_local: String },
    /// An update step left every metadata file untouched
    NoMetadataChanges { tag: String },
    /// A metadata file could not be diffed
    DiffFailed { file: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoLocalReleases => write!(
                f,
                "No releases found in the current project; upgrading directly to mainline. \
                 Hint: create release tags when the toolchain is updated."
            ),
            BoundaryWarning::NoNewerReleases { latest_local } => write!(
                f,
                "No upstream release is newer than '{}'; only mainline will be tried",
                latest_local
            ),
            BoundaryWarning::NoMetadataChanges { tag } => {
                write!(f, "No changes to commit for '{}' - skipping update", tag)
            }
            BoundaryWarning::DiffFailed { file, reason } => {
                write!(f, "Cannot check diff for '{}': {}", file, reason)
            }
        }
    }
}

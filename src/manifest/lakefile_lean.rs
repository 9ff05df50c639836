use super::ManifestFormat;
use crate::domain::DependencyId;
use crate::error::{Result, UpdateError};
use std::path::Path;

/// `lakefile.lean`, Lake's script manifest
///
/// Editing Lean source is not supported; a package using this format makes
/// the run fail instead of silently falling back to another file.
pub struct LakefileLean;

impl ManifestFormat for LakefileLean {
    fn file_name(&self) -> &'static str {
        "lakefile.lean"
    }

    fn pin_dependency(&self, path: &Path, _dependency: &DependencyId, _rev: &str) -> Result<()> {
        Err(UpdateError::unsupported_manifest(format!(
            "Project uses `{}`; this is not yet supported!",
            path.display()
        )))
    }
}

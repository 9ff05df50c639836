//! Lake manifest editing
//!
//! Lake accepts either `lakefile.lean` or `lakefile.toml` and prefers the
//! former, so formats are probed in that order and the first file present in
//! the package directory is the one edited.

pub mod lakefile_lean;
pub mod lakefile_toml;

pub use lakefile_lean::LakefileLean;
pub use lakefile_toml::LakefileToml;

use crate::domain::DependencyId;
use crate::error::{Result, UpdateError};
use std::path::{Path, PathBuf};

/// A manifest file format able to pin one dependency to a revision
pub trait ManifestFormat: Send + Sync {
    /// File name of this format inside a package directory
    fn file_name(&self) -> &'static str;

    /// Rewrite the manifest at `path` so `dependency` requires `rev`
    ///
    /// Exactly one entry is modified; everything else in the file is kept.
    fn pin_dependency(&self, path: &Path, dependency: &DependencyId, rev: &str) -> Result<()>;
}

/// Pins the upstream dependency in whichever manifest the package uses
pub struct ManifestEditor {
    package_dir: PathBuf,
    formats: Vec<Box<dyn ManifestFormat>>,
}

impl ManifestEditor {
    /// Editor for Lake's formats, in Lake's order of preference
    pub fn new(package_dir: impl Into<PathBuf>) -> Self {
        Self::with_formats(
            package_dir,
            vec![Box::new(LakefileLean), Box::new(LakefileToml)],
        )
    }

    pub fn with_formats(
        package_dir: impl Into<PathBuf>,
        formats: Vec<Box<dyn ManifestFormat>>,
    ) -> Self {
        ManifestEditor {
            package_dir: package_dir.into(),
            formats,
        }
    }

    /// Pin `dependency` to `rev`, returning the manifest that was rewritten
    pub fn pin_dependency(&self, dependency: &DependencyId, rev: &str) -> Result<PathBuf> {
        for format in &self.formats {
            let path = self.package_dir.join(format.file_name());
            if path.is_file() {
                format.pin_dependency(&path, dependency, rev)?;
                return Ok(path);
            }
        }

        Err(UpdateError::MissingManifest {
            tried: self
                .formats
                .iter()
                .map(|f| format!("`{}`", f.file_name()))
                .collect(),
            hint: format!(
                "make sure the package directory ('{}', set with `--directory` or the \
                 `lake_package_directory` input) contains a lakefile.",
                self.package_dir.display()
            ),
        })
    }
}

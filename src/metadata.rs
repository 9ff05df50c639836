//! Metadata change detection and staging
//!
//! After each update the metadata files (`lean-toolchain` and
//! `lake-manifest.json` by default) are diffed against the last commit. When
//! something changed, copies are staged under `<staging_dir>/<tag>/` for the
//! later jobs that build, commit and open pull requests.

use crate::boundary::BoundaryWarning;
use crate::config::UpdateIfModified;
use crate::error::{Result, UpdateError};
use crate::git::VersionControl;
use crate::ui;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Stages metadata files per tag when an update changed them
pub struct MetadataStager {
    package_dir: PathBuf,
    files: Vec<String>,
    staging_root: PathBuf,
}

impl MetadataStager {
    pub fn new(
        package_dir: impl Into<PathBuf>,
        files: Vec<String>,
        staging_root: impl Into<PathBuf>,
    ) -> Self {
        MetadataStager {
            package_dir: package_dir.into(),
            files,
            staging_root: staging_root.into(),
        }
    }

    /// Directory that receives the copies for `tag`
    pub fn staging_dir(&self, tag: &str) -> PathBuf {
        self.staging_root.join(tag)
    }

    /// Copy the metadata files into the tag's staging directory if any changed.
    ///
    /// # Returns
    /// * `Ok(true)` - At least one file changed; all files were staged
    /// * `Ok(false)` - Nothing changed; the filesystem was not touched
    pub fn stage_if_changed<V: VersionControl + ?Sized>(&self, vcs: &V, tag: &str) -> Result<bool> {
        let mut any_changed = false;
        for file in &self.files {
            if vcs.has_changes(file)? {
                any_changed = true;
            }
        }

        if !any_changed {
            ui::display_boundary_warning(&BoundaryWarning::NoMetadataChanges {
                tag: tag.to_string(),
            });
            return Ok(false);
        }

        let dest = self.staging_dir(tag);
        fs::create_dir_all(&dest)?;
        for file in &self.files {
            copy_file(&self.package_dir.join(file), &dest.join(file))?;
        }

        ui::display_success(&format!("Staged metadata for {} in {}", tag, dest.display()));
        Ok(true)
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|e| {
        UpdateError::Io(std::io::Error::new(
            e.kind(),
            format!("Cannot copy {} to {}: {}", from.display(), to.display(), e),
        ))
    })?;
    Ok(())
}

/// Which metadata files changed, and whether the update job should continue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    pub files_changed: bool,
    pub do_update: bool,
    /// Space-separated names of the changed files
    pub changed_files: String,
    pub lean_toolchain_updated: bool,
}

impl ChangeReport {
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("files_changed", self.files_changed.to_string()),
            ("changed_files", self.changed_files.clone()),
            ("do_update", self.do_update.to_string()),
            (
                "lean_toolchain_updated",
                self.lean_toolchain_updated.to_string(),
            ),
        ]
    }
}

/// Check every candidate file for changes.
///
/// A file whose diff cannot be computed is reported and treated as unchanged.
pub fn check_changes<V: VersionControl + ?Sized>(
    vcs: &V,
    selector: UpdateIfModified,
) -> ChangeReport {
    let mut changed = Vec::new();
    for candidate in UpdateIfModified::CANDIDATES {
        match vcs.has_changes(candidate) {
            Ok(true) => changed.push(candidate),
            Ok(false) => {}
            Err(e) => ui::display_boundary_warning(&BoundaryWarning::DiffFailed {
                file: candidate.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    let lean_toolchain_updated = changed.contains(&"lean-toolchain");
    let do_update = match selector {
        UpdateIfModified::LeanToolchain => lean_toolchain_updated,
        UpdateIfModified::LakeManifest => !changed.is_empty(),
    };

    ChangeReport {
        files_changed: !changed.is_empty(),
        do_update,
        changed_files: changed.join(" "),
        lean_toolchain_updated,
    }
}

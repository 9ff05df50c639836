use crate::error::{Result, UpdateError};
use crate::ui;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Mutex;

/// Environment variable telling Mathlib's post-update hook to skip the cache download
pub const NO_CACHE_ENV: &str = "MATHLIB_NO_CACHE_ON_UPDATE";

/// Runs the package-update tool against the freshly edited manifest
pub trait PackageUpdater: Send + Sync {
    /// Run one blocking update; any failure is fatal for the whole walk
    fn update(&self, legacy: bool) -> Result<()>;
}

/// `lake update`, run in the package directory with inherited stdio
pub struct LakeUpdater {
    program: String,
    package_dir: PathBuf,
}

impl LakeUpdater {
    pub fn new(program: impl Into<String>, package_dir: impl Into<PathBuf>) -> Self {
        LakeUpdater {
            program: program.into(),
            package_dir: package_dir.into(),
        }
    }

    /// Build the command without running it
    ///
    /// The walk runs one update per tag, so the standard invocation skips
    /// fetching the cache on every step.
    pub fn command(&self, legacy: bool) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.package_dir);
        if legacy {
            cmd.args(["-R", "-Kenv=dev", "update"]);
        } else {
            cmd.arg("update").env(NO_CACHE_ENV, "1");
        }
        cmd
    }
}

impl PackageUpdater for LakeUpdater {
    fn update(&self, legacy: bool) -> Result<()> {
        if legacy {
            ui::display_status("Using legacy update command");
        } else {
            ui::display_status("Using standard update command");
        }

        let status = self.command(legacy).status().map_err(|e| {
            UpdateError::tool(format!("Failed to execute {}: {}", self.program, e))
        })?;

        if !status.success() {
            return Err(UpdateError::tool(format!(
                "{} update failed with exit code {}",
                self.program,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}

/// Mock updater for testing; runs a callback per update and records the flags used
pub struct MockUpdater<F> {
    on_update: F,
    calls: Mutex<Vec<bool>>,
}

impl<F> MockUpdater<F>
where
    F: Fn(usize) -> Result<()> + Send + Sync,
{
    /// `on_update` receives the zero-based index of the call
    pub fn new(on_update: F) -> Self {
        MockUpdater {
            on_update,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The `legacy` flag of every call so far
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl<F> PackageUpdater for MockUpdater<F>
where
    F: Fn(usize) -> Result<()> + Send + Sync,
{
    fn update(&self, legacy: bool) -> Result<()> {
        let index = {
            let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
            calls.push(legacy);
            calls.len() - 1
        };
        (self.on_update)(index)
    }
}

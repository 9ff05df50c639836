//! Workflow orchestration for the subcommands
//!
//! Builds the real collaborators (git repository, `lake`, `gh`), runs the
//! core logic and writes the step outputs. Kept apart from `main.rs` so the
//! workflows can be called programmatically without depending on clap.

use std::path::{Path, PathBuf};

use crate::config::{load_package_config, RunConfig, SelectionMode, UpdateIfModified};
use crate::driver::{Driver, UpdateOutcome};
use crate::error::Result;
use crate::forge::{GhCli, PreviousWork};
use crate::git::Git2Repository;
use crate::metadata::{check_changes, ChangeReport};
use crate::output::ActionOutput;
use crate::ui;
use crate::updater::LakeUpdater;

/// Arguments for the release walk
///
/// Mirrors the CLI arguments in a form suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Lake package directory
    pub directory: PathBuf,

    /// Raw selection mode: `all`, `latest` or `master`
    pub intermediate_releases: String,

    /// Use the legacy `lake -R -Kenv=dev update` invocation
    pub legacy_update: bool,
}

/// Release walk
///
/// 1. Validate the selection mode (before anything else)
/// 2. Load configuration
/// 3. Plan and walk the releases
/// 4. Write `new-tags` and `is-update-available`
pub fn run_update_workflow(args: UpdateWorkflowArgs) -> Result<UpdateOutcome> {
    let mode: SelectionMode = args.intermediate_releases.parse()?;
    let settings = load_package_config(args.config_path.as_deref(), &args.directory)?;

    let run = RunConfig {
        mode,
        legacy_update: args.legacy_update,
        working_dir: args.directory,
        settings,
    };

    let vcs = Git2Repository::open(&run.working_dir)?;
    let updater = LakeUpdater::new(&run.settings.tools.lake, &run.working_dir);

    let outcome = Driver::new(&run, &vcs, &updater).run()?;

    ActionOutput::from_env().set_all(&outcome.outputs()?)?;
    Ok(outcome)
}

/// Check which metadata files the update changed
pub fn run_check_changes_workflow(
    directory: PathBuf,
    update_if_modified: &str,
) -> Result<ChangeReport> {
    let selector: UpdateIfModified = update_if_modified.parse()?;
    let vcs = Git2Repository::open(&directory)?;

    let report = check_changes(&vcs, selector);
    ui::display_status(&format!("info: {}", serde_json::to_string_pretty(&report)?));

    ActionOutput::from_env().set_all(&report.outputs())?;
    Ok(report)
}

/// List open auto-update pull requests and issues
pub fn run_previous_workflow(
    config_path: Option<&str>,
    directory: &Path,
    label: Option<String>,
) -> Result<PreviousWork> {
    let settings = load_package_config(config_path, directory)?;
    let label = label.unwrap_or(settings.forge.label);

    let previous = PreviousWork::collect(&GhCli::new(settings.tools.gh), &label)?;
    ui::display_status(&format!(
        "Found {} open pull requests and {} open issues labelled '{}'",
        previous.pull_requests.len(),
        previous.issues.len(),
        label
    ));

    ActionOutput::from_env().set_all(&previous.outputs())?;
    Ok(previous)
}

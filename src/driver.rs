//! The release walk
//!
//! Plans the upstream releases to roll forward through, then for every step
//! pins the manifest, runs the update tool and stages changed metadata. Steps
//! share one manifest and one working tree, so they run strictly in order and
//! the first error aborts the walk. Edits made by earlier steps stay on disk.

use serde::Serialize;

use crate::boundary::BoundaryWarning;
use crate::config::{RunConfig, SelectionMode};
use crate::domain::{plan_releases, DependencyId, PlanStep, ReleasePlan};
use crate::error::Result;
use crate::git::VersionControl;
use crate::manifest::ManifestEditor;
use crate::metadata::MetadataStager;
use crate::tags::{list_release_tags, TagOrigin};
use crate::ui;
use crate::updater::PackageUpdater;

/// Outcome of one step of the walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateResult {
    pub tag: String,
    pub changed: bool,
}

/// Outcome of the whole walk
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub results: Vec<UpdateResult>,
}

impl UpdateOutcome {
    /// Tags whose update changed the metadata, in walk order
    pub fn new_tags(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.changed)
            .map(|r| r.tag.clone())
            .collect()
    }

    pub fn update_available(&self) -> bool {
        self.results.iter().any(|r| r.changed)
    }

    pub fn outputs(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(vec![
            ("new-tags", serde_json::to_string(&self.new_tags())?),
            ("is-update-available", self.update_available().to_string()),
        ])
    }
}

/// Sequences tag listing, planning, pinning, updating and staging
pub struct Driver<'a, V: ?Sized, U: ?Sized> {
    config: &'a RunConfig,
    vcs: &'a V,
    updater: &'a U,
    dependency: DependencyId,
    editor: ManifestEditor,
    stager: MetadataStager,
}

impl<'a, V, U> Driver<'a, V, U>
where
    V: VersionControl + ?Sized,
    U: PackageUpdater + ?Sized,
{
    pub fn new(config: &'a RunConfig, vcs: &'a V, updater: &'a U) -> Self {
        let settings = &config.settings;
        Driver {
            config,
            vcs,
            updater,
            dependency: DependencyId::from(&settings.upstream),
            editor: ManifestEditor::new(&config.working_dir),
            stager: MetadataStager::new(
                &config.working_dir,
                settings.metadata.files.clone(),
                config.staging_root(),
            ),
        }
    }

    /// Compute the release walk, listing tags only when the mode needs them
    pub fn plan(&self) -> Result<ReleasePlan> {
        if self.config.mode == SelectionMode::Mainline {
            return Ok(plan_releases(&[], &[], SelectionMode::Mainline));
        }

        let settings = &self.config.settings;
        ui::display_status(&format!(
            "Fetching tags from {}",
            settings.upstream.repository
        ));
        let upstream = list_release_tags(
            self.vcs,
            &TagOrigin::Remote(settings.upstream.remote_url()),
        )?;

        ui::display_status("Fetching release tags from current repository");
        let local = list_release_tags(
            self.vcs,
            &TagOrigin::Local {
                remote: settings.tools.remote.clone(),
            },
        )?;

        ui::display_status(&format!(
            "Found {} upstream releases and {} project releases",
            upstream.len(),
            local.len()
        ));

        let plan = plan_releases(&upstream, &local, self.config.mode);
        match local.last() {
            None => ui::display_boundary_warning(&BoundaryWarning::NoLocalReleases),
            Some(latest) if plan.releases().is_empty() => {
                ui::display_boundary_warning(&BoundaryWarning::NoNewerReleases {
                    latest_local: latest.original.clone(),
                })
            }
            Some(_) => {}
        }

        Ok(plan)
    }

    /// Pin, update and stage one step
    pub fn step(&self, step: &PlanStep) -> Result<UpdateResult> {
        let tag = step.revision(&self.config.settings.upstream.mainline);

        let manifest = self.editor.pin_dependency(&self.dependency, tag)?;
        ui::display_success(&format!(
            "Pinned {} to {} in {}",
            self.dependency,
            tag,
            manifest.display()
        ));

        self.updater.update(self.config.legacy_update)?;

        let changed = self.stager.stage_if_changed(self.vcs, tag)?;
        Ok(UpdateResult {
            tag: tag.to_string(),
            changed,
        })
    }

    /// Run the whole walk; the first failing step aborts it
    pub fn run(&self) -> Result<UpdateOutcome> {
        let plan = self.plan()?;
        ui::display_plan(&plan, &self.config.settings.upstream.mainline);

        let mut outcome = UpdateOutcome::default();
        for (index, step) in plan.steps().iter().enumerate() {
            ui::display_step(
                index,
                plan.len(),
                step.revision(&self.config.settings.upstream.mainline),
            );
            outcome.results.push(self.step(step)?);
        }

        ui::display_summary(&outcome.new_tags());
        Ok(outcome)
    }
}

use crate::config::SelectionMode;
use crate::domain::VersionTag;
use std::cmp::Ordering;

/// One entry of the release walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Pin an upstream release tag
    Release(VersionTag),
    /// Track the upstream development line
    Mainline,
}

impl PlanStep {
    /// The revision this step pins, given the configured mainline revision
    pub fn revision<'a>(&'a self, mainline: &'a str) -> &'a str {
        match self {
            PlanStep::Release(tag) => &tag.original,
            PlanStep::Mainline => mainline,
        }
    }
}

/// Ordered upstream releases to roll forward through, ending with mainline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    steps: Vec<PlanStep>,
}

impl ReleasePlan {
    fn mainline_only() -> Self {
        ReleasePlan {
            steps: vec![PlanStep::Mainline],
        }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// The release tags in the walk, without the mainline step
    pub fn releases(&self) -> Vec<&VersionTag> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PlanStep::Release(tag) => Some(tag),
                PlanStep::Mainline => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Computes the release walk.
///
/// With no local releases there is nothing to anchor an incremental walk to,
/// so the plan goes straight to mainline instead of replaying every upstream
/// release.
///
/// Tags naming the same release (`v1.1` and `v1.1.0`, or builds of one
/// version) collapse into one step. The first in sort order is kept, so the
/// shorter spelling and the lowest build metadata win.
pub fn plan_releases(
    upstream: &[VersionTag],
    local: &[VersionTag],
    mode: SelectionMode,
) -> ReleasePlan {
    if mode == SelectionMode::Mainline {
        return ReleasePlan::mainline_only();
    }

    let Some(base) = local.iter().max() else {
        return ReleasePlan::mainline_only();
    };

    let mut candidates: Vec<VersionTag> = upstream
        .iter()
        .filter(|tag| tag.cmp_precedence(base) == Ordering::Greater)
        .cloned()
        .collect();
    candidates.sort();
    candidates.dedup_by(|later, kept| later.cmp_precedence(kept) == Ordering::Equal);

    if mode == SelectionMode::Latest {
        candidates = candidates.pop().into_iter().collect();
    }

    let mut steps: Vec<PlanStep> = candidates.into_iter().map(PlanStep::Release).collect();
    steps.push(PlanStep::Mainline);
    ReleasePlan { steps }
}

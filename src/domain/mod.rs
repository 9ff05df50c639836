//! Domain logic - pure release-walk rules independent of git and the filesystem

pub mod dependency;
pub mod plan;
pub mod version;

pub use dependency::DependencyId;
pub use plan::{plan_releases, PlanStep, ReleasePlan};
pub use version::VersionTag;

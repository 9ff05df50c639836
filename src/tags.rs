use crate::domain::VersionTag;
use crate::error::Result;
use crate::git::VersionControl;

/// Glob for local release tags
pub const LOCAL_TAG_PATTERN: &str = "v*.*";

/// Where to look for release tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOrigin {
    /// A remote repository, by URL
    Remote(String),
    /// The local repository, after syncing tags from the named remote
    Local { remote: String },
}

/// Lists the release tags of `origin`, parsed and sorted ascending.
///
/// Some upstream repositories tag releases without publishing hosting-platform
/// releases, so tags are read from git directly. Any tag that looks like a
/// release but fails to parse aborts the run.
pub fn list_release_tags<V: VersionControl + ?Sized>(
    vcs: &V,
    origin: &TagOrigin,
) -> Result<Vec<VersionTag>> {
    let names = match origin {
        TagOrigin::Remote(url) => release_names_from_refs(&vcs.list_remote_refs(url)?),
        TagOrigin::Local { remote } => {
            // Shallow checkouts do not reliably carry tags.
            vcs.fetch_tags(remote)?;
            vcs.list_local_tags(LOCAL_TAG_PATTERN)?
                .into_iter()
                .filter(|name| VersionTag::is_release_name(name))
                .collect()
        }
    };

    let mut tags = names
        .iter()
        .map(|name| VersionTag::parse(name))
        .collect::<Result<Vec<_>>>()?;
    tags.sort();
    Ok(tags)
}

/// Release tag names from an `ls-remote` listing.
///
/// Annotated tags are advertised twice, once as `refs/tags/<name>^{}`; only
/// the plain entry is kept.
pub fn release_names_from_refs(refs: &[String]) -> Vec<String> {
    refs.iter()
        .filter(|name| !name.ends_with("^{}"))
        .filter_map(|name| name.strip_prefix("refs/tags/"))
        .filter(|name| VersionTag::is_release_name(name))
        .map(str::to_string)
        .collect()
}

use crate::error::{Result, UpdateError};
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// `v<major>.<minor>` optionally followed by `.<patch>` and a pre-release/build suffix.
fn release_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^v(\d+)\.(\d+)(\.\d+)?([-+].*)?$").expect("release tag pattern is valid")
    })
}

/// A release tag parsed as a semantic version
///
/// Keeps the tag exactly as it appears in the repository: our own tags may be
/// written `v1.0`, which is not valid semver but is still the ref downstream
/// tools need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub version: Version,
    pub original: String,
}

impl VersionTag {
    /// Whether `tag` looks like a release tag at all
    pub fn is_release_name(tag: &str) -> bool {
        release_tag_regex().is_match(tag)
    }

    /// Parse a release tag such as "v4.9.0", "v4.9" or "v4.9.0-rc1"
    pub fn parse(tag: &str) -> Result<Self> {
        let captures = release_tag_regex().captures(tag).ok_or_else(|| {
            UpdateError::version(format!(
                "Tag '{}' does not match v<major>.<minor>[.<patch>]",
                tag
            ))
        })?;

        let patch = captures.get(3).map_or(".0", |m| m.as_str());
        let suffix = captures.get(4).map_or("", |m| m.as_str());
        let normalized = format!("{}.{}{}{}", &captures[1], &captures[2], patch, suffix);

        let version = Version::parse(&normalized).map_err(|e| {
            UpdateError::version(format!("Cannot parse tag '{}' as a version: {}", tag, e))
        })?;

        Ok(VersionTag {
            version,
            original: tag.to_string(),
        })
    }

    /// Compare by semver precedence only, ignoring build metadata
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.version.cmp_precedence(&other.version)
    }
}

impl Ord for VersionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.original.cmp(&other.original))
    }
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_version() {
        let tag = VersionTag::parse("v4.9.1").unwrap();
        assert_eq!(tag.version, Version::new(4, 9, 1));
        assert_eq!(tag.original, "v4.9.1");
    }

    #[test]
    fn test_parse_without_patch() {
        let tag = VersionTag::parse("v1.0").unwrap();
        assert_eq!(tag.version, Version::new(1, 0, 0));
        assert_eq!(tag.to_string(), "v1.0");
    }

    #[test]
    fn test_parse_prerelease() {
        let tag = VersionTag::parse("v4.10.0-rc1").unwrap();
        assert_eq!(tag.version.pre.as_str(), "rc1");

        let short = VersionTag::parse("v4.10-rc2").unwrap();
        assert_eq!(short.version, Version::parse("4.10.0-rc2").unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(VersionTag::parse("1.2.3").is_err());
        assert!(VersionTag::parse("v1").is_err());
        assert!(VersionTag::parse("v1.2.3.4").is_err());
        assert!(VersionTag::parse("v1.2.3-01").is_err());
    }

    #[test]
    fn test_is_release_name() {
        assert!(VersionTag::is_release_name("v1.0"));
        assert!(VersionTag::is_release_name("v4.9.0"));
        assert!(VersionTag::is_release_name("v4.9.0-rc1"));
        assert!(!VersionTag::is_release_name("nightly-2024-01-01"));
        assert!(!VersionTag::is_release_name("version.1"));
        assert!(!VersionTag::is_release_name("v4"));
    }

    #[test]
    fn test_ordering_by_precedence() {
        let mut tags: Vec<VersionTag> = ["v2.0", "v1.1.0", "v1.1.0-rc1", "v1.0"]
            .iter()
            .map(|t| VersionTag::parse(t).unwrap())
            .collect();
        tags.sort();
        let names: Vec<&str> = tags.iter().map(|t| t.original.as_str()).collect();
        assert_eq!(names, vec!["v1.0", "v1.1.0-rc1", "v1.1.0", "v2.0"]);
    }

    #[test]
    fn test_build_metadata_breaks_ties() {
        let plain = VersionTag::parse("v1.0.0").unwrap();
        let build = VersionTag::parse("v1.0.0+b1").unwrap();
        assert_eq!(plain.cmp_precedence(&build), Ordering::Equal);
        assert_eq!(plain.cmp(&build), Ordering::Less);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut tags: Vec<VersionTag> = ["v1.2", "v1.0.0", "v1.0", "v1.10", "v1.9.9"]
            .iter()
            .map(|t| VersionTag::parse(t).unwrap())
            .collect();
        tags.sort();
        let once = tags.clone();
        tags.sort();
        assert_eq!(tags, once);
    }
}

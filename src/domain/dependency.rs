use crate::config::UpstreamConfig;
use std::fmt;

/// Identifies one `require` entry of a Lake manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyId {
    pub scope: String,
    pub name: String,
}

impl DependencyId {
    /// Create a new dependency identifier
    pub fn new(scope: impl Into<String>, name: impl Into<String>) -> Self {
        DependencyId {
            scope: scope.into(),
            name: name.into(),
        }
    }

    /// Check whether a manifest entry's scope and name refer to this dependency
    pub fn matches(&self, scope: Option<&str>, name: Option<&str>) -> bool {
        scope == Some(self.scope.as_str()) && name == Some(self.name.as_str())
    }
}

impl From<&UpstreamConfig> for DependencyId {
    fn from(upstream: &UpstreamConfig) -> Self {
        DependencyId::new(&upstream.scope, &upstream.name)
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.name)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, UpdateError};

/// Name of the configuration file looked up in the current and user config directories.
pub const CONFIG_FILE_NAME: &str = "lean-update.toml";

/// Represents the complete configuration for lean-update.
///
/// Describes the upstream dependency, the metadata files to watch, the external
/// tools to invoke, and the label used for auto-update pull requests.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub forge: ForgeConfig,
}

fn default_repository() -> String {
    "leanprover-community/mathlib4".to_string()
}

fn default_scope() -> String {
    "leanprover-community".to_string()
}

fn default_name() -> String {
    "mathlib".to_string()
}

fn default_mainline() -> String {
    "master".to_string()
}

/// The upstream library the project depends on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UpstreamConfig {
    /// Repository in OWNER/REPO form, used to list release tags.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// `scope` of the manifest `require` entry.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// `name` of the manifest `require` entry.
    #[serde(default = "default_name")]
    pub name: String,

    /// Revision pinned for the final, always-present mainline step.
    #[serde(default = "default_mainline")]
    pub mainline: String,
}

impl UpstreamConfig {
    /// URL used to list the upstream repository's tags.
    pub fn remote_url(&self) -> String {
        format!("https://github.com/{}.git", self.repository)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            repository: default_repository(),
            scope: default_scope(),
            name: default_name(),
            mainline: default_mainline(),
        }
    }
}

fn default_metadata_files() -> Vec<String> {
    vec!["lean-toolchain".to_string(), "lake-manifest.json".to_string()]
}

fn default_staging_dir() -> String {
    "mathlib-update-metadata".to_string()
}

/// Files whose changes mark an update as worthwhile, and where copies are staged.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MetadataConfig {
    #[serde(default = "default_metadata_files")]
    pub files: Vec<String>,

    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        MetadataConfig {
            files: default_metadata_files(),
            staging_dir: default_staging_dir(),
        }
    }
}

fn default_lake() -> String {
    "lake".to_string()
}

fn default_gh() -> String {
    "gh".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// External programs and the git remote to sync local tags from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_lake")]
    pub lake: String,

    #[serde(default = "default_gh")]
    pub gh: String,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            lake: default_lake(),
            gh: default_gh(),
            remote: default_remote(),
        }
    }
}

fn default_label() -> String {
    "auto-update-lean".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ForgeConfig {
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            label: default_label(),
        }
    }
}

/// Which upstream releases to walk through before the mainline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every upstream release newer than our latest release.
    All,
    /// Only the newest upstream release newer than our latest release.
    Latest,
    /// Skip releases and go straight to mainline.
    Mainline,
}

impl FromStr for SelectionMode {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(SelectionMode::All),
            "latest" => Ok(SelectionMode::Latest),
            "master" | "mainline-only" => Ok(SelectionMode::Mainline),
            other => Err(UpdateError::config(format!(
                "Unsupported value for input 'intermediate_releases': got '{}', expected 'all', 'latest' or 'master'.",
                other
            ))),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectionMode::All => "all",
            SelectionMode::Latest => "latest",
            SelectionMode::Mainline => "master",
        };
        f.write_str(s)
    }
}

/// Which metadata file has to change for the `do-update` job to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateIfModified {
    /// Only a toolchain bump counts.
    LeanToolchain,
    /// Any metadata change counts.
    LakeManifest,
}

impl UpdateIfModified {
    pub const CANDIDATES: [&'static str; 2] = ["lean-toolchain", "lake-manifest.json"];
}

impl FromStr for UpdateIfModified {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lean-toolchain" => Ok(UpdateIfModified::LeanToolchain),
            "lake-manifest.json" => Ok(UpdateIfModified::LakeManifest),
            other => Err(UpdateError::config(format!(
                "{} is not a valid option for update_if_modified. Valid options are: {}",
                other,
                Self::CANDIDATES.join(", ")
            ))),
        }
    }
}

/// Everything a release walk needs, gathered once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mode: SelectionMode,
    pub legacy_update: bool,
    /// Lake package directory holding the manifest and metadata files.
    pub working_dir: PathBuf,
    pub settings: Config,
}

impl RunConfig {
    /// Validates the raw mode string before anything else happens.
    pub fn new(
        mode: &str,
        legacy_update: bool,
        working_dir: impl Into<PathBuf>,
        settings: Config,
    ) -> Result<Self> {
        Ok(RunConfig {
            mode: mode.parse()?,
            legacy_update,
            working_dir: working_dir.into(),
            settings,
        })
    }

    pub fn staging_root(&self) -> PathBuf {
        self.working_dir.join(&self.settings.metadata.staging_dir)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `lean-update.toml` in current directory
/// 3. `lean-update.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    load_package_config(config_path, Path::new("."))
}

/// Like [load_config], but a `lean-update.toml` next to the Lake package is
/// preferred over one in the current directory.
///
/// The action usually runs from the repository root while the package may sit
/// in a subdirectory.
pub fn load_package_config(config_path: Option<&str>, package_dir: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else {
        let mut candidates = vec![
            package_dir.join(CONFIG_FILE_NAME),
            PathBuf::from(CONFIG_FILE_NAME),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(CONFIG_FILE_NAME));
        }

        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => read_config_file(path)?,
            None => return Ok(Config::default()),
        }
    };

    toml::from_str(&config_str).map_err(|e| UpdateError::config(e.to_string()))
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| UpdateError::config(format!("Cannot read {}: {}", path.display(), e)))
}

use crate::error::{Result, UpdateError};
use git2::{DiffFormat, DiffOptions, Direction, ErrorCode, Remote, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our trait interface
///
/// Paths handed to [super::VersionControl::has_changes] are relative to the
/// package directory, which may sit below the repository root.
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
    package_prefix: PathBuf,
}

impl Git2Repository {
    /// Open the repository containing `package_dir`
    pub fn open<P: AsRef<Path>>(package_dir: P) -> Result<Self> {
        let package_dir = package_dir.as_ref();
        let repo = Git2Repo::discover(package_dir)?;

        let package_prefix = match repo.workdir() {
            Some(workdir) => {
                let workdir = workdir.canonicalize()?;
                let package = package_dir.canonicalize()?;
                package
                    .strip_prefix(&workdir)
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            }
            None => {
                return Err(UpdateError::config(format!(
                    "Repository at {} has no working tree",
                    package_dir.display()
                )))
            }
        };

        Ok(Git2Repository {
            repo: Mutex::new(repo),
            package_prefix,
        })
    }

    fn repo(&self) -> MutexGuard<'_, Git2Repo> {
        self.repo.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Path of a package file relative to the repository root, with `/` separators
    fn pathspec(&self, path: &str) -> String {
        let joined = self.package_prefix.join(path);
        joined
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Credentials for fetching: credential helpers for HTTPS, the SSH agent for SSH
fn remote_callbacks<'a>(config: Option<git2::Config>) -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed_types| {
        if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
            if let Some(config) = config.as_ref() {
                if let Ok(cred) = git2::Cred::credential_helper(config, url, username_from_url) {
                    return Ok(cred);
                }
            }
        }

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}

impl super::VersionControl for Git2Repository {
    fn list_remote_refs(&self, url: &str) -> Result<Vec<String>> {
        let mut remote = Remote::create_detached(url)?;

        remote
            .connect(Direction::Fetch)
            .map_err(|e| UpdateError::tool(format!("Cannot list refs of {}: {}", url, e)))?;

        let refs: Vec<String> = remote
            .list()?
            .iter()
            .map(|head| head.name().to_string())
            .collect();

        remote.disconnect()?;
        Ok(refs)
    }

    fn fetch_tags(&self, remote_name: &str) -> Result<()> {
        let repo = self.repo();
        let mut remote = repo.find_remote(remote_name).map_err(|e| {
            UpdateError::tool(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks(repo.config().ok()));

        remote
            .fetch(
                &["+refs/tags/*:refs/tags/*"],
                Some(&mut fetch_options),
                None,
            )
            .map_err(|e| {
                UpdateError::tool(format!(
                    "Failed to fetch tags from remote '{}': {}",
                    remote_name, e
                ))
            })?;

        Ok(())
    }

    fn list_local_tags(&self, pattern: &str) -> Result<Vec<String>> {
        let tags = self.repo().tag_names(Some(pattern))?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn has_changes(&self, path: &str) -> Result<bool> {
        let repo = self.repo();

        let head_tree = match repo.head() {
            Ok(head) => Some(head.peel_to_tree()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };

        let mut options = DiffOptions::new();
        options
            .pathspec(self.pathspec(path))
            .disable_pathspec_match(true)
            .ignore_whitespace(true);

        let diff = repo.diff_tree_to_workdir_with_index(head_tree.as_ref(), Some(&mut options))?;

        // Whitespace-only edits still produce a delta, but no added or removed lines.
        let mut changed = false;
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-') {
                changed = true;
            }
            true
        })?;

        Ok(changed)
    }
}

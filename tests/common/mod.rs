// Shared helpers for integration tests
#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::fs;
use std::path::Path;

pub const MATHLIB_URL: &str = "https://github.com/leanprover-community/mathlib4.git";

pub const LAKEFILE: &str = r#"name = "MyProject"
defaultTargets = ["MyProject"]

[[require]]
name = "mathlib"
scope = "leanprover-community"
rev = "v1.0"

[[lean_lib]]
name = "MyProject"
"#;

pub const TOOLCHAIN: &str = "leanprover/lean4:v4.9.0\n";

pub const MANIFEST: &str = "{\"version\": 7, \"packages\": []}\n";

/// Write the usual Lake package files into `dir`
pub fn write_package(dir: &Path) {
    fs::write(dir.join("lakefile.toml"), LAKEFILE).expect("Could not write lakefile");
    fs::write(dir.join("lean-toolchain"), TOOLCHAIN).expect("Could not write toolchain");
    fs::write(dir.join("lake-manifest.json"), MANIFEST).expect("Could not write manifest");
}

/// Initialize a repository at `dir` with a configured test user
pub fn init_repo(dir: &Path) -> Repository {
    let repo = Repository::init(dir).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }
    repo
}

/// Stage every file in the working tree and commit it
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().expect("Could not get index");
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .expect("Could not add files to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = Signature::now("Test User", "test@example.com").expect("Could not create sig");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

/// Create an annotated tag on HEAD
pub fn tag_annotated(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    repo.tag(name, head.as_object(), &sig, name, false)
        .expect("Could not create annotated tag");
}

/// Create a lightweight tag on HEAD
pub fn tag_lightweight(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false)
        .expect("Could not create tag");
}

/// Read the `rev` of the first `require` entry of a lakefile
pub fn pinned_rev(dir: &Path) -> String {
    let content = fs::read_to_string(dir.join("lakefile.toml")).expect("Could not read lakefile");
    let value: toml::Value = toml::from_str(&content).expect("lakefile is valid TOML");
    value["require"][0]["rev"]
        .as_str()
        .expect("rev is a string")
        .to_string()
}

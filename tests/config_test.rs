// tests/config_test.rs
use lean_update::config::{
    load_config, load_package_config, Config, SelectionMode, UpdateIfModified,
};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.upstream.repository, "leanprover-community/mathlib4");
    assert_eq!(config.upstream.scope, "leanprover-community");
    assert_eq!(config.upstream.name, "mathlib");
    assert_eq!(config.upstream.mainline, "master");
    assert_eq!(
        config.metadata.files,
        vec!["lean-toolchain".to_string(), "lake-manifest.json".to_string()]
    );
    assert_eq!(config.metadata.staging_dir, "mathlib-update-metadata");
    assert_eq!(config.tools.lake, "lake");
    assert_eq!(config.tools.gh, "gh");
    assert_eq!(config.tools.remote, "origin");
    assert_eq!(config.forge.label, "auto-update-lean");
}

#[test]
fn test_load_from_file() {
    let config = load_config(Some("tests/fixtures/lean-update.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.upstream.name, "batteries");
    assert_eq!(config.upstream.mainline, "main");
    assert_eq!(
        config.upstream.remote_url(),
        "https://github.com/leanprover-community/batteries.git"
    );
    assert_eq!(config.metadata.files, vec!["lean-toolchain".to_string()]);
    assert_eq!(config.tools.remote, "upstream");
    assert_eq!(config.forge.label, "bump-batteries");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[tools]\nlake = \"/opt/elan/bin/lake\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tools.lake, "/opt/elan/bin/lake");
    assert_eq!(config.tools.gh, "gh");
    assert_eq!(config.upstream, Config::default().upstream);
    assert_eq!(config.metadata, Config::default().metadata);
}

#[test]
fn test_invalid_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[upstream\nname = 1\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, lean_update::UpdateError::Config(_)));
}

#[test]
fn test_missing_explicit_file_is_error() {
    assert!(load_config(Some("tests/fixtures/does-not-exist.toml")).is_err());
}

#[test]
fn test_selection_mode_message() {
    let err = "every".parse::<SelectionMode>().unwrap_err();
    assert!(err.to_string().ends_with(
        "Unsupported value for input 'intermediate_releases': got 'every', expected 'all', 'latest' or 'master'."
    ));
}

#[test]
fn test_update_if_modified_values() {
    assert_eq!(
        "lean-toolchain".parse::<UpdateIfModified>().unwrap(),
        UpdateIfModified::LeanToolchain
    );
    assert_eq!(
        "lake-manifest.json".parse::<UpdateIfModified>().unwrap(),
        UpdateIfModified::LakeManifest
    );
    let err = "Cargo.lock".parse::<UpdateIfModified>().unwrap_err();
    assert!(err.to_string().contains("not a valid option"));
}

#[test]
fn test_package_directory_config_is_found() {
    let package = TempDir::new().unwrap();
    std::fs::write(
        package.path().join("lean-update.toml"),
        "[upstream]\nmainline = \"main\"\n",
    )
    .unwrap();

    let config = load_package_config(None, package.path()).unwrap();
    assert_eq!(config.upstream.mainline, "main");
    assert_eq!(config.upstream.name, "mathlib");
}

#[test]
fn test_explicit_path_beats_package_config() {
    let package = TempDir::new().unwrap();
    std::fs::write(
        package.path().join("lean-update.toml"),
        "[upstream]\nmainline = \"main\"\n",
    )
    .unwrap();

    let config =
        load_package_config(Some("tests/fixtures/lean-update.toml"), package.path()).unwrap();
    assert_eq!(config.upstream.name, "batteries");
}

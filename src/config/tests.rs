use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_config() {
    let content = r#"
git:
  binary: /usr/local/bin/git
main_branch:
  candidates: [trunk, main]
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.git.binary, "/usr/local/bin/git");
    assert_eq!(config.main_branch.candidates, vec!["trunk", "main"]);
    assert_eq!(config.main_branch.config_key, "init.defaultBranch"); // default
}

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.git.binary, "git");
    assert_eq!(
        config.main_branch.candidates,
        vec!["master", "main", "primary"]
    );
    assert_eq!(config.current_branch.show_current_requirement, ">=2.22");
}

#[test]
fn test_parse_rejects_empty_candidates() {
    let content = r#"
main_branch:
  candidates: []
"#;
    let err = Config::parse(content).unwrap_err();
    assert!(err.to_string().contains("candidates must not be empty"));
}

#[test]
fn test_parse_rejects_bad_requirement() {
    let content = r#"
current_branch:
  show_current_requirement: "not a version"
"#;
    let err = Config::parse(content).unwrap_err();
    assert!(matches!(err, GitError::VersionRequirement { .. }));
}

#[test]
fn test_parse_invalid_yaml() {
    let err = Config::parse("git: [unclosed").unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn test_requirement_matches_versions() {
    let req = CurrentBranchConfig::default().requirement().unwrap();
    assert!(req.matches(&semver::Version::new(2, 22, 0)));
    assert!(req.matches(&semver::Version::new(2, 43, 1)));
    assert!(!req.matches(&semver::Version::new(2, 21, 9)));
}

#[test]
#[serial_test::serial]
fn test_global_config_path() {
    let original = std::env::var("HOME").ok();
    std::env::set_var("HOME", "/home/testuser");
    let path = global_config_path().unwrap();
    let expected = std::path::PathBuf::from("/home/testuser")
        .join(".config")
        .join("gitwrap")
        .join("config.yaml");
    assert_eq!(path, expected);
    if let Some(home) = original {
        std::env::set_var("HOME", home);
    }
}

#[test]
fn test_load_merged_no_files() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_merged_from(
        Some(&tmp.path().join("missing-global.yaml")),
        Some(&tmp.path().join("missing-project.yaml")),
    )
    .unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_merged_project_overrides_global() {
    let tmp = TempDir::new().unwrap();
    let global_path = tmp.path().join("global.yaml");
    let project_path = tmp.path().join("project.yaml");

    fs::write(
        &global_path,
        r#"
git:
  binary: /opt/git/bin/git
main_branch:
  config_key: gitwrap.mainBranch
  candidates: [develop]
"#,
    )
    .unwrap();
    fs::write(
        &project_path,
        r#"
main_branch:
  candidates: [trunk, master]
"#,
    )
    .unwrap();

    let config = Config::load_merged_from(Some(&global_path), Some(&project_path)).unwrap();
    // global value survives when project does not set it
    assert_eq!(config.git.binary, "/opt/git/bin/git");
    assert_eq!(config.main_branch.config_key, "gitwrap.mainBranch");
    // project list replaces global list
    assert_eq!(config.main_branch.candidates, vec!["trunk", "master"]);
}

#[test]
#[serial_test::serial]
fn test_load_for_reads_project_file() {
    let home = TempDir::new().unwrap();
    let repo = TempDir::new().unwrap();
    fs::write(
        repo.path().join(PROJECT_CONFIG_FILE),
        "main_branch:\n  candidates: [release]\n",
    )
    .unwrap();

    let original = std::env::var("HOME").ok();
    std::env::set_var("HOME", home.path());
    let config = Config::load_for(repo.path());
    if let Some(original) = original {
        std::env::set_var("HOME", original);
    }

    let config = config.unwrap();
    assert_eq!(config.main_branch.candidates, vec!["release"]);
    assert_eq!(config.git.binary, "git");
}

#[test]
fn test_load_from_missing_file_reports_path() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.yaml");
    let err = Config::load_from(&missing).unwrap_err();
    match err {
        GitError::Config { path, .. } => assert_eq!(path.as_deref(), Some(missing.as_path())),
        other => panic!("unexpected error: {other}"),
    }
}

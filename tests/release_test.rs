use std::fs;
use std::path::Path;

use mono_publish::config::Config;
use mono_publish::git::{CommitLog, MockHistory};
use mono_publish::release::{ReleaseCoordinator, ReleaseOptions};
use mono_publish::resolver::ResolvedWorkload;
use mono_publish::version_tool::MockVersionTool;
use mono_publish::workspace::PackageDescriptor;
use semver::Version;

fn write_sub_package(packages_dir: &Path, name: &str) -> PackageDescriptor {
    let dir = packages_dir.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.ts"), "export default {};\n").unwrap();
    fs::write(dir.join("tsconfig.json"), "{}").unwrap();
    fs::write(
        dir.join("package.json"),
        format!(
            r#"{{"name":"{}","version":"0.1.0","main":"dist/index.js","module":"dist/index.es.js"}}"#,
            name
        ),
    )
    .unwrap();
    PackageDescriptor::for_sub_package(packages_dir, name).unwrap()
}

fn history_with(entries: &[(&str, &str, &str)]) -> MockHistory {
    MockHistory::new(
        CommitLog::new(
            entries.iter().map(|e| e.0.to_string()).collect(),
            entries.iter().map(|e| e.1.to_string()).collect(),
            entries.iter().map(|e| e.2.to_string()).collect(),
        )
        .unwrap(),
    )
}

#[test]
fn missing_work_dir_is_skipped_and_sequence_continues() {
    let root = tempfile::tempdir().unwrap();
    let ghost = write_sub_package(root.path(), "ghost");
    let survivor = write_sub_package(root.path(), "survivor");
    // Resolution succeeded, then the directory disappeared.
    fs::remove_dir_all(&ghost.work_dir).unwrap();

    let workload = ResolvedWorkload {
        main: None,
        packages: vec![ghost, survivor],
    };

    let version_tool = MockVersionTool::new(vec![Version::new(0, 2, 0)]);
    let history = history_with(&[("feat: keep going", "h1", "")]);
    let config = Config::default();
    let coordinator = ReleaseCoordinator::new(&version_tool, &history, &config);

    coordinator
        .release_all(&workload, &ReleaseOptions::default())
        .unwrap();

    // Only the surviving package was bumped and pushed.
    let calls = version_tool.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tag_prefix, "survivor@");
    assert_eq!(history.pushes().len(), 1);
}

#[test]
fn version_tool_failure_aborts_remaining_packages() {
    let root = tempfile::tempdir().unwrap();
    let first = write_sub_package(root.path(), "pkg_a");
    let second = write_sub_package(root.path(), "pkg_b");

    let workload = ResolvedWorkload {
        main: None,
        packages: vec![first, second],
    };

    let version_tool = MockVersionTool::failing();
    let history = history_with(&[]);
    let config = Config::default();
    let coordinator = ReleaseCoordinator::new(&version_tool, &history, &config);

    let result = coordinator.release_all(&workload, &ReleaseOptions::default());
    assert!(result.is_err());

    // pkg_a failed; pkg_b was never attempted and nothing was pushed.
    assert_eq!(version_tool.calls().len(), 1);
    assert!(history.pushes().is_empty());
}

#[test]
fn sub_package_release_regenerates_its_changelog() {
    let root = tempfile::tempdir().unwrap();
    let package = write_sub_package(root.path(), "pkg_a");

    let workload = ResolvedWorkload {
        main: None,
        packages: vec![package.clone()],
    };

    let version_tool = MockVersionTool::new(vec![Version::new(1, 1, 0)]);
    let history = history_with(&[
        ("feat: new thing", "h1", ""),
        ("release: pkg_a@1.0.0", "h2", "tag: pkg_a@1.0.0"),
        ("feat: old thing", "h3", ""),
    ]);
    let config = Config::default();
    let coordinator = ReleaseCoordinator::new(&version_tool, &history, &config);

    coordinator
        .release_all(&workload, &ReleaseOptions::default())
        .unwrap();

    let changelog = fs::read_to_string(package.work_dir.join("CHANGELOG.md")).unwrap();
    assert!(changelog.contains("## pkg_a@1.1.0"));
    assert!(changelog.contains("new thing"));
    // Covered by the 1.0.0 release tag, so excluded from this section
    assert!(!changelog.contains("old thing"));
}

#[test]
fn root_release_uses_manifest_name_prefix_and_pushes() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("src")).unwrap();
    fs::write(
        root.path().join("package.json"),
        r#"{"name":"root_pkg","version":"1.0.0","main":"dist/index.js","module":"dist/index.es.js"}"#,
    )
    .unwrap();
    let main = PackageDescriptor::for_root(root.path()).unwrap();

    let workload = ResolvedWorkload {
        main: Some(main),
        packages: Vec::new(),
    };

    let version_tool = MockVersionTool::new(vec![Version::new(1, 1, 0)]);
    let history = history_with(&[("feat: root feature", "h1", "")]);
    let config = Config::default();
    let coordinator = ReleaseCoordinator::new(&version_tool, &history, &config);

    coordinator
        .release_all(
            &workload,
            &ReleaseOptions {
                prerelease: Some("beta".to_string()),
                first_release: false,
            },
        )
        .unwrap();

    let calls = version_tool.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tag_prefix, "root_pkg@");
    assert_eq!(calls[0].prerelease.as_deref(), Some("beta"));
    assert_eq!(calls[0].release_message, "release: root_pkg@{version}");
    assert_eq!(history.pushes(), vec![("origin".to_string(), "main".to_string())]);
}

#[test]
fn root_releases_before_sub_packages() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("src")).unwrap();
    fs::write(
        root.path().join("package.json"),
        r#"{"name":"root_pkg","version":"1.0.0","main":"dist/index.js","module":"dist/index.es.js"}"#,
    )
    .unwrap();
    let main = PackageDescriptor::for_root(root.path()).unwrap();
    let sub = write_sub_package(&root.path().join("package"), "pkg_a");

    let workload = ResolvedWorkload {
        main: Some(main),
        packages: vec![sub],
    };

    let version_tool =
        MockVersionTool::new(vec![Version::new(1, 1, 0), Version::new(0, 2, 0)]);
    let history = history_with(&[("feat: x", "h1", "")]);
    let config = Config::default();
    let coordinator = ReleaseCoordinator::new(&version_tool, &history, &config);

    coordinator
        .release_all(&workload, &ReleaseOptions::default())
        .unwrap();

    let calls = version_tool.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].tag_prefix, "root_pkg@");
    assert_eq!(calls[1].tag_prefix, "pkg_a@");
    // One push per released package, in sequence
    assert_eq!(history.pushes().len(), 2);
}

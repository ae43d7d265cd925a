use mono_publish::conventional::classify;
use mono_publish::git::CommitLog;
use semver::Version;

/// The shared history scenario: a mixed log with a tagged release commit for
/// pkg_a at index 2 and an unclassifiable line at index 3.
fn fixture_log() -> CommitLog {
    CommitLog::new(
        vec![
            "feat: a".to_string(),
            "chore: b".to_string(),
            "release: v".to_string(),
            "wip".to_string(),
            "feat: c".to_string(),
        ],
        vec![
            "h1".to_string(),
            "h2".to_string(),
            "h3".to_string(),
            "h4".to_string(),
            "h5".to_string(),
        ],
        vec![
            String::new(),
            String::new(),
            "tag: pkgA@1.0.0".to_string(),
            String::new(),
            String::new(),
        ],
    )
    .unwrap()
}

#[test]
fn cutoff_fires_for_own_package_with_lower_version() {
    let records = classify(&fixture_log(), "pkgA", &Version::new(1, 1, 0));

    // Boundary at index 2: records for indices 0 and 1 only; the boundary
    // commit itself is excluded and indices 3-4 are never reached.
    let hashes: Vec<&str> = records.iter().map(|r| r.short_hash.as_str()).collect();
    assert_eq!(hashes, vec!["h1", "h2"]);
}

#[test]
fn other_packages_tag_never_truncates() {
    let records = classify(&fixture_log(), "pkgB", &Version::new(1, 1, 0));

    // pkgA's release tag is not a boundary for pkgB; the release commit is
    // an ordinary record and the walk continues. Index 3 ("wip") stays
    // invisible.
    let hashes: Vec<&str> = records.iter().map(|r| r.short_hash.as_str()).collect();
    assert_eq!(hashes, vec!["h1", "h2", "h3", "h5"]);
}

#[test]
fn equal_version_does_not_trigger_cutoff() {
    // Re-running against the tag that produced the current version must
    // still include everything.
    let records = classify(&fixture_log(), "pkgA", &Version::new(1, 0, 0));

    let hashes: Vec<&str> = records.iter().map(|r| r.short_hash.as_str()).collect();
    assert_eq!(hashes, vec!["h1", "h2", "h3", "h5"]);
}

#[test]
fn higher_tag_version_does_not_trigger_cutoff() {
    let records = classify(&fixture_log(), "pkgA", &Version::new(0, 9, 0));

    let hashes: Vec<&str> = records.iter().map(|r| r.short_hash.as_str()).collect();
    assert_eq!(hashes, vec!["h1", "h2", "h3", "h5"]);
}

#[test]
fn multiple_tags_in_one_decoration_use_first_match() {
    let log = CommitLog::new(
        vec!["feat: a".to_string(), "release: v".to_string(), "feat: b".to_string()],
        vec!["h1".to_string(), "h2".to_string(), "h3".to_string()],
        vec![
            String::new(),
            "tag: pkgA@1.0.0, tag: pkgB@5.0.0".to_string(),
            String::new(),
        ],
    )
    .unwrap();

    // First match is pkgA@1.0.0, which cuts off for pkgA...
    let records = classify(&log, "pkgA", &Version::new(2, 0, 0));
    assert_eq!(records.len(), 1);

    // ...but the pkgB tag behind it is never consulted.
    let records = classify(&log, "pkgB", &Version::new(6, 0, 0));
    assert_eq!(records.len(), 3);
}

#[test]
fn empty_history_is_empty_result() {
    let records = classify(&CommitLog::default(), "pkgA", &Version::new(1, 0, 0));
    assert!(records.is_empty());
}

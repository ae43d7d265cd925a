use semver::Version;

use crate::domain::{CommitRecord, CommitType, ReleaseTag};
use crate::git::CommitLog;

/// Classify a commit log into the records that belong to one package's next
/// release, newest first.
///
/// Walking from index 0 (the newest commit):
///
/// - Lines that do not match the conventional-commit pattern are silently
///   skipped; merges and WIP commits are invisible to the changelog.
/// - A non-revert `release` commit is a release-boundary candidate: if its
///   ref decoration carries a `tag: <pkg>@<version>` tag for
///   `target_package` with a version strictly lower than `target_version`,
///   classification stops. Everything older is already covered by that prior
///   release, and the boundary commit itself is excluded.
/// - A release tag for a different package never truncates: each package has
///   its own independent tag lineage.
/// - An equal version does not trigger the cutoff, so re-running against the
///   tag that produced the current version is idempotent.
pub fn classify(log: &CommitLog, target_package: &str, target_version: &Version) -> Vec<CommitRecord> {
    let mut records = Vec::new();

    for i in 0..log.len() {
        let message = log.message(i);
        let parsed = match parse_message(message) {
            Some(parsed) => parsed,
            None => continue,
        };

        if parsed.commit_type == CommitType::Release && !parsed.is_revert {
            let tag = ReleaseTag::parse_decoration(log.ref_annotation(i));
            if let Some(tag) = &tag {
                if tag.package == target_package && tag.version < *target_version {
                    break;
                }
            }
            records.push(record(log, i, parsed, tag));
            continue;
        }

        records.push(record(log, i, parsed, None));
    }

    records
}

struct ParsedMessage {
    commit_type: CommitType,
    scope: Option<String>,
    subject: String,
    is_revert: bool,
}

/// Match one subject line against the conventional-commit pattern:
/// optional `revert: ` prefix, a category from the closed set, optional
/// parenthesized scope, then a subject of 1 to 50 characters.
fn parse_message(message: &str) -> Option<ParsedMessage> {
    let re = regex::Regex::new(
        r"^(revert: )?(feat|fix|docs|style|refactor|perf|test|build|chore|release)(\(([^)]+)\))?: (.{1,50})",
    )
    .ok()?;
    let captures = re.captures(message)?;

    let is_revert = captures.get(1).is_some();
    let commit_type = CommitType::from_keyword(captures.get(2)?.as_str())?;
    let scope = captures.get(4).map(|m| m.as_str().to_string());
    let subject = captures.get(5)?.as_str().to_string();

    Some(ParsedMessage {
        commit_type,
        scope,
        subject,
        is_revert,
    })
}

fn record(log: &CommitLog, index: usize, parsed: ParsedMessage, tag: Option<ReleaseTag>) -> CommitRecord {
    CommitRecord {
        short_hash: log.short_hash(index).to_string(),
        raw_message: log.message(index).to_string(),
        commit_type: parsed.commit_type,
        scope: parsed.scope,
        subject: parsed.subject,
        is_revert: parsed.is_revert,
        tag,
    }
}

use std::fs;
use std::path::Path;

use semver::Version;

use crate::domain::{CommitRecord, CommitType};
use crate::error::Result;

const HEADER: &str = "# Changelog\n";

/// Heading that marks the start of the previous release section. Everything
/// above it (the file header) is replaced on regeneration; everything from it
/// down is preserved. Matches bare `1.2.3` headings, package-scoped
/// `name@1.2.3` headings, and anchor-style markers.
const START_OF_LAST_RELEASE_PATTERN: &str =
    r"(?m)^#+ \[?([\w.-]+@)?[0-9]+\.[0-9]+\.[0-9]+|<a name=";

/// Regenerate a package's changelog file.
///
/// Renders the classified records into a new release section and prepends it
/// above the previous release heading, creating the file if missing. The
/// changelog is derived state; whatever was there before the last release
/// heading is discarded.
pub fn regenerate(
    path: &Path,
    package_name: &str,
    version: &Version,
    records: &[CommitRecord],
) -> Result<()> {
    let old_content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let previous_releases = match regex::Regex::new(START_OF_LAST_RELEASE_PATTERN) {
        Ok(re) => re
            .find(&old_content)
            .map(|m| old_content[m.start()..].to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };

    let section = render(package_name, version, records);
    let mut content = format!("{}\n{}{}", HEADER, section, previous_releases);
    // Single trailing newline
    while content.ends_with("\n\n") {
        content.pop();
    }

    fs::write(path, content)?;
    Ok(())
}

/// Render one release section, grouped by commit category.
pub fn render(package_name: &str, version: &Version, records: &[CommitRecord]) -> String {
    let mut out = format!("## {}@{}\n", package_name, version);

    let order = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Perf,
        CommitType::Refactor,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Test,
        CommitType::Build,
        CommitType::Chore,
        CommitType::Release,
    ];

    for commit_type in order {
        let group: Vec<&CommitRecord> = records
            .iter()
            .filter(|r| r.commit_type == commit_type)
            .collect();
        if group.is_empty() {
            continue;
        }

        out.push_str(&format!("\n### {}\n\n", commit_type.heading()));
        for record in group {
            let revert = if record.is_revert { "revert: " } else { "" };
            match &record.scope {
                Some(scope) => out.push_str(&format!(
                    "* {}**{}:** {} ({})\n",
                    revert, scope, record.subject, record.short_hash
                )),
                None => out.push_str(&format!(
                    "* {}{} ({})\n",
                    revert, record.subject, record.short_hash
                )),
            }
        }
    }

    out.push('\n');
    out
}

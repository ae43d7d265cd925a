use crate::domain::tag::ReleaseTag;

/// Conventional-commit category.
///
/// Closed set: commit messages with any other prefix do not classify and are
/// excluded from changelogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Chore,
    Release,
}

impl CommitType {
    /// Parse a category keyword. Returns `None` for anything outside the
    /// closed set.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "feat" => Some(CommitType::Feat),
            "fix" => Some(CommitType::Fix),
            "docs" => Some(CommitType::Docs),
            "style" => Some(CommitType::Style),
            "refactor" => Some(CommitType::Refactor),
            "perf" => Some(CommitType::Perf),
            "test" => Some(CommitType::Test),
            "build" => Some(CommitType::Build),
            "chore" => Some(CommitType::Chore),
            "release" => Some(CommitType::Release),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Chore => "chore",
            CommitType::Release => "release",
        }
    }

    /// Section heading used when rendering a changelog
    pub fn heading(&self) -> &'static str {
        match self {
            CommitType::Feat => "Features",
            CommitType::Fix => "Bug Fixes",
            CommitType::Docs => "Documentation",
            CommitType::Style => "Styles",
            CommitType::Refactor => "Code Refactoring",
            CommitType::Perf => "Performance Improvements",
            CommitType::Test => "Tests",
            CommitType::Build => "Build System",
            CommitType::Chore => "Chores",
            CommitType::Release => "Releases",
        }
    }
}

/// One classified line of commit history
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    /// Shortened commit hash
    pub short_hash: String,
    /// The full subject line as it appeared in history
    pub raw_message: String,
    pub commit_type: CommitType,
    /// Parenthesized scope, without the parentheses
    pub scope: Option<String>,
    /// Subject text after the `type(scope): ` prefix
    pub subject: String,
    pub is_revert: bool,
    /// Release tag parsed from the commit's ref decoration, if any
    pub tag: Option<ReleaseTag>,
}

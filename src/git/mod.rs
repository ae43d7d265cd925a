//! Git history abstraction layer
//!
//! The [History] trait is the narrow interface the release engine consumes:
//! a linear commit log (subjects, short hashes, ref decorations, index
//! aligned) and a follow-tags push. Implementations:
//!
//! - [repository::Git2History]: real implementation using the `git2` crate
//! - [mock::MockHistory]: in-memory implementation for testing
//!
//! Code should depend on the trait rather than a concrete implementation.

pub mod mock;
pub mod repository;

pub use mock::MockHistory;
pub use repository::Git2History;

use crate::error::{PublishError, Result};

/// A linear commit log as three index-aligned sequences, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitLog {
    messages: Vec<String>,
    short_hashes: Vec<String>,
    ref_annotations: Vec<String>,
}

impl CommitLog {
    /// Build a log from three sequences over the same commit range.
    ///
    /// The sequences must be the same length; a mismatch means the history
    /// query itself is broken and is rejected here rather than letting a
    /// misaligned record slip into a changelog.
    pub fn new(
        messages: Vec<String>,
        short_hashes: Vec<String>,
        ref_annotations: Vec<String>,
    ) -> Result<Self> {
        if messages.len() != short_hashes.len() || messages.len() != ref_annotations.len() {
            return Err(PublishError::config(format!(
                "misaligned history query: {} messages, {} hashes, {} annotations",
                messages.len(),
                short_hashes.len(),
                ref_annotations.len()
            )));
        }
        Ok(CommitLog {
            messages,
            short_hashes,
            ref_annotations,
        })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn message(&self, index: usize) -> &str {
        &self.messages[index]
    }

    pub fn short_hash(&self, index: usize) -> &str {
        &self.short_hashes[index]
    }

    pub fn ref_annotation(&self, index: usize) -> &str {
        &self.ref_annotations[index]
    }
}

/// Narrow VCS interface consumed by the release engine.
pub trait History: Send {
    /// Query the full linear history, newest first.
    ///
    /// An unborn/empty repository yields an empty log, not an error.
    fn log(&self) -> Result<CommitLog>;

    /// Push the trunk branch together with all tags (follow-tags semantics).
    fn push_tags(&self, remote: &str, branch: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_log_alignment_enforced() {
        let result = CommitLog::new(
            vec!["feat: a".to_string()],
            vec!["h1".to_string(), "h2".to_string()],
            vec![String::new()],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_commit_log_accessors() {
        let log = CommitLog::new(
            vec!["feat: a".to_string(), "fix: b".to_string()],
            vec!["h1".to_string(), "h2".to_string()],
            vec![String::new(), "tag: x@1.0.0".to_string()],
        )
        .unwrap();

        assert_eq!(log.len(), 2);
        assert!(!log.is_empty());
        assert_eq!(log.message(0), "feat: a");
        assert_eq!(log.short_hash(1), "h2");
        assert_eq!(log.ref_annotation(1), "tag: x@1.0.0");
    }

    #[test]
    fn test_empty_commit_log() {
        let log = CommitLog::default();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}

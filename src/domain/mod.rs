//! Core domain types: commit records, categories, and release tags.

pub mod commit;
pub mod tag;

pub use commit::{CommitRecord, CommitType};
pub use tag::ReleaseTag;

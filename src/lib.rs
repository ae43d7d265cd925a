pub mod build;
pub mod bundler;
pub mod changelog;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod release;
pub mod resolver;
pub mod ui;
pub mod version_tool;
pub mod workspace;

pub use error::{PublishError, Result};

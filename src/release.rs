use std::fmt;

use crate::changelog;
use crate::config::Config;
use crate::conventional;
use crate::domain::tag::tag_prefix;
use crate::error::Result;
use crate::git::History;
use crate::resolver::ResolvedWorkload;
use crate::ui;
use crate::version_tool::{BumpOptions, VersionTool};
use crate::workspace::PackageDescriptor;

/// Per-package release progress, surfaced in terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseState {
    Pending,
    Versioning,
    ChangelogRegen,
    Pushed,
    Failed,
}

impl fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseState::Pending => "pending",
            ReleaseState::Versioning => "versioning",
            ReleaseState::ChangelogRegen => "changelog",
            ReleaseState::Pushed => "pushed",
            ReleaseState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Flags passed through to the version tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseOptions {
    pub prerelease: Option<String>,
    pub first_release: bool,
}

/// Drives per-package releases: version bump, changelog regeneration, and
/// tag push, strictly one package at a time.
///
/// Sequencing is the mutual-exclusion mechanism here. Each package's release
/// fully completes, including its push to the shared upstream, before the
/// next starts, so tag pushes never race on the upstream ref.
pub struct ReleaseCoordinator<'a> {
    version_tool: &'a dyn VersionTool,
    history: &'a dyn History,
    config: &'a Config,
}

impl<'a> ReleaseCoordinator<'a> {
    pub fn new(
        version_tool: &'a dyn VersionTool,
        history: &'a dyn History,
        config: &'a Config,
    ) -> Self {
        ReleaseCoordinator {
            version_tool,
            history,
            config,
        }
    }

    /// Release every package in the workload.
    ///
    /// The root (if selected) releases first: bump under its manifest-name
    /// tag prefix, then push. Each sub-package then bumps, regenerates its
    /// own changelog from the commits that belong to it, and pushes. Any
    /// failure aborts the remaining sequence.
    pub fn release_all(&self, workload: &ResolvedWorkload, options: &ReleaseOptions) -> Result<()> {
        if let Some(main) = &workload.main {
            self.release_root(main, options)?;
        }

        for package in &workload.packages {
            // A sub-package removed from disk since resolution has nothing
            // to release; skip it and keep going.
            if !package.work_dir.exists() {
                ui::display_status(&format!(
                    "Skipping {}: working directory no longer exists",
                    package.name
                ));
                continue;
            }
            self.release_package(package, options)?;
        }

        Ok(())
    }

    fn release_root(&self, descriptor: &PackageDescriptor, options: &ReleaseOptions) -> Result<()> {
        let name = &descriptor.manifest.name;
        ui::display_release_state(name, ReleaseState::Versioning);

        self.version_tool
            .bump(&self.bump_options(descriptor, name, options))
            .inspect_err(|_| ui::display_release_state(name, ReleaseState::Failed))?;

        self.push(name)?;
        Ok(())
    }

    fn release_package(
        &self,
        descriptor: &PackageDescriptor,
        options: &ReleaseOptions,
    ) -> Result<()> {
        let name = &descriptor.manifest.name;
        ui::display_release_state(name, ReleaseState::Versioning);

        let new_version = self
            .version_tool
            .bump(&self.bump_options(descriptor, name, options))
            .inspect_err(|_| ui::display_release_state(name, ReleaseState::Failed))?;

        ui::display_release_state(name, ReleaseState::ChangelogRegen);
        let log = self.history.log()?;
        let records = conventional::classify(&log, name, &new_version);
        changelog::regenerate(
            &descriptor.work_dir.join(&self.config.changelog_file),
            name,
            &new_version,
            &records,
        )?;

        self.push(name)?;
        Ok(())
    }

    fn bump_options(
        &self,
        descriptor: &PackageDescriptor,
        name: &str,
        options: &ReleaseOptions,
    ) -> BumpOptions {
        BumpOptions {
            work_dir: descriptor.work_dir.clone(),
            tag_prefix: tag_prefix(name),
            release_message: self.config.release_message.replace("{name}", name),
            infile: Some(descriptor.work_dir.join(&self.config.changelog_file)),
            prerelease: options.prerelease.clone(),
            first_release: options.first_release,
        }
    }

    fn push(&self, name: &str) -> Result<()> {
        self.history
            .push_tags(&self.config.remote, &self.config.branch)
            .inspect_err(|_| ui::display_release_state(name, ReleaseState::Failed))?;
        ui::display_release_state(name, ReleaseState::Pushed);
        Ok(())
    }
}

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use semver::Version;

use crate::error::{PublishError, Result};
use crate::workspace;

/// One version-bump-and-tag request, scoped to an explicit working directory.
///
/// The directory is a parameter rather than ambient process state, so
/// consecutive per-package invocations cannot interfere with each other.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOptions {
    pub work_dir: PathBuf,
    /// Package-scoped tag namespace, e.g. `pkg_a@`
    pub tag_prefix: String,
    /// Release commit message, already parameterized with the package name
    pub release_message: String,
    /// Changelog file the tool would otherwise manage; informational only
    /// since the tool's own changelog generation is always skipped
    pub infile: Option<PathBuf>,
    pub prerelease: Option<String>,
    pub first_release: bool,
}

/// Narrow interface over the external version-bump-and-tag tool.
pub trait VersionTool: Send + Sync {
    /// Bump the package in `options.work_dir`, create the release commit and
    /// tag under `options.tag_prefix`, and return the new version.
    fn bump(&self, options: &BumpOptions) -> Result<Version>;
}

/// [VersionTool] backed by a standard-version-style command.
///
/// The tool rewrites the package manifest on success, so the bumped version
/// is read back from `package.json` afterwards.
pub struct StandardVersionTool {
    command: String,
}

impl StandardVersionTool {
    pub fn new(command: impl Into<String>) -> Self {
        StandardVersionTool {
            command: command.into(),
        }
    }
}

impl VersionTool for StandardVersionTool {
    fn bump(&self, options: &BumpOptions) -> Result<Version> {
        let mut cmd = Command::new(&self.command);
        cmd.current_dir(&options.work_dir)
            .arg("--tag-prefix")
            .arg(&options.tag_prefix)
            .arg("--releaseCommitMessageFormat")
            .arg(&options.release_message)
            .arg("--skip.changelog");

        if let Some(infile) = &options.infile {
            cmd.arg("--infile").arg(infile);
        }
        if let Some(prerelease) = &options.prerelease {
            cmd.arg("--prerelease").arg(prerelease);
        }
        if options.first_release {
            cmd.arg("--first-release");
        }

        let output = cmd.output().map_err(|e| {
            PublishError::version_tool(format!("cannot run {}: {}", self.command, e))
        })?;

        if !output.status.success() {
            return Err(PublishError::version_tool(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        read_bumped_version(&options.work_dir)
    }
}

/// Read the freshly bumped version back from the package manifest.
fn read_bumped_version(work_dir: &Path) -> Result<Version> {
    let manifest = workspace::read_manifest(work_dir)?;
    Version::parse(&manifest.version).map_err(|e| {
        PublishError::version(format!(
            "manifest version '{}' is not semver: {}",
            manifest.version, e
        ))
    })
}

/// Mock version tool returning scripted versions and recording invocations.
pub struct MockVersionTool {
    versions: Mutex<Vec<Version>>,
    calls: Mutex<Vec<BumpOptions>>,
    fail: bool,
}

impl MockVersionTool {
    /// Serve the given versions, one per `bump` call, in order
    pub fn new(versions: Vec<Version>) -> Self {
        MockVersionTool {
            versions: Mutex::new(versions),
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Fail every `bump` call
    pub fn failing() -> Self {
        MockVersionTool {
            versions: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<BumpOptions> {
        self.calls.lock().unwrap().clone()
    }
}

impl VersionTool for MockVersionTool {
    fn bump(&self, options: &BumpOptions) -> Result<Version> {
        self.calls.lock().unwrap().push(options.clone());
        if self.fail {
            return Err(PublishError::version_tool("mock bump failure"));
        }
        let mut versions = self.versions.lock().unwrap();
        if versions.is_empty() {
            return Err(PublishError::version_tool("no scripted version left"));
        }
        Ok(versions.remove(0))
    }
}

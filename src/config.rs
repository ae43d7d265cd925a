use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for mono-publish.
///
/// Covers workspace layout, the upstream remote/branch tags are pushed to,
/// and the external bundler and version-tool commands.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Directory under the workspace root that holds sub-packages
    #[serde(default = "default_packages_dir")]
    pub packages_dir: String,

    /// Remote that tags are pushed to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Trunk branch pushed alongside tags
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Changelog file name regenerated per sub-package
    #[serde(default = "default_changelog_file")]
    pub changelog_file: String,

    /// Release commit message template; `{name}` is replaced with the
    /// package's logical name before the version tool runs
    #[serde(default = "default_release_message")]
    pub release_message: String,

    /// External bundler command
    #[serde(default = "default_bundler_command")]
    pub bundler_command: String,

    /// External version-bump-and-tag command
    #[serde(default = "default_version_command")]
    pub version_command: String,
}

fn default_packages_dir() -> String {
    "package".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_release_message() -> String {
    "release: {name}@{version}".to_string()
}

fn default_bundler_command() -> String {
    "rollup".to_string()
}

fn default_version_command() -> String {
    "standard-version".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            packages_dir: default_packages_dir(),
            remote: default_remote(),
            branch: default_branch(),
            changelog_file: default_changelog_file(),
            release_message: default_release_message(),
            bundler_command: default_bundler_command(),
            version_command: default_version_command(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `monopublish.toml` in current directory
/// 3. `.monopublish.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./monopublish.toml").exists() {
        fs::read_to_string("./monopublish.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".monopublish.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

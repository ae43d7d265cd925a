use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PublishError, Result};

/// Entry-point file that marks a directory as a buildable package
pub const ENTRY_FILE: &str = "index.ts";

/// Manifest file read from each package's working directory
pub const MANIFEST_FILE: &str = "package.json";

/// Build-config reference resolved per package
pub const BUILD_CONFIG_FILE: &str = "tsconfig.json";

/// Package metadata read from `package.json`.
///
/// Only the fields the pipeline needs; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    /// Declared UMD bundle output path, relative to the package root
    pub main: String,
    /// Declared ES-module bundle output path, relative to the package root
    pub module: String,
}

/// The resolved, disk-backed identity of one buildable/releasable unit.
///
/// Constructed fresh per invocation from disk state; immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    /// Logical package name; empty for the root package
    pub name: String,
    /// Directory containing the entry-point source file
    pub source_dir: PathBuf,
    /// Directory the bundler and version tool operate from
    pub work_dir: PathBuf,
    /// Path to the package-level build configuration, passed through opaquely
    pub build_config: PathBuf,
    pub manifest: Manifest,
}

impl PackageDescriptor {
    /// Descriptor for the root package (`src/` sources, manifest at the root).
    pub fn for_root(root: &Path) -> Result<Self> {
        Ok(PackageDescriptor {
            name: String::new(),
            source_dir: root.join("src"),
            work_dir: root.to_path_buf(),
            build_config: root.join(BUILD_CONFIG_FILE),
            manifest: read_manifest(root)?,
        })
    }

    /// Descriptor for a named sub-package under the packages directory.
    ///
    /// A missing or unreadable manifest is a fatal configuration error, so an
    /// explicitly named package never yields a partial workload.
    pub fn for_sub_package(packages_dir: &Path, name: &str) -> Result<Self> {
        let dir = packages_dir.join(name);
        Ok(PackageDescriptor {
            name: name.to_string(),
            source_dir: dir.clone(),
            work_dir: dir.clone(),
            build_config: dir.join(BUILD_CONFIG_FILE),
            manifest: read_manifest(&dir)?,
        })
    }

    /// Full path to the package's entry-point source file
    pub fn entry_point(&self) -> PathBuf {
        self.source_dir.join(ENTRY_FILE)
    }
}

/// Read and parse a package manifest from its directory.
pub fn read_manifest(dir: &Path) -> Result<Manifest> {
    let path = dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path)
        .map_err(|e| PublishError::manifest(format!("cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| PublishError::manifest(format!("cannot parse {}: {}", path.display(), e)))
}

/// List sub-package names under the packages directory.
///
/// A missing packages directory is an empty workspace, not an error. A name
/// qualifies only if it is a directory containing the entry-point file.
/// Order is directory-listing order.
pub fn list_sub_package_names(packages_dir: &Path) -> Result<Vec<String>> {
    if !packages_dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(packages_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() && path.join(ENTRY_FILE).exists() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    Ok(names)
}

/// Convert a snake/kebab-case package name to the camel-case UMD export name.
///
/// Each letter directly after an underscore is uppercased and the underscore
/// removed; everything else is left as-is.
pub fn to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

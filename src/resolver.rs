use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::workspace::{self, PackageDescriptor};

/// Selection parameters, mirroring the `-m/--main` and `-p/--package` flags.
///
/// `package` distinguishes flag-absent (`None`), bare flag (`Some(None)`),
/// and an explicit comma-separated list (`Some(Some(list))`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pub main: bool,
    pub package: Option<Option<String>>,
}

/// The resolved work list: an optional root descriptor plus sub-packages in
/// discovery (or caller-supplied) order. No dependency ordering exists or is
/// needed; packages build independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWorkload {
    pub main: Option<PackageDescriptor>,
    pub packages: Vec<PackageDescriptor>,
}

impl ResolvedWorkload {
    /// All selected descriptors, root first
    pub fn descriptors(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.main.iter().chain(self.packages.iter())
    }
}

/// Resolve CLI parameters into a concrete workload.
///
/// Selection policy:
///
/// | package        | main  | result                        |
/// |----------------|-------|-------------------------------|
/// | absent         | true  | root only                     |
/// | absent         | false | root + all sub-packages       |
/// | list           | true  | root + named subset, in order |
/// | list           | false | named subset only             |
/// | bare flag      | true  | root + all sub-packages       |
/// | bare flag      | false | all sub-packages, no root     |
///
/// Any descriptor error (missing manifest for an explicitly named package)
/// fails the whole resolution; there is no partial workload.
pub fn resolve(root: &Path, params: &Params, config: &Config) -> Result<ResolvedWorkload> {
    let packages_dir = root.join(&config.packages_dir);

    match &params.package {
        Some(selection) => {
            let main = if params.main {
                Some(PackageDescriptor::for_root(root)?)
            } else {
                None
            };

            let names = match selection {
                Some(list) => list
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                None => workspace::list_sub_package_names(&packages_dir)?,
            };

            let packages = names
                .iter()
                .map(|name| PackageDescriptor::for_sub_package(&packages_dir, name))
                .collect::<Result<Vec<_>>>()?;

            Ok(ResolvedWorkload { main, packages })
        }
        None if params.main => Ok(ResolvedWorkload {
            main: Some(PackageDescriptor::for_root(root)?),
            packages: Vec::new(),
        }),
        None => {
            let names = workspace::list_sub_package_names(&packages_dir)?;
            let packages = names
                .iter()
                .map(|name| PackageDescriptor::for_sub_package(&packages_dir, name))
                .collect::<Result<Vec<_>>>()?;

            Ok(ResolvedWorkload {
                main: Some(PackageDescriptor::for_root(root)?),
                packages,
            })
        }
    }
}

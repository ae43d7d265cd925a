use semver::Version;

/// A package-scoped release tag of the form `<name>@<major.minor.patch>`.
///
/// Each package owns an independent tag lineage under its own name, so
/// multiple packages can share one repository's tag space without collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub package: String,
    pub version: Version,
}

impl ReleaseTag {
    /// Parse the first release tag out of a git ref-decoration string,
    /// e.g. `"tag: pkg_a@1.2.0, tag: v3"` -> `pkg_a` at 1.2.0.
    ///
    /// A decoration may carry several tags; only the first match is used.
    pub fn parse_decoration(decoration: &str) -> Option<ReleaseTag> {
        let re = regex::Regex::new(r"tag: ([\w.-]+)@(\d+\.\d+\.\d+)").ok()?;
        let captures = re.captures(decoration)?;
        let package = captures.get(1)?.as_str().to_string();
        let version = Version::parse(captures.get(2)?.as_str()).ok()?;
        Some(ReleaseTag { package, version })
    }

    /// Tag name under this package's prefix (`name@version`)
    pub fn name(&self) -> String {
        format!("{}@{}", self.package, self.version)
    }
}

/// Tag prefix for a package's release lineage (`name@`)
pub fn tag_prefix(package_name: &str) -> String {
    format!("{}@", package_name)
}

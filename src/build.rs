use crate::bundler::{env_substitutions, Bundler, ModuleFormat, RESOLUTION_ORDER};
use crate::error::Result;
use crate::resolver::ResolvedWorkload;
use crate::ui;
use crate::workspace::{to_camel, PackageDescriptor};

/// Build every resolved package, strictly head-to-tail.
///
/// Each package fully completes (both artifacts written) before the next
/// starts. The first failure aborts the whole pipeline; remaining packages
/// are not attempted and nothing is retried.
pub fn build_workload(bundler: &dyn Bundler, workload: &ResolvedWorkload) -> Result<()> {
    for descriptor in workload.descriptors() {
        build_package(bundler, descriptor)?;
    }
    Ok(())
}

/// Compile one package and emit its UMD and ES artifacts.
///
/// Both artifacts come from the same compiled bundle. The UMD artifact gets
/// an export name derived from the manifest name (`my_pkg` -> `myPkg`); both
/// use named exports.
fn build_package(bundler: &dyn Bundler, descriptor: &PackageDescriptor) -> Result<()> {
    let label = if descriptor.name.is_empty() {
        "main"
    } else {
        descriptor.name.as_str()
    };
    ui::display_status(&format!("Building {}", label));

    let bundle = bundler.compile(
        &descriptor.entry_point(),
        &RESOLUTION_ORDER,
        &descriptor.build_config,
        &env_substitutions(),
    )?;

    bundler.write(
        &bundle,
        &descriptor.work_dir.join(&descriptor.manifest.main),
        ModuleFormat::Umd,
        Some(&to_camel(&descriptor.manifest.name)),
    )?;

    bundler.write(
        &bundle,
        &descriptor.work_dir.join(&descriptor.manifest.module),
        ModuleFormat::Es,
        None,
    )?;

    ui::display_success(&format!("Built {}", label));
    Ok(())
}

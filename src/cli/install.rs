use crate::PackageName;
use crate::core::installer::{InstallReport, Installer};
use crate::core::pip::PackageBackend;
use crate::core::python::ModuleProbe;
use crate::utils::output::Reporter;

/// Batch mode: install every name given on the command line, then print a
/// one-line summary. Failures are part of the report, never an error.
pub fn execute<P, B, R>(
    installer: &mut Installer<P, B, R>,
    packages: &[PackageName],
) -> InstallReport
where
    P: ModuleProbe,
    B: PackageBackend,
    R: Reporter,
{
    let report = installer.install_many(packages);
    installer.reporter_mut().summary(&report);
    report
}

use crate::PackageName;
use crate::core::pip::PackageBackend;
use crate::core::python::ModuleProbe;
use crate::utils::output::Reporter;
use tracing::{info, warn};

/// Result of making sure one package is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AlreadyPresent,
    Installed,
    Failed,
}

/// Outcomes of one batch, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    entries: Vec<(PackageName, Outcome)>,
}

impl InstallReport {
    pub fn push(&mut self, name: PackageName, outcome: Outcome) {
        self.entries.push((name, outcome));
    }

    pub fn entries(&self) -> &[(PackageName, Outcome)] {
        &self.entries
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.entries.iter().map(|(_, outcome)| *outcome).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn count(&self, wanted: Outcome) -> usize {
        self.entries.iter().filter(|(_, outcome)| *outcome == wanted).count()
    }

    pub fn installed(&self) -> usize {
        self.count(Outcome::Installed)
    }

    pub fn already_present(&self) -> usize {
        self.count(Outcome::AlreadyPresent)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::Failed)
    }

    pub fn failed_names(&self) -> impl Iterator<Item = &PackageName> {
        self.entries
            .iter()
            .filter(|(_, outcome)| *outcome == Outcome::Failed)
            .map(|(name, _)| name)
    }

    pub fn extend(&mut self, other: InstallReport) {
        self.entries.extend(other.entries);
    }
}

/// Installs packages one by one, skipping those the probe already resolves.
///
/// Nothing is cached between calls: every name is probed every time, and
/// duplicates in a batch are handled independently.
pub struct Installer<P, B, R> {
    probe: P,
    backend: B,
    reporter: R,
}

impl<P, B, R> Installer<P, B, R>
where
    P: ModuleProbe,
    B: PackageBackend,
    R: Reporter,
{
    pub fn new(probe: P, backend: B, reporter: R) -> Self {
        Self {
            probe,
            backend,
            reporter,
        }
    }

    pub fn is_installed(&self, name: &PackageName) -> bool {
        self.probe.is_resolvable(name)
    }

    pub fn install_one(&mut self, name: &PackageName) -> Outcome {
        if self.is_installed(name) {
            self.reporter.already_present(name);
            return Outcome::AlreadyPresent;
        }

        self.reporter.installing(name);
        match self.backend.install(name) {
            Ok(()) => {
                self.reporter.installed(name);
                Outcome::Installed
            }
            Err(e) => {
                warn!(package = %name, error = %e, "install failed");
                self.reporter.failed(name, &e.to_string());
                Outcome::Failed
            }
        }
    }

    /// Runs `install_one` over `names` in order. A failure never stops the
    /// batch, so the report always has one entry per requested name.
    pub fn install_many(&mut self, names: &[PackageName]) -> InstallReport {
        info!(count = names.len(), "installing batch");
        let mut report = InstallReport::default();
        for name in names {
            let outcome = self.install_one(name);
            report.push(name.clone(), outcome);
        }
        info!(
            installed = report.installed(),
            already_present = report.already_present(),
            failed = report.failed(),
            "batch finished"
        );
        report
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn into_parts(self) -> (P, B, R) {
        (self.probe, self.backend, self.reporter)
    }
}

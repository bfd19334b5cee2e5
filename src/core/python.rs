use crate::{PackageName, PipitError, Result, constants::*};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Exits 0 when the module resolves. `find_spec` locates the module without
/// executing it; any exception (bad name, broken parent package) counts as
/// not found.
const FIND_SPEC_SCRIPT: &str = "import importlib.util, sys
try:
    found = importlib.util.find_spec(sys.argv[1]) is not None
except Exception:
    found = False
sys.exit(0 if found else 1)
";

/// Answers whether a name is importable in some environment.
///
/// "Importable" is not the same as "installed by pip": a distribution can
/// ship a module under another name, and a local file can shadow a package.
/// Callers get exactly the importability answer.
pub trait ModuleProbe {
    fn is_resolvable(&self, name: &PackageName) -> bool;
}

#[derive(Debug, Clone)]
pub struct PythonEnvironment {
    pub python_path: PathBuf,
}

impl PythonEnvironment {
    pub fn new(python_path: impl Into<PathBuf>) -> Self {
        Self {
            python_path: python_path.into(),
        }
    }

    /// Picks the interpreter: the explicit one if given, otherwise the first
    /// candidate found on PATH. Never fails; a missing interpreter shows up
    /// later as failed installs.
    pub fn locate(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            debug!(python = %path.display(), "using configured interpreter");
            return Self::new(path);
        }

        for candidate in PYTHON_CANDIDATES {
            if let Ok(path) = which::which(candidate) {
                debug!(python = %path.display(), "found interpreter on PATH");
                return Self::new(path);
            }
        }

        debug!("no interpreter on PATH, falling back to {}", FALLBACK_PYTHON);
        Self::new(FALLBACK_PYTHON)
    }

    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.python_path)
            .arg("--version")
            .output()
            .map_err(|e| PipitError::PythonEnv(format!("Failed to execute python: {}", e)))?;

        if !output.status.success() {
            return Err(PipitError::PythonEnv(format!(
                "{} --version exited with {}",
                self.python_path.display(),
                output.status
            )));
        }

        // Python 2 printed the version on stderr
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
        } else {
            Ok(stdout)
        }
    }
}

impl ModuleProbe for PythonEnvironment {
    fn is_resolvable(&self, name: &PackageName) -> bool {
        let status = Command::new(&self.python_path)
            .arg("-c")
            .arg(FIND_SPEC_SCRIPT)
            .arg(name.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => {
                debug!(package = %name, code = ?status.code(), "find_spec probe finished");
                status.success()
            }
            Err(e) => {
                debug!(package = %name, error = %e, "find_spec probe could not start");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_interpreter_wins() {
        let env = PythonEnvironment::locate(Some(Path::new("/opt/py/bin/python3.12")));
        assert_eq!(env.python_path, PathBuf::from("/opt/py/bin/python3.12"));
    }

    #[test]
    fn missing_interpreter_is_not_resolvable() {
        let env = PythonEnvironment::new("/definitely/not/a/python");
        let name = PackageName::new("os").unwrap();
        assert!(!env.is_resolvable(&name));
    }

    #[test]
    fn missing_interpreter_has_no_version() {
        let env = PythonEnvironment::new("/definitely/not/a/python");
        assert!(matches!(env.version(), Err(PipitError::PythonEnv(_))));
    }

    #[test]
    fn find_spec_against_a_real_interpreter() {
        let Ok(python) = which::which("python3") else {
            return;
        };
        let env = PythonEnvironment::new(python);
        let resolves = |name: &str| env.is_resolvable(&PackageName::new(name).unwrap());

        assert!(resolves("os"));
        assert!(resolves("json.decoder"));

        assert!(!resolves("nonexistent-pkg-xyz"));
        // find_spec raises for these; the script turns that into "not found"
        assert!(!resolves(".bad"));
        assert!(!resolves("nope.child"));
    }
}

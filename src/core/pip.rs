use crate::core::python::PythonEnvironment;
use crate::{PackageName, PipitError, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Something that can install a single package by name.
pub trait PackageBackend {
    fn install(&self, name: &PackageName) -> Result<()>;
}

/// `python -m pip install`, run in the foreground so pip's own output is
/// visible to the user.
pub struct Pip {
    python_path: PathBuf,
    extra_args: Vec<String>,
}

impl Pip {
    pub fn new(env: &PythonEnvironment) -> Self {
        Self {
            python_path: env.python_path.clone(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    fn command_args(&self, name: &PackageName) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        args.extend(self.extra_args.iter().cloned());
        args.push(name.to_string());
        args
    }

    fn describe(&self, name: &PackageName) -> String {
        format!("{} {}", self.python_path.display(), self.command_args(name).join(" "))
    }
}

impl PackageBackend for Pip {
    fn install(&self, name: &PackageName) -> Result<()> {
        let status = Command::new(&self.python_path)
            .args(self.command_args(name))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| PipitError::CommandFailed {
                command: self.describe(name),
                reason: e.to_string(),
            })?;

        if !status.success() {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(PipitError::InstallationFailed(format!(
                "{} (pip exited with {})",
                name, code
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pip(extra: &[&str]) -> Pip {
        Pip::new(&PythonEnvironment::new("python3"))
            .with_extra_args(extra.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn name_is_the_last_argument() {
        let name = PackageName::new("numpy").unwrap();
        assert_eq!(pip(&[]).command_args(&name), ["-m", "pip", "install", "numpy"]);
        assert_eq!(
            pip(&["--user", "--quiet"]).command_args(&name),
            ["-m", "pip", "install", "--user", "--quiet", "numpy"]
        );
    }

    #[test]
    fn missing_interpreter_is_a_launch_failure() {
        let pip = Pip::new(&PythonEnvironment::new("/definitely/not/a/python"));
        let name = PackageName::new("numpy").unwrap();
        match pip.install(&name) {
            Err(PipitError::CommandFailed { command, .. }) => {
                assert!(command.ends_with("-m pip install numpy"));
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }
}

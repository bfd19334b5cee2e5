//! Pipit - install Python libraries from the command line
//!
//! Every requested name is first checked against the target interpreter:
//! - names that already resolve as importable modules are skipped
//! - the rest are handed to `python -m pip install`, one at a time
//! - a failed install is reported and the batch carries on

pub mod cli;
pub mod core;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    config::PipitConfig,
    installer::{Installer, Outcome, InstallReport},
    pip::{Pip, PackageBackend},
    python::{ModuleProbe, PythonEnvironment},
};

pub use crate::utils::output::{ColorChoice, ColoredReporter, PlainReporter, Reporter};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Python environment error: {0}")]
    PythonEnv(String),

    #[error("Failed to run {command}: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Installation failed: {0}")]
    InstallationFailed(String),
}

pub type Result<T> = std::result::Result<T, PipitError>;

/// Name handed to pip as-is. Only emptiness is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PipitError::InvalidInput(
                "package name must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PackageName {
    type Err = PipitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub mod constants {
    /// Interpreters tried on PATH when none is configured, in order.
    pub const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];
    pub const FALLBACK_PYTHON: &str = "python3";
    pub const CONFIG_DIR_NAME: &str = "pipit";
    pub const CONFIG_FILE_NAME: &str = "config.toml";
    pub const EXIT_WORDS: &[&str] = &["exit", "quit"];
    pub const PROMPT: &str = "Enter library names (or 'exit' to quit): ";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_trims_and_keeps_text() {
        let name = PackageName::new("  numpy ").unwrap();
        assert_eq!(name.as_str(), "numpy");
        assert_eq!(name.to_string(), "numpy");
    }

    #[test]
    fn package_name_rejects_blank() {
        assert!(matches!(PackageName::new(""), Err(PipitError::InvalidInput(_))));
        assert!(matches!("   ".parse::<PackageName>(), Err(PipitError::InvalidInput(_))));
    }

    #[test]
    fn package_name_is_not_otherwise_validated() {
        assert!(PackageName::new("requests[socks]>=2").is_ok());
        assert!(PackageName::new("nonexistent-pkg-xyz").is_ok());
    }

    #[test]
    fn error_messages() {
        let err = PipitError::InstallationFailed("numpy".to_string());
        assert_eq!(err.to_string(), "Installation failed: numpy");

        let err = PipitError::CommandFailed {
            command: "python3 -m pip install numpy".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to run python3 -m pip install numpy: not found");
    }
}

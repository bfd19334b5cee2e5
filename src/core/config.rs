use crate::utils::output::ColorChoice;
use crate::{PipitError, Result, constants::*};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Optional defaults, read from `<config dir>/pipit/config.toml`.
///
/// ```toml
/// [python]
/// executable = "/usr/bin/python3.12"
///
/// [pip]
/// extra-args = ["--user"]
///
/// [output]
/// color = "never"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PipitConfig {
    #[serde(default)]
    pub python: PythonSection,
    #[serde(default)]
    pub pip: PipSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PythonSection {
    pub executable: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PipSection {
    #[serde(default, rename = "extra-args")]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub color: ColorChoice,
}

impl PipitConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PipitError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents).map_err(|e| {
            PipitError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| PipitError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads `explicit` if given (errors are fatal), otherwise the default
    /// file when it exists. A missing or broken default file means built-in
    /// defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_with(explicit, Self::default_path())
    }

    fn resolve_with(explicit: Option<&Path>, default_path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path {
            Some(path) if path.is_file() => match Self::load(&path) {
                Ok(config) => Ok(config),
                Err(e) => {
                    warn!(error = %e, "ignoring default config file");
                    Ok(Self::default())
                }
            },
            _ => Ok(Self::default()),
        }
    }
}

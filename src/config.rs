//! Configuration for the command-line front end.
//!
//! Values come from, in increasing precedence: built-in defaults, a YAML
//! file (`--config <FILE>` or `category-tree.yaml` in the working
//! directory), and command-line flags applied by the CLI.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "category-tree.yaml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for termcolor::ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => termcolor::ColorChoice::Auto,
            ColorMode::Always => termcolor::ColorChoice::Always,
            ColorMode::Never => termcolor::ColorChoice::Never,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spaces per tree level.
    pub indent: usize,
    pub show_product_counts: bool,
    /// When false, inactive categories and everything below them are hidden.
    pub show_inactive: bool,
    pub color: ColorMode,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: 2,
            show_product_counts: true,
            show_inactive: true,
            color: ColorMode::Auto,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads `explicit` if given, else the default file if it exists, else defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(path, &text)
    }

    pub fn from_yaml(path: &Path, text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if config.indent == 0 {
            return Err(Error::Config {
                path: path.to_path_buf(),
                message: "indent must be at least 1".to_string(),
            });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_yaml(Path::new("c.yaml"), "indent: 4\ncolor: never\n").unwrap();
        assert_eq!(config.indent, 4);
        assert_eq!(config.color, ColorMode::Never);
        assert!(config.show_inactive);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_yaml(Path::new("c.yaml"), "\n").unwrap(), Config::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Config::from_yaml(Path::new("c.yaml"), "indnet: 4").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn zero_indent_is_rejected() {
        assert!(Config::from_yaml(Path::new("c.yaml"), "indent: 0").is_err());
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

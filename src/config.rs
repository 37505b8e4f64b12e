//! Configuration file schema for sloppy.
//!
//! A config narrows which rules run and which files are scanned. Every
//! field is optional; an empty file means "all rules, all languages".

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lang::Language;
use crate::rules::{Axis, Catalog, Severity};
use crate::scan::RuleFilter;

/// Config file names searched for in the scanned directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["sloppy.yaml", ".sloppy.yaml", "sloppy.yml"];

/// Errors loading or validating a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unknown rule {0:?} in disabled_rules")]
    UnknownRule(String),
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("jobs must be at least 1")]
    InvalidJobs,
}

/// Top-level config definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Rule identifiers that never run
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    /// Skip rules below this severity
    #[serde(default)]
    pub min_severity: Option<Severity>,
    /// Skip every rule on these axes
    #[serde(default)]
    pub excluded_axes: Vec<Axis>,
    /// Only scan files of these languages (empty = all)
    #[serde(default)]
    pub languages: Vec<Language>,
    /// Glob patterns for paths to exclude (e.g., "**/generated/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Exit non-zero when a finding at or above this severity remains
    #[serde(default)]
    pub fail_on: Option<Severity>,
    /// Worker threads (default: available parallelism)
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config from YAML text. Empty text yields the default config.
    pub fn parse_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Find a config file for `dir`: first in `dir` itself, then in the
    /// user config directory.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        let local = DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|p| p.is_file());
        if local.is_some() {
            return local;
        }

        directories::ProjectDirs::from("", "", "sloppy")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .filter(|p| p.is_file())
    }

    /// Check the config against the rule catalog.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        if let Some(id) = self.disabled_rules.iter().find(|id| !catalog.contains(id)) {
            return Err(ConfigError::UnknownRule(id.clone()));
        }
        if self.jobs == Some(0) {
            return Err(ConfigError::InvalidJobs);
        }
        self.exclusion_set()?;
        Ok(())
    }

    /// Rule filter derived from this config.
    pub fn rule_filter(&self) -> RuleFilter {
        RuleFilter {
            disabled: self.disabled_rules.iter().cloned().collect(),
            min_severity: self.min_severity,
            excluded_axes: self.excluded_axes.iter().copied().collect(),
        }
    }

    /// Compiled `excluded_paths`. Uses globset, so `**` matches across
    /// directories.
    pub fn exclusion_set(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| ConfigError::InvalidGlob {
            pattern: self.excluded_paths.join(", "),
            source,
        })
    }

    /// Whether files of `lang` should be scanned.
    pub fn includes_language(&self, lang: Language) -> bool {
        self.languages.is_empty() || self.languages.contains(&lang)
    }

    /// Severity that makes the run fail (defaults to high).
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::High)
    }
}

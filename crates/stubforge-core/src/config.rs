//! Configuration management for stubforge code generation.
//!
//! This module defines the `Config` struct describing one generation run. The
//! configuration can be created programmatically or loaded from a YAML (or JSON,
//! by file extension) file.
//!
//! # Examples
//!
//! ```no_run
//! use stubforge_core::config::Config;
//!
//! # async fn example() -> stubforge_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::new("openapi.yaml", "App", "generated");
//! config.template_kind = "php".to_string();
//!
//! // Or load from a config file
//! let config = Config::from_file("stubforge.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{
    generator::{HANDLER_DIR, HYDRATOR_DIR},
    output::{IgnoreRules, IGNORE_FILE_NAME},
    templates::TemplateKind,
    Error, Result,
};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Directory below the output directory receiving the route table by default
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path or URL of the OpenAPI specification
    pub spec: String,

    /// Base namespace of the generated code
    pub namespace: String,

    /// Output directory for handlers and hydrators
    pub output_dir: String,

    /// Directory receiving the route table (default: `<output_dir>/config`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<String>,

    /// Template kind to render with
    #[serde(default = "default_template_kind")]
    pub template_kind: String,

    /// Custom template directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<String>,

    /// Ignore file (default: `<output_dir>/.stubforge-ignore` when present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<String>,

    /// Overwrite files that already exist
    #[serde(default)]
    pub overwrite: bool,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(
        spec: impl Into<String>,
        namespace: impl Into<String>,
        output_dir: impl Into<String>,
    ) -> Self {
        Self {
            spec: spec.into(),
            namespace: namespace.into(),
            output_dir: output_dir.into(),
            config_dir: None,
            template_kind: default_template_kind(),
            template_dir: None,
            ignore_file: None,
            overwrite: false,
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// Parsed template kind
    pub fn template_kind(&self) -> Result<TemplateKind> {
        TemplateKind::from_str(&self.template_kind).map_err(Error::config)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    /// Route table directory, defaulting below the output directory
    pub fn config_dir(&self) -> PathBuf {
        match &self.config_dir {
            Some(dir) => PathBuf::from(dir),
            None => self.output_dir().join(DEFAULT_CONFIG_DIR),
        }
    }

    /// Ignore rules of this run.
    ///
    /// An explicit ignore file must exist; the default one is optional. Unless
    /// `overwrite` is set, existing handlers and hydrators are protected as well.
    /// The route table aggregates every operation and is only kept by an
    /// explicit pattern.
    pub fn ignore_rules(&self) -> Result<IgnoreRules> {
        let rules = match &self.ignore_file {
            Some(file) => IgnoreRules::from_file(file)?,
            None => {
                let default = self.output_dir().join(IGNORE_FILE_NAME);
                if default.is_file() {
                    IgnoreRules::from_file(&default)?
                } else {
                    IgnoreRules::new(self.output_dir())
                }
            }
        };
        if self.overwrite {
            return Ok(rules);
        }
        let output_dir = self.output_dir();
        Ok(rules
            .protect_existing(output_dir.join(HANDLER_DIR))
            .protect_existing(output_dir.join(HYDRATOR_DIR)))
    }
}

fn default_template_kind() -> String {
    TemplateKind::default().to_string()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

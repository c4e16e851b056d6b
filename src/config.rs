// src/config.rs

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

use crate::engine::ModelDescriptor;

/// Root configuration loaded from `statusmap.yaml`.
///
/// This file controls:
/// - Which display models errors can be attributed to
/// - The default key prefix
/// - How mapped errors are written out
///
/// Every section is optional; an empty file maps everything to the summary.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Display models by name.
    ///
    /// Example:
    ///
    /// models:
    ///   member:
    ///     fields: [Name, Email, Phone]
    #[serde(default)]
    pub models: BTreeMap<String, ModelConfig>,

    /// Default key prefix, e.g. `Input` turns `Email` into `Input.Email`.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    pub fields: Vec<String>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_mode")]
    pub mode: OutputMode,

    /// Only used when mode = file
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: default_output_mode(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Stdout,
    Pretty,
    Simple,
    File,
}

fn default_output_mode() -> OutputMode {
    OutputMode::Simple
}

impl Config {
    /// Load and parse `statusmap.yaml` from disk.
    ///
    /// A missing file is not an error when `allow_missing` is set; the
    /// defaults are used instead.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Self> {
        if allow_missing && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let cfg: Config = if raw.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&raw).context("Failed to parse YAML config")?
        };

        cfg.validate()?;
        Ok(cfg)
    }

    /// Structural checks that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let field_name = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")?;

        for (name, model) in &self.models {
            if model.fields.is_empty() {
                bail!("Model '{}' must list at least one field", name);
            }

            for field in &model.fields {
                if !field_name.is_match(field) {
                    bail!("Model '{}' has an invalid field name: {:?}", name, field);
                }
            }
        }

        if let Some(prefix) = &self.prefix {
            if prefix.starts_with('.') || prefix.ends_with('.') {
                bail!("prefix must not start or end with '.': {:?}", prefix);
            }
        }

        if self.output.mode == OutputMode::File && self.output.file.is_none() {
            bail!("output.file must be set when output.mode = file");
        }

        Ok(())
    }

    /// Look up a display model by name.
    pub fn model(&self, name: &str) -> Result<ModelDescriptor> {
        let model = self.models.get(name).with_context(|| {
            let known: Vec<&str> = self.models.keys().map(String::as_str).collect();
            format!("Unknown display model '{}' (known: {})", name, known.join(", "))
        })?;

        Ok(ModelDescriptor::new(name, model.fields.iter().cloned()))
    }
}

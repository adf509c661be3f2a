use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use larder_scaling::ServingsBounds;
use serde::Deserialize;
use std::env;
use std::path::Path;
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub servings: ServingsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Servings a reader may pick. Recipes can narrow this range further.
#[derive(Debug, Deserialize, Clone)]
pub struct ServingsConfig {
    #[serde(default = "default_servings_min")]
    pub min: f64,
    #[serde(default = "default_servings_max")]
    pub max: f64,
    #[serde(default = "default_servings_step")]
    pub step: f64,
}

impl Default for ServingsConfig {
    fn default() -> Self {
        Self {
            min: default_servings_min(),
            max: default_servings_max(),
            step: default_servings_step(),
        }
    }
}

impl ServingsConfig {
    pub fn bounds(&self) -> ServingsBounds {
        ServingsBounds {
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }
}

fn default_servings_min() -> f64 {
    ServingsBounds::default().min
}

fn default_servings_max() -> f64 {
    ServingsBounds::default().max
}

fn default_servings_step() -> f64 {
    ServingsBounds::default().step
}

#[derive(
    Debug,
    Deserialize,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LARDER__SERVINGS__MAX, etc.)
    /// 2. Config file: the given path, else CONFIG_PATH, else config/default.toml
    /// 3. Hardcoded defaults
    ///
    /// An explicitly given file must exist; the fallback paths are optional.
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServingsBounds::default();

        let mut builder = ConfigBuilder::builder()
            .set_default("observability.log_level", default_log_level())?
            .set_default("servings.min", defaults.min)?
            .set_default("servings.max", defaults.max)?
            .set_default("servings.step", defaults.step)?
            .set_default("output.format", OutputFormat::default().as_ref())?;

        match config_path {
            Some(path) => {
                builder = builder.add_source(File::with_name(&path).required(true));
            }
            None => {
                let fallback = env::var("CONFIG_PATH")
                    .unwrap_or_else(|_| "config/default.toml".to_string());

                if Path::new(&fallback).exists() {
                    builder = builder.add_source(File::with_name(&fallback));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("LARDER")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let servings = &self.servings;

        if !servings.min.is_finite() || servings.min <= 0.0 {
            return Err("Servings min must be greater than 0".to_string());
        }
        if !servings.max.is_finite() || servings.max < servings.min {
            return Err("Servings max must not be lower than servings min".to_string());
        }
        if !servings.step.is_finite() || servings.step <= 0.0 {
            return Err("Servings step must be greater than 0".to_string());
        }
        if self.observability.log_level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }

        Ok(())
    }
}

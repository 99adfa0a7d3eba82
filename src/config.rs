use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub foodgraph: FoodgraphConfig,
}

/// Foodgraph-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FoodgraphConfig {
    /// Newline-delimited JSON export of product records.
    #[serde(default = "default_products_path")]
    pub products_path: PathBuf,
    /// Bulk-loader TSV output file.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for FoodgraphConfig {
    fn default() -> Self {
        Self {
            products_path: default_products_path(),
            output_path: default_output_path(),
        }
    }
}

fn default_products_path() -> PathBuf {
    PathBuf::from("products.jsonl")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("neo4j_bulk_data.tsv")
}

impl Config {
    /// Load configuration.
    ///
    /// Loads environment variables from .env file (if present) first.
    /// Looks for the config file in this order:
    /// 1. Path specified in FOODGRAPH_CONFIG environment variable
    /// 2. ./config.toml in current directory
    ///
    /// A missing ./config.toml is not an error — built-in defaults apply,
    /// and the CLI flags can override both paths. An explicitly configured
    /// path that does not exist is an error.
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let explicit = std::env::var("FOODGRAPH_CONFIG").ok();
        let config_path = explicit
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.toml"));

        if !config_path.exists() {
            if explicit.is_some() {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str).context("Failed to parse config.toml")?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.foodgraph.products_path.as_os_str().is_empty() {
            anyhow::bail!("foodgraph.products_path must not be empty");
        }
        if self.foodgraph.output_path.as_os_str().is_empty() {
            anyhow::bail!("foodgraph.output_path must not be empty");
        }
        Ok(())
    }

    /// Get the product records path
    pub fn products_path(&self) -> &Path {
        &self.foodgraph.products_path
    }

    /// Get the output TSV path
    pub fn output_path(&self) -> &Path {
        &self.foodgraph.output_path
    }
}

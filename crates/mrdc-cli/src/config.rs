//! Pipeline configuration (`mrdc.toml`).
//!
//! Paths in the file are relative to the file itself. Source and object
//! locations that are URLs (`s3://`, `http://`, `https://`) are kept as-is.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use mrdc_ingest::DEFAULT_TABULA_COMMAND;
use mrdc_model::{CleaningOptions, ErrorPolicy, TableKind};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "mrdc.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineSection,
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default)]
    pub warehouse: WarehouseSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSection {
    #[serde(default)]
    pub error_policy: ErrorPolicy,
    /// Subset of tables to process; all of them when empty.
    #[serde(default)]
    pub tables: Vec<TableKind>,
    pub currency_symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesSection {
    pub database_credentials: Option<PathBuf>,
    pub card_details_pdf: Option<String>,
    pub products: Option<String>,
    pub date_details: Option<String>,
    pub tabula_command: Option<String>,
    /// Region of the public bucket endpoint (`s3.<region>.amazonaws.com`).
    pub s3_region: Option<String>,
    pub store_api: Option<StoreApiSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreApiSection {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    pub requests_per_second: Option<u32>,
    #[serde(default)]
    pub first_store: usize,
    /// Defaults to the store count reported by the API minus one.
    pub last_store: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarehouseSection {
    pub credentials: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid pipeline configuration")
    }

    /// Reads a config file and resolves its relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_paths(base);
        Ok(config)
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        let sources = &mut self.sources;
        resolve_path(&mut sources.database_credentials, base);
        resolve_location(&mut sources.card_details_pdf, base);
        resolve_location(&mut sources.products, base);
        resolve_location(&mut sources.date_details, base);
        resolve_path(&mut self.warehouse.credentials, base);
    }

    pub fn cleaning_options(&self) -> CleaningOptions {
        let options = CleaningOptions::new().with_error_policy(self.pipeline.error_policy);
        match &self.pipeline.currency_symbol {
            Some(symbol) => options.with_currency_symbol(symbol.clone()),
            None => options,
        }
    }

    /// Tables to process: the explicit list if given, else the configured
    /// subset, else all of them. Duplicates are removed and load order kept.
    pub fn selected_tables(&self, requested: &[TableKind]) -> Vec<TableKind> {
        let chosen = if requested.is_empty() {
            &self.pipeline.tables
        } else {
            requested
        };
        if chosen.is_empty() {
            return TableKind::ALL.to_vec();
        }
        TableKind::ALL
            .into_iter()
            .filter(|kind| chosen.contains(kind))
            .collect()
    }

    pub fn tabula_command(&self) -> &str {
        self.sources
            .tabula_command
            .as_deref()
            .unwrap_or(DEFAULT_TABULA_COMMAND)
    }
}

impl StoreApiSection {
    /// Returns the API key, reading `api_key_env` when no literal key is set.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        match &self.api_key_env {
            Some(var) => std::env::var(var)
                .with_context(|| format!("environment variable {var} is not set")),
            None => bail!("store_api needs either api_key or api_key_env"),
        }
    }
}

fn resolve_path(path: &mut Option<PathBuf>, base: &Path) {
    if let Some(value) = path
        && value.is_relative()
    {
        *value = base.join(&*value);
    }
}

fn resolve_location(location: &mut Option<String>, base: &Path) {
    let Some(value) = location else {
        return;
    };
    if value.contains("://") || Path::new(value.as_str()).is_absolute() {
        return;
    }
    *value = base.join(value.as_str()).to_string_lossy().into_owned();
}

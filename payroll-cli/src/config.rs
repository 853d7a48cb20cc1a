//! `payroll.toml` configuration.
//!
//! ```toml
//! [employer]
//! risk_level = "high"        # low | medium | high
//! industry_type = "commerce" # services | commerce | industry
//!
//! [tables]
//! brackets = "tables/brackets_2026.csv"
//! simples = "tables/simples_2026.csv"
//! year = 2026
//!
//! [logging]
//! level = "debug"
//! file = "payroll.log"
//! ```
//!
//! Every section is optional. Relative paths are resolved against the
//! directory holding the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use payroll_core::{EmployerCostOptions, TaxTables};
use payroll_data::{TableLoader, TableLoaderError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "payroll.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Tables(#[from] TableLoaderError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablesConfig {
    pub brackets: Option<PathBuf>,
    pub simples: Option<PathBuf>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub employer: EmployerCostOptions,
    pub tables: TablesConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used when present, and built-in defaults
    /// otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    debug!("No {DEFAULT_CONFIG_FILE} found; using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn resolve_paths(
        &mut self,
        base: &Path,
    ) {
        for path in [
            &mut self.tables.brackets,
            &mut self.tables.simples,
            &mut self.logging.file,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Built-in 2025 tables with any configured CSV overrides applied.
    pub fn tax_tables(&self) -> Result<TaxTables, ConfigError> {
        let mut tables = match (&self.tables.brackets, &self.tables.simples) {
            (None, None) => TaxTables::y2025(),
            (brackets, simples) => TableLoader::load_files(
                TaxTables::y2025(),
                brackets.as_deref(),
                simples.as_deref(),
            )?,
        };
        if let Some(year) = self.tables.year {
            tables.year = year;
        }
        Ok(tables)
    }
}

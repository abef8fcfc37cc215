//! Runtime settings for the catalog tool, read from a TOML file.
//!
//! ```toml
//! catalog_path = "TrickCatalog.json"
//! natural_stance = "Regular"
//! strict_keys = true
//! enforce_conventions = false
//! ```
//!
//! Every field is optional. `TRICK_CATALOG` in the environment overrides
//! `catalog_path`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{CatalogError, Result};
use crate::core::store::CatalogStore;
use crate::core::types::NaturalStance;

pub const CATALOG_ENV: &str = "TRICK_CATALOG";
pub const DEFAULT_CATALOG_PATH: &str = "TrickCatalog.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrickConfig {
    /// Catalog document to load (`.json` or `.toon`).
    pub catalog_path: PathBuf,
    /// Used when a query does not name the rider's stance.
    pub natural_stance: NaturalStance,
    /// Refuse catalogs where two entries share a lookup key.
    pub strict_keys: bool,
    /// Reject queries whose rotations are not whole half/full turns.
    pub enforce_conventions: bool,
}

impl Default for TrickConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            natural_stance: NaturalStance::default(),
            strict_keys: false,
            enforce_conventions: false,
        }
    }
}

impl TrickConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| CatalogError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_toml_str(&raw)
    }

    /// Applies `TRICK_CATALOG` if it is set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_catalog_override(std::env::var(CATALOG_ENV).ok())
    }

    fn with_catalog_override(mut self, value: Option<String>) -> Self {
        if let Some(path) = value.filter(|v| !v.trim().is_empty()) {
            self.catalog_path = PathBuf::from(path);
        }
        self
    }

    pub fn open_store(&self) -> Result<CatalogStore> {
        if self.strict_keys {
            CatalogStore::open_strict(&self.catalog_path)
        } else {
            CatalogStore::open(&self.catalog_path)
        }
    }
}

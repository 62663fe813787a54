//! Store configuration
//!
//! Layered the same way everywhere:
//! 1. Default values in code
//! 2. An optional JSON document (passed in from the page on wasm)
//! 3. Environment variable overrides with the `INVENTORY__` prefix

use config::{Environment, File, FileFormat};
use serde::Deserialize;

pub use config::ConfigError;

use crate::models::DEFAULT_COIL_CATEGORY;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Session storage key per collection
    pub storage: StorageKeys,

    /// Category whose materials carry width and thickness
    pub coil_category: String,

    /// Fall back to the demo dataset when a collection is missing
    pub use_seed_data: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub raw_materials: String,
    pub suppliers: String,
    pub categories: String,
    pub inflows: String,
    pub outflows: String,
}

impl StoreConfig {
    /// Load configuration from defaults, optional JSON and environment variables
    pub fn load(overrides_json: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("storage.raw_materials", "rawMaterials")?
            .set_default("storage.suppliers", "suppliers")?
            .set_default("storage.categories", "categories")?
            .set_default("storage.inflows", "inflows")?
            .set_default("storage.outflows", "outflows")?
            .set_default("coil_category", DEFAULT_COIL_CATEGORY)?
            .set_default("use_seed_data", true)?;

        if let Some(json) = overrides_json.filter(|j| !j.trim().is_empty()) {
            builder = builder.add_source(File::from_str(json, FileFormat::Json));
        }

        builder
            .add_source(
                Environment::with_prefix("INVENTORY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage: StorageKeys::default(),
            coil_category: DEFAULT_COIL_CATEGORY.to_string(),
            use_seed_data: true,
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            raw_materials: "rawMaterials".to_string(),
            suppliers: "suppliers".to_string(),
            categories: "categories".to_string(),
            inflows: "inflows".to_string(),
            outflows: "outflows".to_string(),
        }
    }
}

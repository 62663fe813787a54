//! WebAssembly bindings for the raw materials inventory
//!
//! Exposes the session-backed store to the page as [`InventoryApp`], plus a
//! few stateless helpers for:
//! - Form validation before submit
//! - Coil display names
//! - Stock levels over an arbitrary snapshot

mod api;
mod logging;
mod storage;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use api::{ApiResult, Inventory};
pub use logging::{init_logging, set_filter};
pub use storage::BrowserSessionStorage;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

use serde::de::DeserializeOwned;
use shared::{compute_stock_levels, ErrorDetail, InventorySnapshot};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init_logging(logging::DEFAULT_FILTER, false);
}

/// Change the console log level, e.g. `setLogLevel("debug")`
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(filter: &str) -> Result<(), JsValue> {
    logging::set_filter(filter)
        .map_err(|message| to_js(ErrorDetail::new("LOGGING_ERROR", message)))
}

fn to_js(detail: ErrorDetail) -> JsValue {
    serde_json::to_string(&detail)
        .map(|json| JsValue::from_str(&json))
        .unwrap_or_else(|_| JsValue::from_str(&detail.message))
}

fn browser_confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn json_of<T: Serialize>(value: &T) -> Result<String, JsValue> {
    api::to_json(value).map_err(to_js)
}

/// The inventory held in `sessionStorage`
#[wasm_bindgen]
pub struct InventoryApp {
    inner: Inventory<BrowserSessionStorage>,
}

#[wasm_bindgen]
impl InventoryApp {
    /// Load from session storage. `config_json` overrides storage keys, the
    /// coil category and seeding.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<InventoryApp, JsValue> {
        let storage = BrowserSessionStorage::new()
            .map_err(|e| to_js(ErrorDetail::new("STORAGE_UNAVAILABLE", e.to_string())))?;
        let inner = Inventory::load(storage, config_json.as_deref()).map_err(to_js)?;
        Ok(InventoryApp { inner })
    }

    #[wasm_bindgen(js_name = rawMaterials)]
    pub fn raw_materials(&self) -> Result<String, JsValue> {
        self.inner.raw_materials().map_err(to_js)
    }

    pub fn suppliers(&self) -> Result<String, JsValue> {
        self.inner.suppliers().map_err(to_js)
    }

    pub fn categories(&self) -> Result<String, JsValue> {
        self.inner.categories().map_err(to_js)
    }

    pub fn inflows(&self) -> Result<String, JsValue> {
        self.inner.inflows().map_err(to_js)
    }

    pub fn outflows(&self) -> Result<String, JsValue> {
        self.inner.outflows().map_err(to_js)
    }

    #[wasm_bindgen(js_name = stockLevels)]
    pub fn stock_levels(&self) -> Result<String, JsValue> {
        self.inner.stock_levels().map_err(to_js)
    }

    #[wasm_bindgen(js_name = filterMaterials)]
    pub fn filter_materials(&self, filter_json: &str) -> Result<String, JsValue> {
        self.inner.filter_materials(filter_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = searchMaterials)]
    pub fn search_materials(&self, term: &str) -> Result<String, JsValue> {
        self.inner.search_materials(term).map_err(to_js)
    }

    #[wasm_bindgen(js_name = filterMovements)]
    pub fn filter_movements(&self, filter_json: &str) -> Result<String, JsValue> {
        self.inner.filter_movements(filter_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = materialHistory)]
    pub fn material_history(&self, material_id: &str) -> Result<String, JsValue> {
        self.inner.material_history(material_id).map_err(to_js)
    }

    pub fn dashboard(&self, filter_json: &str) -> Result<String, JsValue> {
        self.inner.dashboard(filter_json).map_err(to_js)
    }

    /// Display name under this inventory's coil category
    #[wasm_bindgen(js_name = displayName)]
    pub fn display_name(&self, material_id: &str) -> Result<String, JsValue> {
        self.inner.display_name(material_id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = createRawMaterial)]
    pub fn create_raw_material(&mut self, draft_json: &str) -> Result<String, JsValue> {
        self.inner.create_raw_material(draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateRawMaterial)]
    pub fn update_raw_material(&mut self, id: &str, draft_json: &str) -> Result<String, JsValue> {
        self.inner.update_raw_material(id, draft_json).map_err(to_js)
    }

    /// Asks through `window.confirm`; resolves to `false` when declined.
    #[wasm_bindgen(js_name = deleteRawMaterial)]
    pub fn delete_raw_material(&mut self, id: &str) -> Result<bool, JsValue> {
        self.inner.delete_raw_material(id, browser_confirm).map_err(to_js)
    }

    #[wasm_bindgen(js_name = createSupplier)]
    pub fn create_supplier(&mut self, draft_json: &str) -> Result<String, JsValue> {
        self.inner.create_supplier(draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateSupplier)]
    pub fn update_supplier(&mut self, id: &str, draft_json: &str) -> Result<String, JsValue> {
        self.inner.update_supplier(id, draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = deleteSupplier)]
    pub fn delete_supplier(&mut self, id: &str) -> Result<bool, JsValue> {
        self.inner.delete_supplier(id, browser_confirm).map_err(to_js)
    }

    #[wasm_bindgen(js_name = createCategory)]
    pub fn create_category(&mut self, draft_json: &str) -> Result<String, JsValue> {
        self.inner.create_category(draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateCategory)]
    pub fn update_category(&mut self, id: &str, draft_json: &str) -> Result<String, JsValue> {
        self.inner.update_category(id, draft_json).map_err(to_js)
    }

    /// Rejects with `CATEGORY_IN_USE` before asking if a material uses it.
    #[wasm_bindgen(js_name = deleteCategory)]
    pub fn delete_category(&mut self, id: &str) -> Result<bool, JsValue> {
        self.inner.delete_category(id, browser_confirm).map_err(to_js)
    }

    #[wasm_bindgen(js_name = createInflow)]
    pub fn create_inflow(&mut self, draft_json: &str) -> Result<String, JsValue> {
        self.inner.create_inflow(draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateInflow)]
    pub fn update_inflow(&mut self, id: &str, draft_json: &str) -> Result<String, JsValue> {
        self.inner.update_inflow(id, draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = deleteInflow)]
    pub fn delete_inflow(&mut self, id: &str) -> Result<bool, JsValue> {
        self.inner.delete_inflow(id, browser_confirm).map_err(to_js)
    }

    #[wasm_bindgen(js_name = createOutflow)]
    pub fn create_outflow(&mut self, draft_json: &str) -> Result<String, JsValue> {
        self.inner.create_outflow(draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateOutflow)]
    pub fn update_outflow(&mut self, id: &str, draft_json: &str) -> Result<String, JsValue> {
        self.inner.update_outflow(id, draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = deleteOutflow)]
    pub fn delete_outflow(&mut self, id: &str) -> Result<bool, JsValue> {
        self.inner.delete_outflow(id, browser_confirm).map_err(to_js)
    }
}

/// Units offered in the material form
#[wasm_bindgen(js_name = unitsOfMeasure)]
pub fn units_of_measure() -> Result<String, JsValue> {
    json_of(&UNITS_OF_MEASURE)
}

/// Display name of a material, with coil dimensions when present.
/// `coil_category` defaults to `"Bobinas"`; pass the configured one when it
/// differs.
#[wasm_bindgen(js_name = formatMaterialName)]
pub fn format_material_name(
    material_json: &str,
    coil_category: Option<String>,
) -> Result<String, JsValue> {
    let material: RawMaterial = api::parse(material_json, "material").map_err(to_js)?;
    let coil_category = coil_category.as_deref().unwrap_or(DEFAULT_COIL_CATEGORY);
    Ok(material.display_name(coil_category))
}

/// Stock levels for a snapshot held by the page
#[wasm_bindgen(js_name = computeStockLevels)]
pub fn compute_stock_levels_json(snapshot_json: &str) -> Result<String, JsValue> {
    let snapshot: InventorySnapshot = api::parse(snapshot_json, "snapshot").map_err(to_js)?;
    json_of(&compute_stock_levels(
        &snapshot.raw_materials,
        &snapshot.inflows,
        &snapshot.outflows,
    ))
}

fn field_errors_of<T: DeserializeOwned + Validate>(json: &str, what: &str) -> Result<String, JsValue> {
    let draft: T = api::parse(json, what).map_err(to_js)?;
    let errors = validate_draft(&draft).err().unwrap_or_default();
    json_of(&errors)
}

/// Field errors for a material form; `{}` when valid
#[wasm_bindgen(js_name = validateMaterial)]
pub fn validate_material(draft_json: &str) -> Result<String, JsValue> {
    field_errors_of::<RawMaterialDraft>(draft_json, "material")
}

#[wasm_bindgen(js_name = validateSupplier)]
pub fn validate_supplier(draft_json: &str) -> Result<String, JsValue> {
    field_errors_of::<SupplierDraft>(draft_json, "supplier")
}

#[wasm_bindgen(js_name = validateCategory)]
pub fn validate_category(draft_json: &str) -> Result<String, JsValue> {
    field_errors_of::<CategoryDraft>(draft_json, "category")
}

#[wasm_bindgen(js_name = validateInflow)]
pub fn validate_inflow(draft_json: &str) -> Result<String, JsValue> {
    field_errors_of::<StockInflowDraft>(draft_json, "inflow")
}

#[wasm_bindgen(js_name = validateOutflow)]
pub fn validate_outflow(draft_json: &str) -> Result<String, JsValue> {
    field_errors_of::<StockOutflowDraft>(draft_json, "outflow")
}

//! JSON-in / JSON-out facade over the inventory store
//!
//! Generic over the storage backend so it runs natively in tests with
//! [`shared::MemoryStorage`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    CategoryDraft, DeleteOutcome, ErrorDetail, InventoryStore, MaterialFilter, MovementEntry,
    MovementFilter, RawMaterialDraft, SessionStorage, StockInflowDraft, StockOutflowDraft,
    StoreConfig, StoreError, SupplierDraft,
};

pub type ApiResult = Result<String, ErrorDetail>;

pub(crate) fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, ErrorDetail> {
    serde_json::from_str(json)
        .map_err(|e| ErrorDetail::new("INVALID_JSON", format!("Invalid {} JSON: {}", what, e)))
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> ApiResult {
    serde_json::to_string(value)
        .map_err(|e| ErrorDetail::new("SERIALIZATION_ERROR", e.to_string()))
}

fn store_err(err: StoreError) -> ErrorDetail {
    ErrorDetail::from(&err)
}

fn deleted(outcome: DeleteOutcome) -> bool {
    outcome == DeleteOutcome::Deleted
}

pub struct Inventory<S: SessionStorage> {
    store: InventoryStore<S>,
}

impl<S: SessionStorage> Inventory<S> {
    pub fn load(storage: S, config_json: Option<&str>) -> Result<Self, ErrorDetail> {
        let config = StoreConfig::load(config_json)
            .map_err(|e| ErrorDetail::new("CONFIG_ERROR", e.to_string()))?;
        Ok(Self {
            store: InventoryStore::load(storage, config),
        })
    }

    pub fn store(&self) -> &InventoryStore<S> {
        &self.store
    }

    // Collections

    pub fn raw_materials(&self) -> ApiResult {
        to_json(self.store.raw_materials())
    }

    pub fn suppliers(&self) -> ApiResult {
        to_json(self.store.suppliers())
    }

    pub fn categories(&self) -> ApiResult {
        to_json(self.store.categories())
    }

    pub fn inflows(&self) -> ApiResult {
        to_json(self.store.inflows())
    }

    pub fn outflows(&self) -> ApiResult {
        to_json(self.store.outflows())
    }

    // Views

    pub fn stock_levels(&self) -> ApiResult {
        to_json(&self.store.stock_levels())
    }

    pub fn filter_materials(&self, filter_json: &str) -> ApiResult {
        let filter: MaterialFilter = parse(filter_json, "filter")?;
        to_json(&self.store.filter_materials(&filter))
    }

    pub fn search_materials(&self, term: &str) -> ApiResult {
        to_json(&self.store.search_materials(term))
    }

    pub fn filter_movements(&self, filter_json: &str) -> ApiResult {
        let filter: MovementFilter = parse(filter_json, "filter")?;
        let suppliers = self.store.suppliers();
        let entries: Vec<MovementEntry> = self
            .store
            .filter_movements(&filter)
            .iter()
            .map(|m| m.to_entry(suppliers))
            .collect();
        to_json(&entries)
    }

    pub fn material_history(&self, material_id: &str) -> ApiResult {
        let suppliers = self.store.suppliers();
        let entries: Vec<MovementEntry> = self
            .store
            .material_history(material_id)
            .iter()
            .map(|m| m.to_entry(suppliers))
            .collect();
        to_json(&entries)
    }

    pub fn dashboard(&self, filter_json: &str) -> ApiResult {
        let filter: MaterialFilter = parse(filter_json, "filter")?;
        to_json(&self.store.dashboard(&filter))
    }

    /// Plain text, not JSON
    pub fn display_name(&self, material_id: &str) -> Result<String, ErrorDetail> {
        self.store
            .raw_material(material_id)
            .map(|m| m.display_name(&self.store.config().coil_category))
            .ok_or_else(|| {
                store_err(StoreError::NotFound {
                    entity: "Raw material",
                    id: material_id.to_string(),
                })
            })
    }

    // Mutations

    pub fn create_raw_material(&mut self, draft_json: &str) -> ApiResult {
        let draft: RawMaterialDraft = parse(draft_json, "material")?;
        to_json(&self.store.create_raw_material(draft).map_err(store_err)?)
    }

    pub fn update_raw_material(&mut self, id: &str, draft_json: &str) -> ApiResult {
        let draft: RawMaterialDraft = parse(draft_json, "material")?;
        to_json(&self.store.update_raw_material(id, draft).map_err(store_err)?)
    }

    pub fn delete_raw_material(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, ErrorDetail> {
        self.store
            .delete_raw_material(id, confirm)
            .map(deleted)
            .map_err(store_err)
    }

    pub fn create_supplier(&mut self, draft_json: &str) -> ApiResult {
        let draft: SupplierDraft = parse(draft_json, "supplier")?;
        to_json(&self.store.create_supplier(draft).map_err(store_err)?)
    }

    pub fn update_supplier(&mut self, id: &str, draft_json: &str) -> ApiResult {
        let draft: SupplierDraft = parse(draft_json, "supplier")?;
        to_json(&self.store.update_supplier(id, draft).map_err(store_err)?)
    }

    pub fn delete_supplier(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, ErrorDetail> {
        self.store
            .delete_supplier(id, confirm)
            .map(deleted)
            .map_err(store_err)
    }

    pub fn create_category(&mut self, draft_json: &str) -> ApiResult {
        let draft: CategoryDraft = parse(draft_json, "category")?;
        to_json(&self.store.create_category(draft).map_err(store_err)?)
    }

    pub fn update_category(&mut self, id: &str, draft_json: &str) -> ApiResult {
        let draft: CategoryDraft = parse(draft_json, "category")?;
        to_json(&self.store.update_category(id, draft).map_err(store_err)?)
    }

    pub fn delete_category(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, ErrorDetail> {
        self.store
            .delete_category(id, confirm)
            .map(deleted)
            .map_err(store_err)
    }

    pub fn create_inflow(&mut self, draft_json: &str) -> ApiResult {
        let draft: StockInflowDraft = parse(draft_json, "inflow")?;
        to_json(&self.store.create_inflow(draft).map_err(store_err)?)
    }

    pub fn update_inflow(&mut self, id: &str, draft_json: &str) -> ApiResult {
        let draft: StockInflowDraft = parse(draft_json, "inflow")?;
        to_json(&self.store.update_inflow(id, draft).map_err(store_err)?)
    }

    pub fn delete_inflow(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, ErrorDetail> {
        self.store
            .delete_inflow(id, confirm)
            .map(deleted)
            .map_err(store_err)
    }

    pub fn create_outflow(&mut self, draft_json: &str) -> ApiResult {
        let draft: StockOutflowDraft = parse(draft_json, "outflow")?;
        to_json(&self.store.create_outflow(draft).map_err(store_err)?)
    }

    pub fn update_outflow(&mut self, id: &str, draft_json: &str) -> ApiResult {
        let draft: StockOutflowDraft = parse(draft_json, "outflow")?;
        to_json(&self.store.update_outflow(id, draft).map_err(store_err)?)
    }

    pub fn delete_outflow(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, ErrorDetail> {
        self.store
            .delete_outflow(id, confirm)
            .map(deleted)
            .map_err(store_err)
    }
}

//! Entity store with session persistence
//!
//! Holds every collection in memory. Each mutation validates its input,
//! replaces or removes whole records, and writes the touched collection back
//! to session storage. Storage failures are logged; the in-memory state stays
//! authoritative. On load, a stored record that no longer parses is skipped
//! without dropping the rest of its collection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::dashboard::DashboardSummary;
use crate::error::StoreError;
use crate::filter::{self, MaterialFilter, MovementFilter};
use crate::ledger::{compute_stock_levels, StockLevels};
use crate::models::{
    material_history, Category, CategoryDraft, Movement, RawMaterial, RawMaterialDraft,
    StockInflow, StockInflowDraft, StockOutflow, StockOutflowDraft, Supplier, SupplierDraft,
};
use crate::seed;
use crate::storage::SessionStorage;
use crate::validation::validate_draft;

/// Every collection the store owns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    pub raw_materials: Vec<RawMaterial>,
    pub suppliers: Vec<Supplier>,
    pub categories: Vec<Category>,
    pub inflows: Vec<StockInflow>,
    pub outflows: Vec<StockOutflow>,
}

impl InventorySnapshot {
    /// The demo dataset
    pub fn seeded() -> Self {
        Self {
            raw_materials: seed::raw_materials(),
            suppliers: seed::suppliers(),
            categories: seed::categories(),
            inflows: seed::inflows(),
            outflows: seed::outflows(),
        }
    }
}

/// Result of a confirmed delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    /// The user did not confirm; nothing changed
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    RawMaterials,
    Suppliers,
    Categories,
    Inflows,
    Outflows,
}

/// A stored record addressed by its id
trait Record {
    const ENTITY: &'static str;
    fn id(&self) -> &str;
}

impl Record for RawMaterial {
    const ENTITY: &'static str = "Raw material";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Supplier {
    const ENTITY: &'static str = "Supplier";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Category {
    const ENTITY: &'static str = "Category";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for StockInflow {
    const ENTITY: &'static str = "Inflow";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for StockOutflow {
    const ENTITY: &'static str = "Outflow";
    fn id(&self) -> &str {
        &self.id
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

fn position_of<T: Record>(items: &[T], id: &str) -> Result<usize, StoreError> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| StoreError::NotFound {
            entity: T::ENTITY,
            id: id.to_string(),
        })
}

fn replace_by_id<T: Record + Clone>(items: &mut [T], record: T) -> Result<T, StoreError> {
    let index = position_of(items, record.id())?;
    items[index] = record.clone();
    Ok(record)
}

fn load_collection<S, T>(
    storage: &mut S,
    key: &str,
    use_seed_data: bool,
    seed: fn() -> Vec<T>,
) -> Vec<T>
where
    S: SessionStorage,
    T: DeserializeOwned,
{
    let fallback = || if use_seed_data { seed() } else { Vec::new() };

    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored data, using fallback");
            return fallback();
        }
        Err(e) => {
            error!(key, error = %e, "Failed to read session storage");
            return fallback();
        }
    };

    let records: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable session data");
            if let Err(e) = storage.remove_item(key) {
                error!(key, error = %e, "Failed to remove session data");
            }
            return fallback();
        }
    };

    // Skip bad records, keep the rest
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key, index, error = %e, "Skipping unreadable stored record");
                None
            }
        })
        .collect()
}

/// In-memory inventory persisted to a [`SessionStorage`]
#[derive(Debug)]
pub struct InventoryStore<S: SessionStorage> {
    data: InventorySnapshot,
    config: StoreConfig,
    storage: S,
}

impl<S: SessionStorage> InventoryStore<S> {
    /// Restore every collection from storage, falling back per collection.
    pub fn load(mut storage: S, config: StoreConfig) -> Self {
        let keys = &config.storage;
        let seeded = config.use_seed_data;
        let data = InventorySnapshot {
            raw_materials: load_collection(&mut storage, &keys.raw_materials, seeded, seed::raw_materials),
            suppliers: load_collection(&mut storage, &keys.suppliers, seeded, seed::suppliers),
            categories: load_collection(&mut storage, &keys.categories, seeded, seed::categories),
            inflows: load_collection(&mut storage, &keys.inflows, seeded, seed::inflows),
            outflows: load_collection(&mut storage, &keys.outflows, seeded, seed::outflows),
        };

        info!(
            materials = data.raw_materials.len(),
            suppliers = data.suppliers.len(),
            categories = data.categories.len(),
            inflows = data.inflows.len(),
            outflows = data.outflows.len(),
            "Inventory loaded"
        );

        Self {
            data,
            config,
            storage,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn snapshot(&self) -> &InventorySnapshot {
        &self.data
    }

    pub fn raw_materials(&self) -> &[RawMaterial] {
        &self.data.raw_materials
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.data.suppliers
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn inflows(&self) -> &[StockInflow] {
        &self.data.inflows
    }

    pub fn outflows(&self) -> &[StockOutflow] {
        &self.data.outflows
    }

    pub fn raw_material(&self, id: &str) -> Option<&RawMaterial> {
        self.data.raw_materials.iter().find(|m| m.id == id)
    }

    // ========================================================================
    // Derived Views
    // ========================================================================

    pub fn stock_levels(&self) -> StockLevels {
        compute_stock_levels(&self.data.raw_materials, &self.data.inflows, &self.data.outflows)
    }

    pub fn filter_materials(&self, filter: &MaterialFilter) -> Vec<&RawMaterial> {
        filter::filter_materials(&self.data.raw_materials, filter, &self.config.coil_category)
    }

    pub fn search_materials(&self, term: &str) -> Vec<&RawMaterial> {
        filter::search_materials(&self.data.raw_materials, term)
    }

    pub fn filter_movements(&self, filter: &MovementFilter) -> Vec<Movement<'_>> {
        filter::filter_movements(&self.data.inflows, &self.data.outflows, filter)
    }

    pub fn material_history(&self, material_id: &str) -> Vec<Movement<'_>> {
        material_history(material_id, &self.data.inflows, &self.data.outflows)
    }

    pub fn dashboard(&self, filter: &MaterialFilter) -> DashboardSummary {
        DashboardSummary::build(
            &self.data.raw_materials,
            &self.stock_levels(),
            filter,
            &self.config.coil_category,
        )
    }

    /// Categories that at least one material references
    pub fn is_category_in_use(&self, name: &str) -> bool {
        self.data.raw_materials.iter().any(|m| m.category == name)
    }

    // ========================================================================
    // Raw Materials
    // ========================================================================

    pub fn create_raw_material(&mut self, draft: RawMaterialDraft) -> Result<RawMaterial, StoreError> {
        validate_draft(&draft)?;
        let mut material = draft.into_material(new_id("rm"));
        material.strip_dimensions_unless_coil(&self.config.coil_category);
        self.data.raw_materials.push(material.clone());
        info!(id = %material.id, sku = %material.sku, "Raw material created");
        self.persist(Collection::RawMaterials);
        Ok(material)
    }

    pub fn update_raw_material(
        &mut self,
        id: &str,
        draft: RawMaterialDraft,
    ) -> Result<RawMaterial, StoreError> {
        validate_draft(&draft)?;
        let mut material = draft.into_material(id.to_string());
        material.strip_dimensions_unless_coil(&self.config.coil_category);
        let material = replace_by_id(&mut self.data.raw_materials, material)?;
        info!(id, "Raw material updated");
        self.persist(Collection::RawMaterials);
        Ok(material)
    }

    /// Movements of the material are left in place.
    pub fn delete_raw_material<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome, StoreError>
    where
        F: FnOnce(&str) -> bool,
    {
        let index = position_of(&self.data.raw_materials, id)?;
        let prompt = format!(
            "¿Está seguro de que desea eliminar la materia prima \"{}\"?",
            self.data.raw_materials[index].name
        );
        if !confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }
        self.data.raw_materials.remove(index);
        info!(id, "Raw material deleted");
        self.persist(Collection::RawMaterials);
        Ok(DeleteOutcome::Deleted)
    }

    // ========================================================================
    // Suppliers
    // ========================================================================

    pub fn create_supplier(&mut self, draft: SupplierDraft) -> Result<Supplier, StoreError> {
        validate_draft(&draft)?;
        let supplier = draft.into_supplier(new_id("supp"));
        self.data.suppliers.push(supplier.clone());
        info!(id = %supplier.id, "Supplier created");
        self.persist(Collection::Suppliers);
        Ok(supplier)
    }

    pub fn update_supplier(&mut self, id: &str, draft: SupplierDraft) -> Result<Supplier, StoreError> {
        validate_draft(&draft)?;
        let supplier = replace_by_id(&mut self.data.suppliers, draft.into_supplier(id.to_string()))?;
        info!(id, "Supplier updated");
        self.persist(Collection::Suppliers);
        Ok(supplier)
    }

    pub fn delete_supplier<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome, StoreError>
    where
        F: FnOnce(&str) -> bool,
    {
        let index = position_of(&self.data.suppliers, id)?;
        let prompt = format!(
            "¿Está seguro de que desea eliminar el proveedor \"{}\"?",
            self.data.suppliers[index].name
        );
        if !confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }
        self.data.suppliers.remove(index);
        info!(id, "Supplier deleted");
        self.persist(Collection::Suppliers);
        Ok(DeleteOutcome::Deleted)
    }

    // ========================================================================
    // Categories
    // ========================================================================

    pub fn create_category(&mut self, draft: CategoryDraft) -> Result<Category, StoreError> {
        validate_draft(&draft)?;
        let category = draft.into_category(new_id("cat"));
        self.data.categories.push(category.clone());
        info!(id = %category.id, name = %category.name, "Category created");
        self.persist(Collection::Categories);
        Ok(category)
    }

    /// Materials keep the old name; references are by string.
    pub fn update_category(&mut self, id: &str, draft: CategoryDraft) -> Result<Category, StoreError> {
        validate_draft(&draft)?;
        let category = replace_by_id(&mut self.data.categories, draft.into_category(id.to_string()))?;
        info!(id, name = %category.name, "Category updated");
        self.persist(Collection::Categories);
        Ok(category)
    }

    /// Refused without prompting while any material uses the category.
    pub fn delete_category<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome, StoreError>
    where
        F: FnOnce(&str) -> bool,
    {
        let index = position_of(&self.data.categories, id)?;
        let name = self.data.categories[index].name.clone();
        if self.is_category_in_use(&name) {
            warn!(id, name = %name, "Category in use, delete refused");
            return Err(StoreError::CategoryInUse { name });
        }
        let prompt = format!("¿Está seguro de que desea eliminar la categoría \"{}\"?", name);
        if !confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }
        self.data.categories.remove(index);
        info!(id, "Category deleted");
        self.persist(Collection::Categories);
        Ok(DeleteOutcome::Deleted)
    }

    // ========================================================================
    // Movements
    // ========================================================================

    pub fn create_inflow(&mut self, draft: StockInflowDraft) -> Result<StockInflow, StoreError> {
        validate_draft(&draft)?;
        let inflow = draft.into_inflow(new_id("in"));
        self.data.inflows.push(inflow.clone());
        info!(id = %inflow.id, material = %inflow.raw_material_id, quantity = %inflow.quantity, "Inflow recorded");
        self.persist(Collection::Inflows);
        Ok(inflow)
    }

    pub fn update_inflow(&mut self, id: &str, draft: StockInflowDraft) -> Result<StockInflow, StoreError> {
        validate_draft(&draft)?;
        let inflow = replace_by_id(&mut self.data.inflows, draft.into_inflow(id.to_string()))?;
        info!(id, "Inflow updated");
        self.persist(Collection::Inflows);
        Ok(inflow)
    }

    pub fn delete_inflow<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome, StoreError>
    where
        F: FnOnce(&str) -> bool,
    {
        let index = position_of(&self.data.inflows, id)?;
        if !confirm("¿Está seguro de que desea eliminar este ingreso?") {
            return Ok(DeleteOutcome::Declined);
        }
        self.data.inflows.remove(index);
        info!(id, "Inflow deleted");
        self.persist(Collection::Inflows);
        Ok(DeleteOutcome::Deleted)
    }

    pub fn create_outflow(&mut self, draft: StockOutflowDraft) -> Result<StockOutflow, StoreError> {
        validate_draft(&draft)?;
        let outflow = draft.into_outflow(new_id("out"));
        self.data.outflows.push(outflow.clone());
        info!(id = %outflow.id, material = %outflow.raw_material_id, quantity = %outflow.quantity, "Outflow recorded");
        self.persist(Collection::Outflows);
        Ok(outflow)
    }

    pub fn update_outflow(
        &mut self,
        id: &str,
        draft: StockOutflowDraft,
    ) -> Result<StockOutflow, StoreError> {
        validate_draft(&draft)?;
        let outflow = replace_by_id(&mut self.data.outflows, draft.into_outflow(id.to_string()))?;
        info!(id, "Outflow updated");
        self.persist(Collection::Outflows);
        Ok(outflow)
    }

    pub fn delete_outflow<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome, StoreError>
    where
        F: FnOnce(&str) -> bool,
    {
        let index = position_of(&self.data.outflows, id)?;
        if !confirm("¿Está seguro de que desea eliminar este egreso?") {
            return Ok(DeleteOutcome::Declined);
        }
        self.data.outflows.remove(index);
        info!(id, "Outflow deleted");
        self.persist(Collection::Outflows);
        Ok(DeleteOutcome::Deleted)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    fn persist(&mut self, collection: Collection) {
        let keys = &self.config.storage;
        let (key, json) = match collection {
            Collection::RawMaterials => (&keys.raw_materials, serde_json::to_string(&self.data.raw_materials)),
            Collection::Suppliers => (&keys.suppliers, serde_json::to_string(&self.data.suppliers)),
            Collection::Categories => (&keys.categories, serde_json::to_string(&self.data.categories)),
            Collection::Inflows => (&keys.inflows, serde_json::to_string(&self.data.inflows)),
            Collection::Outflows => (&keys.outflows, serde_json::to_string(&self.data.outflows)),
        };

        let json = match json {
            Ok(json) => json,
            Err(e) => {
                error!(key = %key, error = %e, "Failed to serialize collection");
                return;
            }
        };

        match self.storage.set_item(key, &json) {
            Ok(()) => debug!(key = %key, bytes = json.len(), "Collection saved"),
            Err(e) => error!(key = %key, error = %e, "Failed to save to session storage"),
        }
    }
}

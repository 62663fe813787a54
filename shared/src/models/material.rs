//! Raw material catalogue models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Units a material can be measured in, in display order.
pub const UNITS_OF_MEASURE: [&str; 7] = ["kg", "unidades", "metros", "litros", "cajas", "mm", "micrones"];

/// Category name that marks a material as a coil with width and thickness.
pub const DEFAULT_COIL_CATEGORY: &str = "Bobinas";

/// A raw material tracked in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    pub id: String,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category name, matched by exact string equality
    pub category: String,
    pub unit: String,
    /// Unit cost
    pub cost: Decimal,
    /// Reorder threshold in `unit`
    pub min_stock: Decimal,
    pub supplier_id: String,
    /// Coil width in millimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Decimal>,
    /// Coil thickness in millimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<Decimal>,
}

impl RawMaterial {
    pub fn is_coil(&self, coil_category: &str) -> bool {
        self.category == coil_category
    }

    /// Name with coil dimensions appended, e.g. `Bobina (1500mm x 0.5mm)`.
    pub fn display_name(&self, coil_category: &str) -> String {
        match (self.is_coil(coil_category), self.width, self.thickness) {
            (true, Some(width), Some(thickness)) => format!(
                "{} ({}mm x {}mm)",
                self.name,
                width.normalize(),
                thickness.normalize()
            ),
            _ => self.name.clone(),
        }
    }

    /// Drop coil dimensions from anything that is not a coil.
    pub fn strip_dimensions_unless_coil(&mut self, coil_category: &str) {
        if !self.is_coil(coil_category) {
            self.width = None;
            self.thickness = None;
        }
    }
}

/// Material fields as entered in the form, before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialDraft {
    #[serde(default)]
    #[validate(length(min = 1, message = "El SKU es requerido."))]
    pub sku: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "El nombre es requerido."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    #[validate(custom = "crate::validation::validate_material_cost")]
    pub cost: Decimal,
    #[serde(default)]
    pub min_stock: Decimal,
    #[serde(default)]
    #[validate(length(min = 1, message = "Debe seleccionar un proveedor."))]
    pub supplier_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<Decimal>,
}

fn default_unit() -> String {
    UNITS_OF_MEASURE[0].to_string()
}

impl Default for RawMaterialDraft {
    fn default() -> Self {
        Self {
            sku: String::new(),
            name: String::new(),
            description: String::new(),
            category: String::new(),
            unit: default_unit(),
            cost: Decimal::ZERO,
            min_stock: Decimal::ZERO,
            supplier_id: String::new(),
            width: None,
            thickness: None,
        }
    }
}

impl RawMaterialDraft {
    pub fn into_material(self, id: String) -> RawMaterial {
        RawMaterial {
            id,
            sku: self.sku,
            name: self.name,
            description: self.description,
            category: self.category,
            unit: self.unit,
            cost: self.cost,
            min_stock: self.min_stock,
            supplier_id: self.supplier_id,
            width: self.width,
            thickness: self.thickness,
        }
    }
}

impl From<&RawMaterial> for RawMaterialDraft {
    fn from(material: &RawMaterial) -> Self {
        Self {
            sku: material.sku.clone(),
            name: material.name.clone(),
            description: material.description.clone(),
            category: material.category.clone(),
            unit: material.unit.clone(),
            cost: material.cost,
            min_stock: material.min_stock,
            supplier_id: material.supplier_id.clone(),
            width: material.width,
            thickness: material.thickness,
        }
    }
}

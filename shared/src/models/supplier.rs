//! Supplier models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A supplier of raw materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// CUIT or DNI
    #[serde(alias = "cuit")]
    pub tax_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    /// Contact person
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    #[serde(default)]
    #[validate(length(min = 1, message = "El nombre es requerido."))]
    pub name: String,
    #[serde(default, alias = "cuit")]
    #[validate(length(min = 1, message = "El CUIT/DNI es requerido."))]
    pub tax_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    #[validate(custom = "crate::validation::validate_supplier_email")]
    pub email: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub notes: String,
}

impl SupplierDraft {
    pub fn into_supplier(self, id: String) -> Supplier {
        Supplier {
            id,
            name: self.name,
            tax_id: self.tax_id,
            address: self.address,
            phone: self.phone,
            email: self.email,
            contact: self.contact,
            notes: self.notes,
        }
    }
}

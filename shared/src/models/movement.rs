//! Stock movement models: inflows (receipts) and outflows (consumption)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Supplier;

/// Stock received from a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInflow {
    pub id: String,
    pub date: NaiveDate,
    pub raw_material_id: String,
    pub quantity: Decimal,
    pub supplier_id: String,
    /// May be empty
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub notes: String,
}

/// Stock consumed against a work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOutflow {
    pub id: String,
    pub date: NaiveDate,
    pub raw_material_id: String,
    pub quantity: Decimal,
    pub work_order: String,
    pub responsible: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockInflowDraft {
    pub date: NaiveDate,
    #[serde(default)]
    #[validate(length(min = 1, message = "Seleccione una materia prima."))]
    pub raw_material_id: String,
    #[serde(default)]
    #[validate(custom = "crate::validation::validate_movement_quantity")]
    pub quantity: Decimal,
    #[serde(default)]
    #[validate(length(min = 1, message = "Seleccione un proveedor."))]
    pub supplier_id: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub notes: String,
}

impl StockInflowDraft {
    pub fn into_inflow(self, id: String) -> StockInflow {
        StockInflow {
            id,
            date: self.date,
            raw_material_id: self.raw_material_id,
            quantity: self.quantity,
            supplier_id: self.supplier_id,
            invoice_number: self.invoice_number,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockOutflowDraft {
    pub date: NaiveDate,
    #[serde(default)]
    #[validate(length(min = 1, message = "Seleccione una materia prima."))]
    pub raw_material_id: String,
    #[serde(default)]
    #[validate(custom = "crate::validation::validate_movement_quantity")]
    pub quantity: Decimal,
    #[serde(default)]
    #[validate(length(min = 1, message = "El N° de OT es obligatorio."))]
    pub work_order: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "El responsable es requerido."))]
    pub responsible: String,
    #[serde(default)]
    pub notes: String,
}

impl StockOutflowDraft {
    pub fn into_outflow(self, id: String) -> StockOutflow {
        StockOutflow {
            id,
            date: self.date,
            raw_material_id: self.raw_material_id,
            quantity: self.quantity,
            work_order: self.work_order,
            responsible: self.responsible,
            notes: self.notes,
        }
    }
}

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Inflow,
    Outflow,
}

impl MovementKind {
    /// Label shown in merged movement lists
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::Inflow => "Ingreso",
            MovementKind::Outflow => "Egreso",
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Either kind of movement, borrowed from the store
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement<'a> {
    Inflow(&'a StockInflow),
    Outflow(&'a StockOutflow),
}

impl<'a> Movement<'a> {
    pub fn kind(&self) -> MovementKind {
        match self {
            Movement::Inflow(_) => MovementKind::Inflow,
            Movement::Outflow(_) => MovementKind::Outflow,
        }
    }

    pub fn id(&self) -> &'a str {
        match *self {
            Movement::Inflow(m) => &m.id,
            Movement::Outflow(m) => &m.id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Movement::Inflow(m) => m.date,
            Movement::Outflow(m) => m.date,
        }
    }

    pub fn raw_material_id(&self) -> &'a str {
        match *self {
            Movement::Inflow(m) => &m.raw_material_id,
            Movement::Outflow(m) => &m.raw_material_id,
        }
    }

    pub fn quantity(&self) -> Decimal {
        match self {
            Movement::Inflow(m) => m.quantity,
            Movement::Outflow(m) => m.quantity,
        }
    }

    /// Invoice number for inflows, work order for outflows
    pub fn reference(&self) -> &'a str {
        match *self {
            Movement::Inflow(m) => &m.invoice_number,
            Movement::Outflow(m) => &m.work_order,
        }
    }

    pub fn notes(&self) -> &'a str {
        match *self {
            Movement::Inflow(m) => &m.notes,
            Movement::Outflow(m) => &m.notes,
        }
    }

    /// Supplier name for inflows (empty when the supplier is gone),
    /// responsible person for outflows
    pub fn detail<'s>(&self, suppliers: &'s [Supplier]) -> &'s str
    where
        'a: 's,
    {
        match *self {
            Movement::Inflow(m) => suppliers
                .iter()
                .find(|s| s.id == m.supplier_id)
                .map(|s| s.name.as_str())
                .unwrap_or(""),
            Movement::Outflow(m) => &m.responsible,
        }
    }

    /// Owned list row, with the supplier resolved against `suppliers`
    pub fn to_entry(&self, suppliers: &[Supplier]) -> MovementEntry {
        let (supplier_id, responsible) = match *self {
            Movement::Inflow(m) => (Some(m.supplier_id.clone()), None),
            Movement::Outflow(m) => (None, Some(m.responsible.clone())),
        };
        MovementEntry {
            id: self.id().to_string(),
            kind: self.kind(),
            label: self.kind().label().to_string(),
            date: self.date(),
            raw_material_id: self.raw_material_id().to_string(),
            quantity: self.quantity(),
            reference: self.reference().to_string(),
            detail: self.detail(suppliers).to_string(),
            supplier_id,
            responsible,
            notes: self.notes().to_string(),
        }
    }
}

/// Owned, serializable row of a merged movement list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementEntry {
    pub id: String,
    pub kind: MovementKind,
    /// "Ingreso" or "Egreso"
    pub label: String,
    pub date: NaiveDate,
    pub raw_material_id: String,
    pub quantity: Decimal,
    /// Invoice number or work order
    pub reference: String,
    /// Supplier name or responsible person
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Merge inflows and outflows, newest first.
///
/// The sort is stable: on equal dates inflows precede outflows and each keeps
/// its stored order.
pub fn merge_movements<'a>(
    inflows: &'a [StockInflow],
    outflows: &'a [StockOutflow],
) -> Vec<Movement<'a>> {
    let mut merged: Vec<Movement<'a>> = inflows
        .iter()
        .map(Movement::Inflow)
        .chain(outflows.iter().map(Movement::Outflow))
        .collect();
    merged.sort_by(|a, b| b.date().cmp(&a.date()));
    merged
}

/// All movements of one material, newest first
pub fn material_history<'a>(
    material_id: &str,
    inflows: &'a [StockInflow],
    outflows: &'a [StockOutflow],
) -> Vec<Movement<'a>> {
    merge_movements(inflows, outflows)
        .into_iter()
        .filter(|m| m.raw_material_id() == material_id)
        .collect()
}

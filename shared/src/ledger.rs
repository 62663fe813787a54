//! Stock ledger: on-hand quantities derived from movement history

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::{RawMaterial, StockInflow, StockOutflow};

/// On-hand quantity per material id
///
/// Also holds balances for ids that appear only in movements (orphans left
/// behind when a material is deleted).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StockLevels(HashMap<String, Decimal>);

impl StockLevels {
    pub fn get(&self, material_id: &str) -> Option<Decimal> {
        self.0.get(material_id).copied()
    }

    /// Balance for a material, zero when it has never been seen
    pub fn on_hand(&self, material_id: &str) -> Decimal {
        self.get(material_id).unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    fn apply(&mut self, material_id: &str, delta: Decimal) {
        let balance = self.0.entry(material_id.to_string()).or_insert(Decimal::ZERO);
        *balance = clamped_add(*balance, delta);
    }
}

// ============================================================================
// Clamped Arithmetic
// ============================================================================

fn bound(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// `a + b`, pinned to `Decimal::MIN`/`Decimal::MAX` on overflow
pub fn clamped_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        warn!(%a, %b, "Decimal overflow in sum, value clamped");
        bound(b.is_sign_negative())
    })
}

/// `a - b`, pinned to `Decimal::MIN`/`Decimal::MAX` on overflow
pub fn clamped_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| {
        warn!(%a, %b, "Decimal overflow in difference, value clamped");
        bound(b.is_sign_positive())
    })
}

/// `a * b`, pinned to `Decimal::MIN`/`Decimal::MAX` on overflow
pub fn clamped_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        warn!(%a, %b, "Decimal overflow in product, value clamped");
        bound(a.is_sign_negative() != b.is_sign_negative())
    })
}

/// Sum inflows minus outflows per material.
///
/// Every known material starts at zero. Order of movements is irrelevant and
/// negative balances are kept as-is.
pub fn compute_stock_levels(
    materials: &[RawMaterial],
    inflows: &[StockInflow],
    outflows: &[StockOutflow],
) -> StockLevels {
    let mut levels = StockLevels(
        materials
            .iter()
            .map(|m| (m.id.clone(), Decimal::ZERO))
            .collect(),
    );

    for inflow in inflows {
        levels.apply(&inflow.raw_material_id, inflow.quantity);
    }
    for outflow in outflows {
        levels.apply(&outflow.raw_material_id, -outflow.quantity);
    }

    levels
}

/// At or below the reorder threshold
pub fn is_low_stock(material: &RawMaterial, levels: &StockLevels) -> bool {
    levels.on_hand(&material.id) <= material.min_stock
}

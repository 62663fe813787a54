//! Dashboard aggregates

use rust_decimal::Decimal;
use serde::Serialize;

use crate::filter::{filter_materials, MaterialFilter};
use crate::ledger::{clamped_add, clamped_mul, clamped_sub, is_low_stock, StockLevels};
use crate::models::RawMaterial;

/// A material at or under its reorder threshold, listed by plain name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockRow {
    pub material_id: String,
    pub name: String,
    pub unit: String,
    pub current: Decimal,
    pub minimum: Decimal,
    /// `current - minimum`, zero or negative
    pub difference: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValue {
    pub category: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialStock {
    pub material_id: String,
    pub name: String,
    pub on_hand: Decimal,
}

/// Figures shown on the dashboard for the current filter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_inventory_value: Decimal,
    pub filtered_count: usize,
    pub low_stock_count: usize,
    pub low_stock: Vec<LowStockRow>,
    /// Stock value per category over all materials, ignoring the filter
    pub stock_value_by_category: Vec<CategoryValue>,
    pub stock_by_material: Vec<MaterialStock>,
}

impl DashboardSummary {
    pub fn build(
        materials: &[RawMaterial],
        levels: &StockLevels,
        filter: &MaterialFilter,
        coil_category: &str,
    ) -> Self {
        let filtered = filter_materials(materials, filter, coil_category);

        let total_inventory_value = filtered
            .iter()
            .map(|m| clamped_mul(levels.on_hand(&m.id), m.cost))
            .fold(Decimal::ZERO, clamped_add);

        let low_stock: Vec<LowStockRow> = filtered
            .iter()
            .filter(|m| is_low_stock(m, levels))
            .map(|m| {
                let current = levels.on_hand(&m.id);
                LowStockRow {
                    material_id: m.id.clone(),
                    name: m.name.clone(),
                    unit: m.unit.clone(),
                    current,
                    minimum: m.min_stock,
                    difference: clamped_sub(current, m.min_stock),
                }
            })
            .collect();

        let stock_by_material: Vec<MaterialStock> = filtered
            .iter()
            .map(|m| MaterialStock {
                material_id: m.id.clone(),
                name: m.display_name(coil_category),
                on_hand: levels.on_hand(&m.id),
            })
            .collect();

        Self {
            total_inventory_value,
            filtered_count: filtered.len(),
            low_stock_count: low_stock.len(),
            low_stock,
            stock_value_by_category: stock_value_by_category(materials, levels),
            stock_by_material,
        }
    }
}

/// Σ on-hand × cost per category, categories in first-seen order
pub fn stock_value_by_category(
    materials: &[RawMaterial],
    levels: &StockLevels,
) -> Vec<CategoryValue> {
    let mut values: Vec<CategoryValue> = Vec::new();
    for material in materials {
        let value = clamped_mul(levels.on_hand(&material.id), material.cost);
        match values.iter_mut().find(|v| v.category == material.category) {
            Some(existing) => existing.value = clamped_add(existing.value, value),
            None => values.push(CategoryValue {
                category: material.category.clone(),
                value,
            }),
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::compute_stock_levels;
    use crate::models::DEFAULT_COIL_CATEGORY;
    use crate::seed;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_seed_dashboard() {
        let materials = seed::raw_materials();
        let levels = compute_stock_levels(&materials, &seed::inflows(), &seed::outflows());
        let summary = DashboardSummary::build(
            &materials,
            &levels,
            &MaterialFilter::default(),
            DEFAULT_COIL_CATEGORY,
        );

        // 30*150.75 + 750*25.50 + 120*45.20 + 40*12.00 + 3800*35.80
        assert_eq!(summary.total_inventory_value, dec("165591.50"));
        assert_eq!(summary.filtered_count, 5);
        assert_eq!(summary.low_stock_count, 0);
        assert_eq!(summary.stock_by_material[4].name, "Bobina de Acero Galvanizado (1500mm x 0.5mm)");
    }

    #[test]
    fn test_category_values_ignore_filter() {
        let materials = seed::raw_materials();
        let levels = compute_stock_levels(&materials, &seed::inflows(), &seed::outflows());
        let filter = MaterialFilter {
            category: Some("Plásticos".to_string()),
            ..Default::default()
        };
        let summary = DashboardSummary::build(&materials, &levels, &filter, DEFAULT_COIL_CATEGORY);

        assert_eq!(summary.filtered_count, 1);
        assert_eq!(summary.total_inventory_value, dec("19125.00"));
        assert_eq!(summary.stock_value_by_category.len(), 4);
        assert_eq!(summary.stock_value_by_category[0].category, "Metales");
        assert_eq!(summary.stock_value_by_category[0].value, dec("5002.50"));
    }

    #[test]
    fn test_low_stock_rows() {
        let materials = seed::raw_materials();
        let levels = compute_stock_levels(&materials, &seed::inflows(), &[]);
        let mut outflows = seed::outflows();
        outflows[1].quantity = dec("700");
        let levels_after = compute_stock_levels(&materials, &seed::inflows(), &outflows);

        assert_eq!(
            DashboardSummary::build(&materials, &levels, &MaterialFilter::default(), DEFAULT_COIL_CATEGORY)
                .low_stock_count,
            0
        );

        let summary = DashboardSummary::build(
            &materials,
            &levels_after,
            &MaterialFilter::default(),
            DEFAULT_COIL_CATEGORY,
        );
        assert_eq!(summary.low_stock_count, 1);
        let row = &summary.low_stock[0];
        assert_eq!(row.material_id, "rm-2");
        assert_eq!(row.current, dec("300"));
        assert_eq!(row.minimum, dec("500"));
        assert_eq!(row.difference, dec("-200"));
        assert_eq!(row.unit, "kg");
    }

    #[test]
    fn test_low_stock_row_uses_plain_name() {
        let materials = seed::raw_materials();
        let levels = compute_stock_levels(&materials, &[], &[]);
        let summary = DashboardSummary::build(
            &materials,
            &levels,
            &MaterialFilter::default(),
            DEFAULT_COIL_CATEGORY,
        );
        let coil = summary
            .low_stock
            .iter()
            .find(|row| row.material_id == "rm-5")
            .unwrap();
        assert_eq!(coil.name, "Bobina de Acero Galvanizado");
        assert_eq!(
            summary.stock_by_material[4].name,
            "Bobina de Acero Galvanizado (1500mm x 0.5mm)"
        );
    }

    #[test]
    fn test_overflowing_values_are_clamped() {
        let mut materials = seed::raw_materials();
        materials[0].cost = dec("1000000000000000");
        materials[3].cost = dec("1000000000000000");
        let mut inflows = seed::inflows();
        inflows[0].quantity = dec("1000000000000000");
        inflows[0].raw_material_id = "rm-1".to_string();
        inflows[1].quantity = dec("1000000000000000");
        inflows[1].raw_material_id = "rm-4".to_string();
        let levels = compute_stock_levels(&materials, &inflows, &[]);

        // Each product is 1e30, beyond Decimal::MAX (~7.9e28)
        let summary = DashboardSummary::build(
            &materials,
            &levels,
            &MaterialFilter::default(),
            DEFAULT_COIL_CATEGORY,
        );
        assert_eq!(summary.total_inventory_value, Decimal::MAX);
        assert_eq!(summary.stock_value_by_category[0].category, "Metales");
        assert_eq!(summary.stock_value_by_category[0].value, Decimal::MAX);

        materials[1].min_stock = Decimal::MAX;
        let mut outflows = seed::outflows();
        outflows.truncate(2);
        outflows[1].quantity = Decimal::MAX;
        let drained = compute_stock_levels(&materials, &[], &outflows);
        let summary = DashboardSummary::build(
            &materials,
            &drained,
            &MaterialFilter::default(),
            DEFAULT_COIL_CATEGORY,
        );
        let row = summary
            .low_stock
            .iter()
            .find(|row| row.material_id == "rm-2")
            .unwrap();
        assert_eq!(row.difference, Decimal::MIN);
    }
}

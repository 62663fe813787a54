//! Filter engine for materials and movements
//!
//! All criteria are AND-combined. An unset criterion matches everything and
//! malformed input never fails a filter; it simply drops that constraint.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{merge_movements, Movement, RawMaterial, StockInflow, StockOutflow};
use crate::types::DateRange;

/// `<width> x <thickness>` anywhere in the search term
static DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)").expect("Invalid dimensions regex")
});

// ============================================================================
// Material Filter
// ============================================================================

/// Dashboard filter state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialFilter {
    pub search_term: String,
    pub category: Option<String>,
    pub material_id: Option<String>,
    /// Raw text; ignored when empty or not a number
    pub width: String,
    /// Raw text; ignored when empty or not a number
    pub thickness: String,
}

impl MaterialFilter {
    /// Chart drill-down on a category bar. Always clears the material pick.
    pub fn toggle_category(&mut self, name: &str) {
        if self.category.as_deref() == Some(name) {
            self.category = None;
        } else {
            self.category = Some(name.to_string());
        }
        self.material_id = None;
    }

    /// Chart drill-down on a material bar
    pub fn toggle_material(&mut self, id: &str) {
        if self.material_id.as_deref() == Some(id) {
            self.material_id = None;
        } else {
            self.material_id = Some(id.to_string());
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn matches(&self, material: &RawMaterial, query: &SearchQuery, coil_category: &str) -> bool {
        if let Some(category) = selected(&self.category) {
            if material.category != category {
                return false;
            }
        }
        if let Some(id) = selected(&self.material_id) {
            if material.id != id {
                return false;
            }
        }
        if let Some(width) = parse_dimension(&self.width) {
            if material.width != Some(width) {
                return false;
            }
        }
        if let Some(thickness) = parse_dimension(&self.thickness) {
            if material.thickness != Some(thickness) {
                return false;
            }
        }
        query.matches(material, coil_category)
    }
}

/// A blank pick (`""` from an unselected dropdown) counts as unset.
fn selected(pick: &Option<String>) -> Option<&str> {
    pick.as_deref().filter(|value| !value.trim().is_empty())
}

fn parse_dimension(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw).ok()
}

/// Interpretation of the free-text search field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Any,
    /// Coil lookup by exact width and thickness
    Dimensions { width: Decimal, thickness: Decimal },
    /// Lowercased substring
    Text(String),
}

impl SearchQuery {
    /// Dimensional form wins whenever it parses.
    pub fn parse(term: &str) -> Self {
        if term.is_empty() {
            return SearchQuery::Any;
        }
        if let Some(caps) = DIMENSIONS.captures(term) {
            let width = caps.get(1).and_then(|m| Decimal::from_str(m.as_str()).ok());
            let thickness = caps.get(2).and_then(|m| Decimal::from_str(m.as_str()).ok());
            if let (Some(width), Some(thickness)) = (width, thickness) {
                return SearchQuery::Dimensions { width, thickness };
            }
        }
        SearchQuery::Text(term.to_lowercase())
    }

    pub fn matches(&self, material: &RawMaterial, coil_category: &str) -> bool {
        match self {
            SearchQuery::Any => true,
            SearchQuery::Dimensions { width, thickness } => {
                material.is_coil(coil_category)
                    && material.width == Some(*width)
                    && material.thickness == Some(*thickness)
            }
            SearchQuery::Text(needle) => {
                material.name.to_lowercase().contains(needle.as_str())
                    || material.sku.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

/// Materials matching every active criterion, in their original order
pub fn filter_materials<'a>(
    materials: &'a [RawMaterial],
    filter: &MaterialFilter,
    coil_category: &str,
) -> Vec<&'a RawMaterial> {
    let query = SearchQuery::parse(&filter.search_term);
    materials
        .iter()
        .filter(|m| filter.matches(m, &query, coil_category))
        .collect()
}

/// Materials page search over name, sku and category
pub fn search_materials<'a>(materials: &'a [RawMaterial], term: &str) -> Vec<&'a RawMaterial> {
    let needle = term.to_lowercase();
    materials
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle)
                || m.sku.to_lowercase().contains(&needle)
                || m.category.to_lowercase().contains(&needle)
        })
        .collect()
}

// ============================================================================
// Movement Filter
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKindFilter {
    #[default]
    All,
    Inflow,
    Outflow,
}

/// Movements view filter state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovementFilter {
    pub kind: MovementKindFilter,
    pub material_id: Option<String>,
    /// Invoice number for inflows; work order or responsible for outflows
    pub search_term: String,
    /// `YYYY-MM-DD`, inclusive
    pub start_date: String,
    /// `YYYY-MM-DD`, inclusive
    pub end_date: String,
}

impl MovementFilter {
    fn matches(&self, movement: &Movement<'_>, range: &DateRange, needle: &str) -> bool {
        let kind_ok = match (self.kind, movement) {
            (MovementKindFilter::All, _) => true,
            (MovementKindFilter::Inflow, Movement::Inflow(_)) => true,
            (MovementKindFilter::Outflow, Movement::Outflow(_)) => true,
            _ => false,
        };
        if !kind_ok {
            return false;
        }
        if let Some(id) = selected(&self.material_id) {
            if movement.raw_material_id() != id {
                return false;
            }
        }
        if !range.contains(movement.date()) {
            return false;
        }
        if needle.is_empty() {
            return true;
        }
        match movement {
            Movement::Inflow(m) => m.invoice_number.to_lowercase().contains(needle),
            Movement::Outflow(m) => {
                m.work_order.to_lowercase().contains(needle)
                    || m.responsible.to_lowercase().contains(needle)
            }
        }
    }
}

/// Merged movements matching the filter, newest first
pub fn filter_movements<'a>(
    inflows: &'a [StockInflow],
    outflows: &'a [StockOutflow],
    filter: &MovementFilter,
) -> Vec<Movement<'a>> {
    let range = DateRange::from_bounds(&filter.start_date, &filter.end_date);
    let needle = filter.search_term.to_lowercase();
    merge_movements(inflows, outflows)
        .into_iter()
        .filter(|m| filter.matches(m, &range, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MovementKind, DEFAULT_COIL_CATEGORY};
    use crate::seed;

    fn ids(materials: &[&RawMaterial]) -> Vec<String> {
        materials.iter().map(|m| m.id.clone()).collect()
    }

    // ========================================================================
    // Search Query Tests
    // ========================================================================

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(
            SearchQuery::parse("1500x0.5"),
            SearchQuery::Dimensions {
                width: Decimal::from(1500),
                thickness: Decimal::new(5, 1),
            }
        );
        assert!(matches!(
            SearchQuery::parse("bobina 1500 x 0.5 galv"),
            SearchQuery::Dimensions { .. }
        ));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(SearchQuery::parse(""), SearchQuery::Any);
        assert_eq!(SearchQuery::parse("ACERO"), SearchQuery::Text("acero".into()));
        // Uppercase X is not a dimension separator
        assert_eq!(SearchQuery::parse("1500X0.5"), SearchQuery::Text("1500x0.5".into()));
    }

    // ========================================================================
    // Material Filter Tests
    // ========================================================================

    #[test]
    fn test_empty_filter_is_identity() {
        let materials = seed::raw_materials();
        let result = filter_materials(&materials, &MaterialFilter::default(), DEFAULT_COIL_CATEGORY);
        assert_eq!(result.len(), materials.len());
    }

    #[test]
    fn test_dimension_search() {
        let materials = seed::raw_materials();
        let filter = MaterialFilter {
            search_term: "1500x0.5".to_string(),
            ..Default::default()
        };
        let result = filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY);
        assert_eq!(ids(&result), vec!["rm-5"]);
    }

    #[test]
    fn test_dimension_search_requires_coil_category() {
        let mut materials = seed::raw_materials();
        materials[4].category = "Metales".to_string();
        let filter = MaterialFilter {
            search_term: "1500x0.5".to_string(),
            ..Default::default()
        };
        assert!(filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY).is_empty());
    }

    #[test]
    fn test_text_search_name_or_sku() {
        let materials = seed::raw_materials();
        let by_name = MaterialFilter {
            search_term: "acero".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_materials(&materials, &by_name, DEFAULT_COIL_CATEGORY)),
            vec!["rm-1", "rm-5"]
        );

        let by_sku = MaterialFilter {
            search_term: "pl-0".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_materials(&materials, &by_sku, DEFAULT_COIL_CATEGORY)),
            vec!["rm-2"]
        );
    }

    #[test]
    fn test_category_and_material_criteria() {
        let materials = seed::raw_materials();
        let mut filter = MaterialFilter {
            category: Some("Metales".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY)),
            vec!["rm-1", "rm-4"]
        );

        filter.material_id = Some("rm-4".to_string());
        assert_eq!(
            ids(&filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY)),
            vec!["rm-4"]
        );

        filter.material_id = Some("rm-2".to_string());
        assert!(filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY).is_empty());
    }

    #[test]
    fn test_width_thickness_criteria() {
        let materials = seed::raw_materials();
        let filter = MaterialFilter {
            width: "1500".to_string(),
            thickness: "0.50".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY)),
            vec!["rm-5"]
        );

        let wrong = MaterialFilter {
            width: "1200".to_string(),
            ..Default::default()
        };
        assert!(filter_materials(&materials, &wrong, DEFAULT_COIL_CATEGORY).is_empty());
    }

    #[test]
    fn test_malformed_width_is_ignored() {
        let materials = seed::raw_materials();
        let filter = MaterialFilter {
            width: "abc".to_string(),
            thickness: " ".to_string(),
            ..Default::default()
        };
        let result = filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY);
        assert_eq!(result.len(), materials.len());
    }

    #[test]
    fn test_toggle_category_clears_material() {
        let mut filter = MaterialFilter {
            material_id: Some("rm-1".to_string()),
            ..Default::default()
        };
        filter.toggle_category("Metales");
        assert_eq!(filter.category.as_deref(), Some("Metales"));
        assert_eq!(filter.material_id, None);

        filter.toggle_category("Metales");
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_toggle_material() {
        let mut filter = MaterialFilter::default();
        filter.toggle_material("rm-2");
        assert_eq!(filter.material_id.as_deref(), Some("rm-2"));
        filter.toggle_material("rm-3");
        assert_eq!(filter.material_id.as_deref(), Some("rm-3"));
        filter.toggle_material("rm-3");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_search_materials_includes_category() {
        let materials = seed::raw_materials();
        assert_eq!(ids(&search_materials(&materials, "madera")), vec!["rm-3"]);
        assert_eq!(search_materials(&materials, "").len(), materials.len());
    }

    // ========================================================================
    // Movement Filter Tests
    // ========================================================================

    #[test]
    fn test_movement_kind_filter() {
        let (inflows, outflows) = (seed::inflows(), seed::outflows());
        let filter = MovementFilter {
            kind: MovementKindFilter::Outflow,
            ..Default::default()
        };
        let result = filter_movements(&inflows, &outflows, &filter);
        assert_eq!(result.len(), outflows.len());
        assert!(result.iter().all(|m| m.kind() == MovementKind::Outflow));
    }

    #[test]
    fn test_movement_search_term() {
        let (inflows, outflows) = (seed::inflows(), seed::outflows());
        let by_invoice = MovementFilter {
            search_term: "fc-001".to_string(),
            ..Default::default()
        };
        let result = filter_movements(&inflows, &outflows, &by_invoice);
        let ids: Vec<&str> = result.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["in-5", "in-4", "in-1"]);

        let by_responsible = MovementFilter {
            search_term: "operario c".to_string(),
            ..Default::default()
        };
        let result = filter_movements(&inflows, &outflows, &by_responsible);
        let ids: Vec<&str> = result.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["out-6", "out-4"]);
    }

    #[test]
    fn test_movement_date_range_inclusive() {
        let (inflows, outflows) = (seed::inflows(), seed::outflows());
        let filter = MovementFilter {
            start_date: "2023-10-05".to_string(),
            end_date: "2023-10-10".to_string(),
            ..Default::default()
        };
        let result = filter_movements(&inflows, &outflows, &filter);
        let ids: Vec<&str> = result.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["out-1", "in-5", "in-4"]);
    }

    #[test]
    fn test_movement_bad_dates_ignored() {
        let (inflows, outflows) = (seed::inflows(), seed::outflows());
        let filter = MovementFilter {
            start_date: "not-a-date".to_string(),
            end_date: "2023/10/10".to_string(),
            material_id: Some("rm-1".to_string()),
            ..Default::default()
        };
        let result = filter_movements(&inflows, &outflows, &filter);
        let ids: Vec<&str> = result.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["out-4", "out-1", "in-1"]);
    }

    #[test]
    fn test_blank_picks_are_unset() {
        let materials = seed::raw_materials();
        let filter: MaterialFilter =
            serde_json::from_str(r#"{"category":"","materialId":"  "}"#).unwrap();
        let result = filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY);
        assert_eq!(result.len(), materials.len());

        let (inflows, outflows) = (seed::inflows(), seed::outflows());
        let filter: MovementFilter = serde_json::from_str(r#"{"materialId":""}"#).unwrap();
        let result = filter_movements(&inflows, &outflows, &filter);
        assert_eq!(result.len(), inflows.len() + outflows.len());
    }
}

//! Filter engine tests
//!
//! Covers:
//! - An unset filter returns every material in order
//! - Results are always an ordered subset of the input
//! - Each criterion narrows independently (AND semantics)
//! - Malformed input never panics

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    filter_materials, filter_movements, seed, MaterialFilter, MovementFilter, MovementKindFilter,
    RawMaterial, SearchQuery, DEFAULT_COIL_CATEGORY,
};

fn is_ordered_subset(result: &[&RawMaterial], all: &[RawMaterial]) -> bool {
    let mut cursor = all.iter();
    result
        .iter()
        .all(|r| cursor.by_ref().any(|m| m.id == r.id))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_dimension_search_skips_text_match() {
        // "Acero 1500x0.5" parses as dimensions; the word "Acero" is not searched
        let materials = seed::raw_materials();
        let filter = MaterialFilter {
            search_term: "Acero 1500x0.5".to_string(),
            ..Default::default()
        };
        let result = filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "rm-5");
    }

    #[test]
    fn test_dimension_search_with_custom_coil_category() {
        let mut materials = seed::raw_materials();
        materials[4].category = "Coils".to_string();
        let filter = MaterialFilter {
            search_term: "1500 x 0.5".to_string(),
            ..Default::default()
        };
        assert!(filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY).is_empty());
        assert_eq!(filter_materials(&materials, &filter, "Coils").len(), 1);
    }

    #[test]
    fn test_unmatched_dimensions_return_nothing() {
        let materials = seed::raw_materials();
        let filter = MaterialFilter {
            search_term: "1200x0.5".to_string(),
            ..Default::default()
        };
        assert!(filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY).is_empty());
    }

    #[test]
    fn test_movement_filter_combines_criteria() {
        let (inflows, outflows) = (seed::inflows(), seed::outflows());
        let filter = MovementFilter {
            kind: MovementKindFilter::Outflow,
            material_id: Some("rm-1".to_string()),
            search_term: "OT-2023-003".to_string(),
            ..Default::default()
        };
        let result = filter_movements(&inflows, &outflows, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id(), "out-4");
    }

    #[test]
    fn test_movement_filter_deserializes_partial_json() {
        let filter: MovementFilter =
            serde_json::from_str(r#"{"kind":"inflow","startDate":"2023-10-03"}"#).unwrap();
        let (inflows, outflows) = (seed::inflows(), seed::outflows());
        let ids: Vec<&str> = filter_movements(&inflows, &outflows, &filter)
            .iter()
            .map(|m| m.id())
            .collect();
        assert_eq!(ids, vec!["in-5", "in-4", "in-3"]);
    }

    #[test]
    fn test_material_filter_deserializes_null_category() {
        let filter: MaterialFilter =
            serde_json::from_str(r#"{"searchTerm":"","category":null,"width":"","thickness":""}"#)
                .unwrap();
        assert!(filter.is_empty());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn category_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("Metales".to_string())),
            Just(Some("Bobinas".to_string())),
            Just(Some("Inexistente".to_string())),
        ]
    }

    fn material_id_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![Just(None), (1u32..=6u32).prop_map(|n| Some(format!("rm-{n}")))]
    }

    fn filter_strategy() -> impl Strategy<Value = MaterialFilter> {
        (
            "[a-zA-Z0-9 .x-]{0,12}",
            category_strategy(),
            material_id_strategy(),
            "[0-9a-z.]{0,5}",
            "[0-9a-z.]{0,5}",
        )
            .prop_map(|(search_term, category, material_id, width, thickness)| MaterialFilter {
                search_term,
                category,
                material_id,
                width,
                thickness,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Results are an order-preserving subset of the input.
        #[test]
        fn prop_result_is_ordered_subset(filter in filter_strategy()) {
            let materials = seed::raw_materials();
            let result = filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY);
            prop_assert!(is_ordered_subset(&result, &materials));
        }

        /// Every returned material satisfies each active criterion.
        #[test]
        fn prop_results_satisfy_criteria(filter in filter_strategy()) {
            let materials = seed::raw_materials();
            for material in filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY) {
                if let Some(category) = &filter.category {
                    prop_assert_eq!(&material.category, category);
                }
                if let Some(id) = &filter.material_id {
                    prop_assert_eq!(&material.id, id);
                }
                match SearchQuery::parse(&filter.search_term) {
                    SearchQuery::Dimensions { width, thickness } => {
                        prop_assert_eq!(&material.category, DEFAULT_COIL_CATEGORY);
                        prop_assert_eq!(material.width, Some(width));
                        prop_assert_eq!(material.thickness, Some(thickness));
                    }
                    SearchQuery::Text(needle) => {
                        prop_assert!(
                            material.name.to_lowercase().contains(&needle)
                                || material.sku.to_lowercase().contains(&needle)
                        );
                    }
                    SearchQuery::Any => {}
                }
            }
        }

        /// Adding a criterion never grows the result.
        #[test]
        fn prop_extra_criterion_narrows(filter in filter_strategy(), category in category_strategy()) {
            let materials = seed::raw_materials();
            let base = MaterialFilter { category: None, ..filter.clone() };
            let narrowed = MaterialFilter { category, ..filter };
            prop_assert!(
                filter_materials(&materials, &narrowed, DEFAULT_COIL_CATEGORY).len()
                    <= filter_materials(&materials, &base, DEFAULT_COIL_CATEGORY).len()
            );
        }

        /// Arbitrary date text never panics and never adds movements.
        #[test]
        fn prop_movement_dates_never_panic(start in ".{0,12}", end in ".{0,12}") {
            let (inflows, outflows) = (seed::inflows(), seed::outflows());
            let filter = MovementFilter { start_date: start, end_date: end, ..Default::default() };
            let result = filter_movements(&inflows, &outflows, &filter);
            prop_assert!(result.len() <= inflows.len() + outflows.len());
        }

        /// Width text that is not a number places no constraint.
        #[test]
        fn prop_non_numeric_width_ignored(width in "[a-z]{1,6}") {
            let materials = seed::raw_materials();
            let filter = MaterialFilter { width, ..Default::default() };
            prop_assert_eq!(
                filter_materials(&materials, &filter, DEFAULT_COIL_CATEGORY).len(),
                materials.len()
            );
        }
    }

    #[test]
    fn test_decimal_equality_ignores_scale() {
        assert_eq!(Decimal::new(50, 2), Decimal::new(5, 1));
    }
}

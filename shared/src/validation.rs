//! Validation for inventory records
//!
//! Form drafts derive [`Validate`]; failures are flattened into a
//! field → message map keyed by the camelCase wire name.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
pub use validator::Validate;
use validator::{ValidationError, ValidationErrors};

/// Field name → first validation message for that field
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid email regex"));

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

// ============================================================================
// Field Validators
// ============================================================================

/// Material cost must be strictly positive
pub fn validate_material_cost(cost: &Decimal) -> Result<(), ValidationError> {
    if *cost <= Decimal::ZERO {
        return Err(error_with_message(
            "positive",
            "El costo debe ser mayor a cero.",
        ));
    }
    Ok(())
}

/// Movement quantity must be strictly positive
pub fn validate_movement_quantity(quantity: &Decimal) -> Result<(), ValidationError> {
    if *quantity <= Decimal::ZERO {
        return Err(error_with_message(
            "positive",
            "La cantidad debe ser mayor a cero.",
        ));
    }
    Ok(())
}

/// Supplier email is required and must look like `a@b.c`
pub fn validate_supplier_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(error_with_message("required", "El email es requerido."));
    }
    if !is_email_shaped(email) {
        return Err(error_with_message(
            "email",
            "El formato del email no es válido.",
        ));
    }
    Ok(())
}

/// Category names may not be blank
pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(error_with_message(
            "required",
            "El nombre de la categoría no puede estar vacío.",
        ));
    }
    Ok(())
}

/// Basic `something@something.something` check, no further RFC rules
pub fn is_email_shaped(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Run the derived validation and flatten any failures.
pub fn validate_draft<T: Validate>(draft: &T) -> Result<(), FieldErrors> {
    draft.validate().map_err(|errors| to_field_errors(&errors))
}

/// Keep the first message per field, keyed by its camelCase name.
pub fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, list)| {
            list.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                (camel_case(field), message)
            })
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CategoryDraft, RawMaterialDraft, StockInflowDraft, StockOutflowDraft, SupplierDraft,
    };
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 1).unwrap()
    }

    // ========================================================================
    // Field Validator Tests
    // ========================================================================

    #[test]
    fn test_validate_email_shape() {
        assert!(validate_supplier_email("ventas@acerosdelsur.com").is_ok());
        assert!(validate_supplier_email("a@b.c").is_ok());
        assert!(validate_supplier_email("invalid").is_err());
        assert!(validate_supplier_email("no-dot@host").is_err());
    }

    #[test]
    fn test_validate_email_messages() {
        let empty = validate_supplier_email("").unwrap_err();
        assert_eq!(empty.message.unwrap(), "El email es requerido.");

        let bad = validate_supplier_email("nope").unwrap_err();
        assert_eq!(bad.message.unwrap(), "El formato del email no es válido.");
    }

    #[test]
    fn test_validate_positive_amounts() {
        assert!(validate_material_cost(&Decimal::new(1, 2)).is_ok());
        assert!(validate_material_cost(&Decimal::ZERO).is_err());
        assert!(validate_movement_quantity(&Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("raw_material_id"), "rawMaterialId");
        assert_eq!(camel_case("sku"), "sku");
    }

    // ========================================================================
    // Draft Tests
    // ========================================================================

    #[test]
    fn test_empty_material_draft() {
        let errors = validate_draft(&RawMaterialDraft::default()).unwrap_err();
        assert_eq!(errors["sku"], "El SKU es requerido.");
        assert_eq!(errors["name"], "El nombre es requerido.");
        assert_eq!(errors["cost"], "El costo debe ser mayor a cero.");
        assert_eq!(errors["supplierId"], "Debe seleccionar un proveedor.");
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_valid_material_draft() {
        let draft = RawMaterialDraft {
            sku: "AC-009".to_string(),
            name: "Chapa".to_string(),
            category: "Metales".to_string(),
            cost: Decimal::from(10),
            supplier_id: "supp-1".to_string(),
            ..Default::default()
        };
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_supplier_draft() {
        let errors = validate_draft(&SupplierDraft {
            email: "bad".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(errors["name"], "El nombre es requerido.");
        assert_eq!(errors["taxId"], "El CUIT/DNI es requerido.");
        assert_eq!(errors["email"], "El formato del email no es válido.");
    }

    #[test]
    fn test_blank_category_name() {
        let errors = validate_draft(&CategoryDraft {
            name: "   ".to_string(),
        })
        .unwrap_err();
        assert_eq!(
            errors["name"],
            "El nombre de la categoría no puede estar vacío."
        );
    }

    #[test]
    fn test_inflow_invoice_optional() {
        let draft = StockInflowDraft {
            date: today(),
            raw_material_id: "rm-1".to_string(),
            quantity: Decimal::from(5),
            supplier_id: "supp-1".to_string(),
            invoice_number: String::new(),
            notes: String::new(),
        };
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_outflow_required_fields() {
        let draft = StockOutflowDraft {
            date: today(),
            raw_material_id: String::new(),
            quantity: Decimal::ZERO,
            work_order: String::new(),
            responsible: String::new(),
            notes: String::new(),
        };
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors["rawMaterialId"], "Seleccione una materia prima.");
        assert_eq!(errors["quantity"], "La cantidad debe ser mayor a cero.");
        assert_eq!(errors["workOrder"], "El N° de OT es obligatorio.");
        assert_eq!(errors["responsible"], "El responsable es requerido.");
    }
}

//! Material categories

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A material category, referenced from materials by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryDraft {
    #[serde(default)]
    #[validate(custom = "crate::validation::validate_category_name")]
    pub name: String,
}

impl CategoryDraft {
    /// Surrounding whitespace is not kept.
    pub fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name.trim().to_string(),
        }
    }
}

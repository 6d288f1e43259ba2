//! Catalog entries and their categorical metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A catalog product. Only the categories may change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub main_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        main_category: impl Into<String>,
        sub_category: Option<String>,
    ) -> Self {
        Self {
            id: id.into().trim().to_string(),
            main_category: main_category.into().trim().to_string(),
            sub_category: normalize_optional(sub_category),
        }
    }

    /// Returns the sub category, or an empty string when unset.
    pub fn sub_category_or_blank(&self) -> &str {
        self.sub_category.as_deref().unwrap_or("")
    }

    pub fn categories(&self) -> Categories {
        Categories {
            main: self.main_category.clone(),
            sub: self.sub_category_or_blank().to_string(),
        }
    }

    /// Reassigns the product to a new main/sub category pair.
    pub fn recategorize(&mut self, main_category: impl Into<String>, sub_category: Option<String>) {
        self.main_category = main_category.into().trim().to_string();
        self.sub_category = normalize_optional(sub_category);
    }

    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id.trim()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_category {
            Some(sub) => write!(f, "{} ({} / {})", self.id, self.main_category, sub),
            None => write!(f, "{} ({})", self.id, self.main_category),
        }
    }
}

/// Main/sub category pair; blank strings stand for "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    pub main: String,
    pub sub: String,
}

/// A product together with its stock level derived from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStock {
    pub product: Product,
    pub current_stock: i64,
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

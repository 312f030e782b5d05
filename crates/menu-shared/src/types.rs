//! Common types

use serde::{Deserialize, Serialize};

/// Storage-assigned primary key shared by categories, subcategories, and menu items.
pub type EntityId = i64;

/// Display language of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Tr,
    En,
}

impl Locale {
    /// The locale used when this one has no text.
    pub fn fallback(&self) -> Locale {
        match self {
            Locale::Tr => Locale::En,
            Locale::En => Locale::Tr,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Tr
    }
}

/// What deleting a category does to the rows that still reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDeletePolicy {
    /// Refuse while any subcategory or menu item references the category.
    Reject,
    /// Delete the category's subcategories first; still refuse while menu items reference it.
    Cascade,
}

impl CategoryDeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryDeletePolicy::Reject => "reject",
            CategoryDeletePolicy::Cascade => "cascade",
        }
    }
}

impl Default for CategoryDeletePolicy {
    fn default() -> Self {
        CategoryDeletePolicy::Reject
    }
}

//! Read model of the catalog: categories with their subcategories and item counts.

use serde::Serialize;

use super::category::Category;
use super::subcategory::Subcategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub slug: String,
    /// Menu items whose `category_id` is this category, whatever their subcategory.
    pub item_count: usize,
    pub subcategories: Vec<SubcategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryNode {
    #[serde(flatten)]
    pub subcategory: Subcategory,
    pub slug: String,
    pub item_count: usize,
}

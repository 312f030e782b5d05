//! Catalog store trait (port)

use async_trait::async_trait;
use menu_shared::EntityId;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryFields, MenuItem, MenuItemFields, Subcategory, SubcategoryFields};
use crate::error::{DomainError, EntityKind};

/// Rows sharing one dense `order` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiblingGroup {
    Categories,
    Subcategories { category_id: EntityId },
}

impl SiblingGroup {
    pub fn entity(&self) -> EntityKind {
        match self {
            SiblingGroup::Categories => EntityKind::Category,
            SiblingGroup::Subcategories { .. } => EntityKind::Subcategory,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemFilter {
    pub category_id: Option<EntityId>,
    pub subcategory_id: Option<EntityId>,
}

impl MenuItemFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(category_id: EntityId) -> Self {
        Self {
            category_id: Some(category_id),
            subcategory_id: None,
        }
    }

    pub fn subcategory(subcategory_id: EntityId) -> Self {
        Self {
            category_id: None,
            subcategory_id: Some(subcategory_id),
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        self.category_id.map_or(true, |id| item.category_id == id)
            && self.subcategory_id.map_or(true, |id| item.subcategory_id == Some(id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemSort {
    /// Turkish name in Turkish alphabet order, then id. Public menu order.
    #[default]
    Name,
    /// Creation time, then id. Admin dashboard order.
    CreatedAt,
}

/// Persistent catalog storage keyed by numeric id.
///
/// Each call is an independent round-trip; there are no multi-row transactions.
/// Writes against a missing row fail with `NotFound`, storage failures with `StoreUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_category(&self, id: EntityId) -> Result<Option<Category>, DomainError>;
    /// Ordered by `order`, then id.
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    async fn insert_category(&self, fields: &CategoryFields, order: i32) -> Result<Category, DomainError>;
    async fn update_category(&self, id: EntityId, fields: &CategoryFields) -> Result<Category, DomainError>;
    async fn delete_category(&self, id: EntityId) -> Result<(), DomainError>;

    async fn find_subcategory(&self, id: EntityId) -> Result<Option<Subcategory>, DomainError>;
    /// Ordered by category, `order`, then id. `None` lists every subcategory.
    async fn list_subcategories(&self, category_id: Option<EntityId>) -> Result<Vec<Subcategory>, DomainError>;
    async fn insert_subcategory(
        &self,
        category_id: EntityId,
        fields: &SubcategoryFields,
        order: i32,
    ) -> Result<Subcategory, DomainError>;
    async fn update_subcategory(&self, id: EntityId, fields: &SubcategoryFields) -> Result<Subcategory, DomainError>;
    async fn delete_subcategory(&self, id: EntityId) -> Result<(), DomainError>;

    /// Writes one sibling's position. The row must belong to `group`.
    async fn set_position(&self, group: SiblingGroup, id: EntityId, position: i32) -> Result<(), DomainError>;

    async fn find_menu_item(&self, id: EntityId) -> Result<Option<MenuItem>, DomainError>;
    async fn list_menu_items(&self, filter: &MenuItemFilter, sort: MenuItemSort) -> Result<Vec<MenuItem>, DomainError>;
    async fn count_menu_items(&self, filter: &MenuItemFilter) -> Result<usize, DomainError>;
    async fn insert_menu_item(&self, fields: &MenuItemFields) -> Result<MenuItem, DomainError>;
    async fn update_menu_item(&self, id: EntityId, fields: &MenuItemFields) -> Result<MenuItem, DomainError>;
    async fn delete_menu_item(&self, id: EntityId) -> Result<(), DomainError>;
    /// Clears `subcategory_id` on every item of the subcategory; returns how many changed.
    async fn detach_subcategory_items(&self, subcategory_id: EntityId) -> Result<usize, DomainError>;
}

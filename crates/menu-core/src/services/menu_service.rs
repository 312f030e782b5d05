// ============================================================================
// Menu Core - Public Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Read-only views behind the guest-facing menu pages

use std::sync::Arc;

use menu_shared::constants::SIMILAR_ITEMS_LIMIT;
use menu_shared::EntityId;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Category, MenuItem, Subcategory};
use crate::error::{DomainError, EntityKind};
use crate::repositories::{CatalogStore, MenuItemFilter, MenuItemSort};
use crate::slug;

/// Landing page: every category plus the items of the selected one (or all items).
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemPage {
    pub item: MenuItem,
    pub category: Category,
    /// Other items of the same category, by name.
    pub similar_items: Vec<MenuItem>,
}

pub struct MenuService<S: CatalogStore + ?Sized> {
    store: Arc<S>,
}

impl<S: CatalogStore + ?Sized> MenuService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn home(&self, category_id: Option<EntityId>) -> Result<HomePage, DomainError> {
        let categories = self.store.list_categories().await?;
        let filter = MenuItemFilter {
            category_id,
            subcategory_id: None,
        };
        let items = self.store.list_menu_items(&filter, MenuItemSort::Name).await?;
        Ok(HomePage { categories, items })
    }

    /// Category page from its slug, optionally narrowed to one of its subcategories.
    pub async fn category_page(
        &self,
        category_slug: &str,
        subcategory_id: Option<EntityId>,
    ) -> Result<CategoryPage, DomainError> {
        let id = slug::decode(category_slug)?;
        let category = self
            .store
            .find_category(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Category, id))?;

        let subcategories = self.store.list_subcategories(Some(id)).await?;
        if let Some(sub_id) = subcategory_id {
            if !subcategories.iter().any(|s| s.id == sub_id) {
                return Err(DomainError::not_found(EntityKind::Subcategory, sub_id));
            }
        }

        let filter = MenuItemFilter {
            category_id: Some(id),
            subcategory_id,
        };
        let items = self.store.list_menu_items(&filter, MenuItemSort::Name).await?;
        debug!("Category page {}: {} items", id, items.len());
        Ok(CategoryPage {
            category,
            subcategories,
            items,
        })
    }

    pub async fn item_page(&self, item_slug: &str) -> Result<ItemPage, DomainError> {
        let id = slug::decode(item_slug)?;
        let item = self
            .store
            .find_menu_item(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::MenuItem, id))?;
        let category = self
            .store
            .find_category(item.category_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Category, item.category_id))?;

        let similar_items = self
            .store
            .list_menu_items(&MenuItemFilter::category(item.category_id), MenuItemSort::Name)
            .await?
            .into_iter()
            .filter(|other| other.id != item.id)
            .take(SIMILAR_ITEMS_LIMIT)
            .collect();

        Ok(ItemPage {
            item,
            category,
            similar_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockCatalogStore;
    use chrono::Utc;

    fn category(id: EntityId) -> Category {
        Category {
            id,
            name_tr: "Kebaplar".to_string(),
            name_en: "Kebabs".to_string(),
            image_url: None,
            order: 0,
            created_at: Utc::now(),
        }
    }

    fn item(id: EntityId, name: &str) -> MenuItem {
        MenuItem {
            id,
            category_id: 1,
            subcategory_id: None,
            name_tr: name.to_string(),
            name_en: String::new(),
            description_tr: None,
            description_en: None,
            allergens_tr: None,
            allergens_en: None,
            price: 250.0,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_item_page_excludes_self_and_limits_similar() {
        let mut store = MockCatalogStore::new();
        store
            .expect_find_menu_item()
            .returning(|id| Ok(Some(item(id, "Adana"))));
        store.expect_find_category().returning(|id| Ok(Some(category(id))));
        store.expect_list_menu_items().returning(|_, _| {
            Ok(vec![
                item(1, "Adana"),
                item(2, "Beyti"),
                item(3, "İskender"),
                item(4, "Patlıcan"),
                item(5, "Urfa"),
            ])
        });

        let page = MenuService::new(Arc::new(store))
            .item_page("adana-1")
            .await
            .unwrap();
        let ids: Vec<EntityId> = page.similar_items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(page.category.id, 1);
    }

    #[tokio::test]
    async fn test_category_page_unknown_subcategory() {
        let mut store = MockCatalogStore::new();
        store.expect_find_category().returning(|id| Ok(Some(category(id))));
        store.expect_list_subcategories().returning(|_| Ok(Vec::new()));
        store.expect_list_menu_items().never();

        let result = MenuService::new(Arc::new(store))
            .category_page("kebaplar-1", Some(8))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: EntityKind::Subcategory,
                id: 8
            })
        ));
    }

    #[tokio::test]
    async fn test_bad_slug_never_reaches_store() {
        let store = MockCatalogStore::new();
        let result = MenuService::new(Arc::new(store)).item_page("kebap").await;
        assert!(matches!(result, Err(DomainError::InvalidIdentifier(_))));
    }
}

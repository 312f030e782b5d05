//! In-memory catalog store for development and tests.
//!
//! Mirrors the PostgreSQL adapter: auto-increment ids, the same list orderings, and
//! the same reference checks the foreign keys enforce there. Names are ordered by
//! Turkish alphabet, which Postgres matches under a Turkish database collation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use menu_core::domain::{
    Category, CategoryFields, MenuItem, MenuItemFields, Subcategory, SubcategoryFields,
};
use menu_core::error::{DomainError, EntityKind};
use menu_core::repositories::{CatalogStore, MenuItemFilter, MenuItemSort, SiblingGroup};
use menu_core::collation;
use menu_shared::EntityId;

#[derive(Debug, Default)]
struct CatalogTables {
    last_id: EntityId,
    categories: BTreeMap<EntityId, Category>,
    subcategories: BTreeMap<EntityId, Subcategory>,
    menu_items: BTreeMap<EntityId, MenuItem>,
}

impl CatalogTables {
    fn next_id(&mut self) -> EntityId {
        self.last_id += 1;
        self.last_id
    }

    fn check_item_references(&self, fields: &MenuItemFields) -> Result<(), DomainError> {
        let category_ok = self.categories.contains_key(&fields.category_id);
        let subcategory_ok = fields
            .subcategory_id
            .map_or(true, |id| self.subcategories.contains_key(&id));
        if category_ok && subcategory_ok {
            Ok(())
        } else {
            Err(missing_reference("menu item"))
        }
    }
}

fn missing_reference(operation: &str) -> DomainError {
    DomainError::ValidationFailed(format!("{} references a missing catalog row", operation))
}

fn still_referenced(operation: &str) -> DomainError {
    DomainError::ValidationFailed(format!("{}: row is still referenced", operation))
}

#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    tables: RwLock<CatalogTables>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find_category(&self, id: EntityId) -> Result<Option<Category>, DomainError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by_key(|c| (c.order, c.id));
        Ok(categories)
    }

    async fn insert_category(&self, fields: &CategoryFields, order: i32) -> Result<Category, DomainError> {
        let mut tables = self.tables.write().await;
        let category = Category {
            id: tables.next_id(),
            name_tr: fields.name_tr.clone(),
            name_en: fields.name_en.clone(),
            image_url: fields.image_url.clone(),
            order,
            created_at: Utc::now(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: EntityId, fields: &CategoryFields) -> Result<Category, DomainError> {
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Category, id))?;
        category.name_tr = fields.name_tr.clone();
        category.name_en = fields.name_en.clone();
        category.image_url = fields.image_url.clone();
        Ok(category.clone())
    }

    async fn delete_category(&self, id: EntityId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id) {
            return Err(DomainError::not_found(EntityKind::Category, id));
        }
        let subcategories = tables
            .subcategories
            .values()
            .filter(|s| s.category_id == id)
            .count();
        let items = tables
            .menu_items
            .values()
            .filter(|i| i.category_id == id)
            .count();
        if subcategories > 0 || items > 0 {
            return Err(DomainError::HasDependents {
                entity: EntityKind::Category,
                id,
                subcategories,
                items,
            });
        }
        tables.categories.remove(&id);
        Ok(())
    }

    async fn find_subcategory(&self, id: EntityId) -> Result<Option<Subcategory>, DomainError> {
        Ok(self.tables.read().await.subcategories.get(&id).cloned())
    }

    async fn list_subcategories(&self, category_id: Option<EntityId>) -> Result<Vec<Subcategory>, DomainError> {
        let tables = self.tables.read().await;
        let mut subcategories: Vec<Subcategory> = tables
            .subcategories
            .values()
            .filter(|s| category_id.map_or(true, |id| s.category_id == id))
            .cloned()
            .collect();
        subcategories.sort_by_key(|s| (s.category_id, s.order, s.id));
        Ok(subcategories)
    }

    async fn insert_subcategory(
        &self,
        category_id: EntityId,
        fields: &SubcategoryFields,
        order: i32,
    ) -> Result<Subcategory, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&category_id) {
            return Err(missing_reference("insert_subcategory"));
        }
        let subcategory = Subcategory {
            id: tables.next_id(),
            category_id,
            name_tr: fields.name_tr.clone(),
            name_en: fields.name_en.clone(),
            description_tr: fields.description_tr.clone(),
            description_en: fields.description_en.clone(),
            image_url: fields.image_url.clone(),
            order,
            created_at: Utc::now(),
        };
        tables.subcategories.insert(subcategory.id, subcategory.clone());
        Ok(subcategory)
    }

    async fn update_subcategory(&self, id: EntityId, fields: &SubcategoryFields) -> Result<Subcategory, DomainError> {
        let mut tables = self.tables.write().await;
        let subcategory = tables
            .subcategories
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Subcategory, id))?;
        subcategory.name_tr = fields.name_tr.clone();
        subcategory.name_en = fields.name_en.clone();
        subcategory.description_tr = fields.description_tr.clone();
        subcategory.description_en = fields.description_en.clone();
        subcategory.image_url = fields.image_url.clone();
        Ok(subcategory.clone())
    }

    async fn delete_subcategory(&self, id: EntityId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.subcategories.contains_key(&id) {
            return Err(DomainError::not_found(EntityKind::Subcategory, id));
        }
        if tables.menu_items.values().any(|i| i.subcategory_id == Some(id)) {
            return Err(still_referenced("delete_subcategory"));
        }
        tables.subcategories.remove(&id);
        Ok(())
    }

    async fn set_position(&self, group: SiblingGroup, id: EntityId, position: i32) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let slot = match group {
            SiblingGroup::Categories => tables.categories.get_mut(&id).map(|c| &mut c.order),
            SiblingGroup::Subcategories { category_id } => tables
                .subcategories
                .get_mut(&id)
                .filter(|s| s.category_id == category_id)
                .map(|s| &mut s.order),
        };
        match slot {
            Some(order) => {
                *order = position;
                debug!("Position of {} {} set to {}", group.entity(), id, position);
                Ok(())
            }
            None => Err(DomainError::not_found(group.entity(), id)),
        }
    }

    async fn find_menu_item(&self, id: EntityId) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.tables.read().await.menu_items.get(&id).cloned())
    }

    async fn list_menu_items(&self, filter: &MenuItemFilter, sort: MenuItemSort) -> Result<Vec<MenuItem>, DomainError> {
        let tables = self.tables.read().await;
        let mut items: Vec<MenuItem> = tables
            .menu_items
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        match sort {
            MenuItemSort::Name => items.sort_by_cached_key(|i| (collation::sort_key(&i.name_tr), i.id)),
            MenuItemSort::CreatedAt => items.sort_by_key(|i| (i.created_at, i.id)),
        }
        Ok(items)
    }

    async fn count_menu_items(&self, filter: &MenuItemFilter) -> Result<usize, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.menu_items.values().filter(|i| filter.matches(i)).count())
    }

    async fn insert_menu_item(&self, fields: &MenuItemFields) -> Result<MenuItem, DomainError> {
        let mut tables = self.tables.write().await;
        tables.check_item_references(fields)?;
        let item = MenuItem {
            id: tables.next_id(),
            category_id: fields.category_id,
            subcategory_id: fields.subcategory_id,
            name_tr: fields.name_tr.clone(),
            name_en: fields.name_en.clone(),
            description_tr: fields.description_tr.clone(),
            description_en: fields.description_en.clone(),
            allergens_tr: fields.allergens_tr.clone(),
            allergens_en: fields.allergens_en.clone(),
            price: fields.price,
            image_url: fields.image_url.clone(),
            created_at: Utc::now(),
        };
        tables.menu_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_menu_item(&self, id: EntityId, fields: &MenuItemFields) -> Result<MenuItem, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.menu_items.contains_key(&id) {
            return Err(DomainError::not_found(EntityKind::MenuItem, id));
        }
        tables.check_item_references(fields)?;
        let item = tables
            .menu_items
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(EntityKind::MenuItem, id))?;
        item.category_id = fields.category_id;
        item.subcategory_id = fields.subcategory_id;
        item.name_tr = fields.name_tr.clone();
        item.name_en = fields.name_en.clone();
        item.description_tr = fields.description_tr.clone();
        item.description_en = fields.description_en.clone();
        item.allergens_tr = fields.allergens_tr.clone();
        item.allergens_en = fields.allergens_en.clone();
        item.price = fields.price;
        item.image_url = fields.image_url.clone();
        Ok(item.clone())
    }

    async fn delete_menu_item(&self, id: EntityId) -> Result<(), DomainError> {
        self.tables
            .write()
            .await
            .menu_items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(EntityKind::MenuItem, id))
    }

    async fn detach_subcategory_items(&self, subcategory_id: EntityId) -> Result<usize, DomainError> {
        let mut tables = self.tables.write().await;
        let mut detached = 0;
        for item in tables.menu_items.values_mut() {
            if item.subcategory_id == Some(subcategory_id) {
                item.subcategory_id = None;
                detached += 1;
            }
        }
        Ok(detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_increase_across_tables() {
        let store = InMemoryCatalogStore::new();
        let category = store
            .insert_category(&CategoryFields::new("Çorbalar", "Soups"), 0)
            .await
            .unwrap();
        let subcategory = store
            .insert_subcategory(category.id, &SubcategoryFields::new("Sıcak", "Hot"), 0)
            .await
            .unwrap();
        assert!(subcategory.id > category.id);
    }

    #[tokio::test]
    async fn test_subcategory_position_checks_group() {
        let store = InMemoryCatalogStore::new();
        let first = store
            .insert_category(&CategoryFields::new("A", ""), 0)
            .await
            .unwrap();
        let second = store
            .insert_category(&CategoryFields::new("B", ""), 1)
            .await
            .unwrap();
        let sub = store
            .insert_subcategory(first.id, &SubcategoryFields::new("X", ""), 0)
            .await
            .unwrap();

        let wrong_group = SiblingGroup::Subcategories {
            category_id: second.id,
        };
        let result = store.set_position(wrong_group, sub.id, 3).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_referenced_subcategory_cannot_be_deleted() {
        let store = InMemoryCatalogStore::new();
        let category = store
            .insert_category(&CategoryFields::new("Tatlılar", ""), 0)
            .await
            .unwrap();
        let sub = store
            .insert_subcategory(category.id, &SubcategoryFields::new("Sütlü", ""), 0)
            .await
            .unwrap();
        store
            .insert_menu_item(&MenuItemFields::new(category.id, "Sütlaç", "", 90.0).in_subcategory(sub.id))
            .await
            .unwrap();

        match store.delete_subcategory(sub.id).await {
            Err(DomainError::ValidationFailed(message)) => assert!(message.contains("still referenced")),
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
        assert_eq!(store.detach_subcategory_items(sub.id).await.unwrap(), 1);
        store.delete_subcategory(sub.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_name_sort_follows_turkish_alphabet() {
        let store = InMemoryCatalogStore::new();
        let category = store
            .insert_category(&CategoryFields::new("İçecekler", "Drinks"), 0)
            .await
            .unwrap();
        for name in ["Şalgam", "Ayran", "Çay", "Zeytin", "İçli Köfte", "Dondurma"] {
            store
                .insert_menu_item(&MenuItemFields::new(category.id, name, "", 40.0))
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_menu_items(&MenuItemFilter::default(), MenuItemSort::Name)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name_tr)
            .collect();
        assert_eq!(
            names,
            vec!["Ayran", "Çay", "Dondurma", "İçli Köfte", "Şalgam", "Zeytin"]
        );
    }
}

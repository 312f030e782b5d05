// ============================================================================
// Menu Core - Catalog Service
// File: crates/menu-core/src/services/catalog_service.rs
// ============================================================================
//! Admin-side catalog writes: creation, editing, deletion with dependents

use std::collections::HashSet;
use std::sync::Arc;

use menu_shared::{CategoryDeletePolicy, EntityId};
use tracing::{info, warn};

use crate::domain::{
    Category, CategoryFields, EntityRef, MenuItem, MenuItemFields, Subcategory, SubcategoryDraft,
    SubcategoryFields,
};
use crate::error::{DomainError, EntityKind};
use crate::repositories::{CatalogStore, MenuItemFilter, MenuItemSort, SiblingGroup};
use crate::services::OrderingService;
use crate::slug;

/// Coordinates multi-step catalog changes so references and sibling positions stay consistent.
pub struct CatalogService<S: CatalogStore + ?Sized> {
    store: Arc<S>,
    ordering: OrderingService<S>,
    delete_policy: CategoryDeletePolicy,
}

impl<S: CatalogStore + ?Sized> CatalogService<S> {
    pub fn new(store: Arc<S>, delete_policy: CategoryDeletePolicy) -> Self {
        Self {
            ordering: OrderingService::new(store.clone()),
            store,
            delete_policy,
        }
    }

    pub fn ordering(&self) -> &OrderingService<S> {
        &self.ordering
    }

    // ------------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------------

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.store.list_categories().await
    }

    pub async fn category(&self, id: EntityId) -> Result<Category, DomainError> {
        self.store
            .find_category(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Category, id))
    }

    pub async fn resolve_category(&self, slug: &str) -> Result<Category, DomainError> {
        self.category(slug::decode(slug)?).await
    }

    /// Appends a category at the end of the list.
    pub async fn create_category(&self, fields: CategoryFields) -> Result<Category, DomainError> {
        let fields = fields.validated()?;
        let position = self.store.list_categories().await?.len() as i32;
        let category = self.store.insert_category(&fields, position).await?;
        info!("Category created: {} ({})", category.id, category.name_tr);
        Ok(category)
    }

    /// Creates a category and its initial subcategories in list order.
    ///
    /// Blank subcategory rows are skipped. Every row is validated before anything is written.
    pub async fn create_category_with_subcategories(
        &self,
        fields: CategoryFields,
        subcategories: Vec<SubcategoryFields>,
    ) -> Result<(Category, Vec<Subcategory>), DomainError> {
        let fields = fields.validated()?;
        let subcategories = subcategories
            .into_iter()
            .filter(|s| !s.is_blank())
            .map(SubcategoryFields::validated)
            .collect::<Result<Vec<_>, _>>()?;

        let category = self.create_category(fields).await?;
        let mut created = Vec::with_capacity(subcategories.len());
        for (position, sub) in subcategories.iter().enumerate() {
            created.push(
                self.store
                    .insert_subcategory(category.id, sub, position as i32)
                    .await?,
            );
        }
        info!(
            "Category {} created with {} subcategories",
            category.id,
            created.len()
        );
        Ok((category, created))
    }

    pub async fn update_category(
        &self,
        id: EntityId,
        fields: CategoryFields,
    ) -> Result<Category, DomainError> {
        let fields = fields.validated()?;
        let category = self.store.update_category(id, &fields).await?;
        info!("Category updated: {}", id);
        Ok(category)
    }

    /// Deletes a category according to the configured policy, then closes the position gap.
    ///
    /// Menu items always block the delete; subcategories block it only under `Reject`.
    pub async fn delete_category(&self, id: EntityId) -> Result<(), DomainError> {
        self.category(id).await?;

        let subcategories = self.store.list_subcategories(Some(id)).await?;
        let items = self
            .store
            .count_menu_items(&MenuItemFilter::category(id))
            .await?;

        let blocked = match self.delete_policy {
            CategoryDeletePolicy::Reject => !subcategories.is_empty() || items > 0,
            CategoryDeletePolicy::Cascade => items > 0,
        };
        if blocked {
            warn!(
                "Category delete rejected: {} has {} subcategories and {} items",
                id,
                subcategories.len(),
                items
            );
            return Err(DomainError::HasDependents {
                entity: EntityKind::Category,
                id,
                subcategories: subcategories.len(),
                items,
            });
        }

        for sub in &subcategories {
            self.store.delete_subcategory(sub.id).await?;
        }
        self.store.delete_category(id).await?;
        let moved = self.ordering.renumber_categories().await?;
        info!(
            "Category deleted: {} (subcategories removed: {}, positions rewritten: {})",
            id,
            subcategories.len(),
            moved
        );
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Subcategories
    // ------------------------------------------------------------------------

    pub async fn list_subcategories(&self, category_id: EntityId) -> Result<Vec<Subcategory>, DomainError> {
        self.category(category_id).await?;
        self.store.list_subcategories(Some(category_id)).await
    }

    pub async fn subcategory(&self, id: EntityId) -> Result<Subcategory, DomainError> {
        self.store
            .find_subcategory(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Subcategory, id))
    }

    pub async fn resolve_subcategory(&self, slug: &str) -> Result<Subcategory, DomainError> {
        self.subcategory(slug::decode(slug)?).await
    }

    /// Appends a subcategory at the end of its category.
    pub async fn create_subcategory(
        &self,
        category_id: EntityId,
        fields: SubcategoryFields,
    ) -> Result<Subcategory, DomainError> {
        let fields = fields.validated()?;
        self.category(category_id).await?;
        let position = self.store.list_subcategories(Some(category_id)).await?.len() as i32;
        let subcategory = self
            .store
            .insert_subcategory(category_id, &fields, position)
            .await?;
        info!(
            "Subcategory created: {} in category {}",
            subcategory.id, category_id
        );
        Ok(subcategory)
    }

    pub async fn update_subcategory(
        &self,
        id: EntityId,
        fields: SubcategoryFields,
    ) -> Result<Subcategory, DomainError> {
        let fields = fields.validated()?;
        let subcategory = self.store.update_subcategory(id, &fields).await?;
        info!("Subcategory updated: {}", id);
        Ok(subcategory)
    }

    /// Detaches the subcategory's items, deletes it, then closes the position gap.
    ///
    /// Detached items stay in the parent category. Returns how many were detached.
    pub async fn delete_subcategory(&self, id: EntityId) -> Result<usize, DomainError> {
        let subcategory = self.subcategory(id).await?;

        let detached = self.store.detach_subcategory_items(id).await?;
        self.store.delete_subcategory(id).await?;
        self.ordering
            .renumber_subcategories(subcategory.category_id)
            .await?;
        info!(
            "Subcategory deleted: {} ({} items moved back to category {})",
            id, detached, subcategory.category_id
        );
        Ok(detached)
    }

    /// Saves the edited subcategory list of a category in one pass.
    ///
    /// The list must name every stored subcategory of the category exactly once; pending
    /// drafts are inserted and blank pending drafts are dropped. List position becomes `order`.
    pub async fn save_subcategory_drafts(
        &self,
        category_id: EntityId,
        drafts: Vec<SubcategoryDraft>,
    ) -> Result<Vec<Subcategory>, DomainError> {
        self.category(category_id).await?;
        let existing = self.store.list_subcategories(Some(category_id)).await?;
        let stored_ids: HashSet<EntityId> = existing.iter().map(|s| s.id).collect();

        let mut seen = HashSet::new();
        let mut planned = Vec::with_capacity(drafts.len());
        for draft in drafts {
            if draft.reference.is_pending() && draft.fields.is_blank() {
                continue;
            }
            if let Some(id) = draft.reference.persisted_id() {
                if !stored_ids.contains(&id) {
                    return Err(DomainError::ValidationFailed(format!(
                        "subcategory {} does not belong to category {}",
                        id, category_id
                    )));
                }
                if !seen.insert(id) {
                    return Err(DomainError::ValidationFailed(format!(
                        "subcategory {} listed more than once",
                        id
                    )));
                }
            }
            planned.push((draft.reference, draft.fields.validated()?));
        }
        if seen.len() != stored_ids.len() {
            return Err(DomainError::ValidationFailed(format!(
                "draft list omits {} stored subcategories of category {}",
                stored_ids.len() - seen.len(),
                category_id
            )));
        }

        let mut inserted = 0;
        for (position, (reference, fields)) in planned.iter().enumerate() {
            let position = position as i32;
            match reference {
                EntityRef::Persisted(id) => {
                    let updated = self.store.update_subcategory(*id, fields).await?;
                    if updated.order != position {
                        self.store
                            .set_position(
                                SiblingGroup::Subcategories { category_id },
                                *id,
                                position,
                            )
                            .await?;
                    }
                }
                EntityRef::Pending(_) => {
                    self.store
                        .insert_subcategory(category_id, fields, position)
                        .await?;
                    inserted += 1;
                }
            }
        }
        info!(
            "Subcategory drafts saved for category {}: {} rows, {} new",
            category_id,
            planned.len(),
            inserted
        );
        self.store.list_subcategories(Some(category_id)).await
    }

    // ------------------------------------------------------------------------
    // Menu items
    // ------------------------------------------------------------------------

    pub async fn list_menu_items(
        &self,
        filter: MenuItemFilter,
        sort: MenuItemSort,
    ) -> Result<Vec<MenuItem>, DomainError> {
        self.store.list_menu_items(&filter, sort).await
    }

    pub async fn menu_item(&self, id: EntityId) -> Result<MenuItem, DomainError> {
        self.store
            .find_menu_item(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::MenuItem, id))
    }

    pub async fn resolve_menu_item(&self, slug: &str) -> Result<MenuItem, DomainError> {
        self.menu_item(slug::decode(slug)?).await
    }

    pub async fn create_menu_item(&self, fields: MenuItemFields) -> Result<MenuItem, DomainError> {
        let fields = fields.validated()?;
        self.check_placement(&fields).await?;
        let item = self.store.insert_menu_item(&fields).await?;
        info!("Menu item created: {} in category {}", item.id, item.category_id);
        Ok(item)
    }

    pub async fn update_menu_item(
        &self,
        id: EntityId,
        fields: MenuItemFields,
    ) -> Result<MenuItem, DomainError> {
        let fields = fields.validated()?;
        self.check_placement(&fields).await?;
        let item = self.store.update_menu_item(id, &fields).await?;
        info!("Menu item updated: {}", id);
        Ok(item)
    }

    pub async fn delete_menu_item(&self, id: EntityId) -> Result<(), DomainError> {
        self.store.delete_menu_item(id).await?;
        info!("Menu item deleted: {}", id);
        Ok(())
    }

    /// The category must exist and an optional subcategory must belong to it.
    async fn check_placement(&self, fields: &MenuItemFields) -> Result<(), DomainError> {
        self.category(fields.category_id).await?;
        if let Some(subcategory_id) = fields.subcategory_id {
            let subcategory = self.subcategory(subcategory_id).await?;
            if subcategory.category_id != fields.category_id {
                warn!(
                    "Menu item placement rejected: subcategory {} belongs to category {}, not {}",
                    subcategory_id, subcategory.category_id, fields.category_id
                );
                return Err(DomainError::ValidationFailed(format!(
                    "subcategory {} does not belong to category {}",
                    subcategory_id, fields.category_id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockCatalogStore;
    use chrono::Utc;
    use mockall::predicate::{always, eq};

    fn category(id: EntityId, order: i32) -> Category {
        Category {
            id,
            name_tr: format!("Kategori {}", id),
            name_en: String::new(),
            image_url: None,
            order,
            created_at: Utc::now(),
        }
    }

    fn subcategory(id: EntityId, category_id: EntityId, order: i32) -> Subcategory {
        Subcategory {
            id,
            category_id,
            name_tr: format!("Alt {}", id),
            name_en: String::new(),
            description_tr: None,
            description_en: None,
            image_url: None,
            order,
            created_at: Utc::now(),
        }
    }

    fn service(store: MockCatalogStore, policy: CategoryDeletePolicy) -> CatalogService<MockCatalogStore> {
        CatalogService::new(Arc::new(store), policy)
    }

    #[tokio::test]
    async fn test_create_category_appends() {
        let mut store = MockCatalogStore::new();
        store
            .expect_list_categories()
            .returning(|| Ok(vec![category(1, 0), category(2, 1)]));
        store
            .expect_insert_category()
            .with(always(), eq(2))
            .times(1)
            .returning(|fields, order| {
                let mut created = category(3, order);
                created.name_tr = fields.name_tr.clone();
                Ok(created)
            });

        let created = service(store, CategoryDeletePolicy::Reject)
            .create_category(CategoryFields::new("  Tatlılar ", "Desserts"))
            .await
            .unwrap();
        assert_eq!(created.order, 2);
        assert_eq!(created.name_tr, "Tatlılar");
    }

    #[tokio::test]
    async fn test_create_category_requires_a_name() {
        let mut store = MockCatalogStore::new();
        store.expect_insert_category().never();

        let result = service(store, CategoryDeletePolicy::Reject)
            .create_category(CategoryFields::new(" ", ""))
            .await;
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_delete_category_rejected_with_subcategories() {
        let mut store = MockCatalogStore::new();
        store.expect_find_category().returning(|id| Ok(Some(category(id, 0))));
        store
            .expect_list_subcategories()
            .returning(|_| Ok(vec![subcategory(10, 1, 0)]));
        store.expect_count_menu_items().returning(|_| Ok(0));
        store.expect_delete_category().never();
        store.expect_delete_subcategory().never();

        let result = service(store, CategoryDeletePolicy::Reject)
            .delete_category(1)
            .await;
        assert!(matches!(
            result,
            Err(DomainError::HasDependents {
                subcategories: 1,
                items: 0,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_cascade_still_rejects_items() {
        let mut store = MockCatalogStore::new();
        store.expect_find_category().returning(|id| Ok(Some(category(id, 0))));
        store.expect_list_subcategories().returning(|_| Ok(Vec::new()));
        store.expect_count_menu_items().returning(|_| Ok(4));
        store.expect_delete_category().never();

        let result = service(store, CategoryDeletePolicy::Cascade)
            .delete_category(1)
            .await;
        assert!(matches!(
            result,
            Err(DomainError::HasDependents { items: 4, .. })
        ));
    }

    #[tokio::test]
    async fn test_cascade_removes_subcategories_and_renumbers() {
        let mut store = MockCatalogStore::new();
        store.expect_find_category().returning(|id| Ok(Some(category(id, 1))));
        store
            .expect_list_subcategories()
            .with(eq(Some(2)))
            .returning(|_| Ok(vec![subcategory(20, 2, 0), subcategory(21, 2, 1)]));
        store.expect_count_menu_items().returning(|_| Ok(0));
        store
            .expect_delete_subcategory()
            .times(2)
            .returning(|_| Ok(()));
        store
            .expect_delete_category()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_list_categories()
            .returning(|| Ok(vec![category(1, 0), category(3, 2)]));
        store
            .expect_set_position()
            .with(eq(SiblingGroup::Categories), eq(3), eq(1))
            .times(1)
            .returning(|_, _, _| Ok(()));

        service(store, CategoryDeletePolicy::Cascade)
            .delete_category(2)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_category() {
        let mut store = MockCatalogStore::new();
        store.expect_find_category().returning(|_| Ok(None));

        let result = service(store, CategoryDeletePolicy::Reject)
            .delete_category(99)
            .await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: EntityKind::Category,
                id: 99
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_subcategory_detaches_items_first() {
        let mut store = MockCatalogStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_find_subcategory()
            .returning(|id| Ok(Some(subcategory(id, 1, 0))));
        store
            .expect_detach_subcategory_items()
            .with(eq(10))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(3));
        store
            .expect_delete_subcategory()
            .with(eq(10))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_list_subcategories()
            .with(eq(Some(1)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![subcategory(11, 1, 1)]));
        store
            .expect_set_position()
            .with(eq(SiblingGroup::Subcategories { category_id: 1 }), eq(11), eq(0))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let detached = service(store, CategoryDeletePolicy::Reject)
            .delete_subcategory(10)
            .await
            .unwrap();
        assert_eq!(detached, 3);
    }

    #[tokio::test]
    async fn test_menu_item_subcategory_must_match_category() {
        let mut store = MockCatalogStore::new();
        store.expect_find_category().returning(|id| Ok(Some(category(id, 0))));
        store
            .expect_find_subcategory()
            .returning(|id| Ok(Some(subcategory(id, 2, 0))));
        store.expect_insert_menu_item().never();

        let fields = MenuItemFields::new(1, "Ayran", "Ayran", 30.0).in_subcategory(5);
        let result = service(store, CategoryDeletePolicy::Reject)
            .create_menu_item(fields)
            .await;
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_resolve_rejects_bad_slug_without_lookup() {
        let mut store = MockCatalogStore::new();
        store.expect_find_menu_item().never();

        let result = service(store, CategoryDeletePolicy::Reject)
            .resolve_menu_item("ayran")
            .await;
        assert!(matches!(result, Err(DomainError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn test_drafts_must_cover_stored_rows() {
        let mut store = MockCatalogStore::new();
        store.expect_find_category().returning(|id| Ok(Some(category(id, 0))));
        store
            .expect_list_subcategories()
            .returning(|_| Ok(vec![subcategory(10, 1, 0), subcategory(11, 1, 1)]));
        store.expect_update_subcategory().never();
        store.expect_insert_subcategory().never();

        let drafts = vec![SubcategoryDraft::persisted(10, SubcategoryFields::new("Sıcak", "Hot"))];
        let result = service(store, CategoryDeletePolicy::Reject)
            .save_subcategory_drafts(1, drafts)
            .await;
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }
}

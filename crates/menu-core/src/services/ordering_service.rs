// ============================================================================
// Menu Core - Ordering Service
// File: crates/menu-core/src/services/ordering_service.rs
// ============================================================================
//! Applies drag-and-drop moves and renumbering to the catalog store

use std::sync::Arc;

use menu_shared::EntityId;
use tracing::{debug, error, info};

use crate::domain::{Category, Subcategory};
use crate::error::{DomainError, EntityKind};
use crate::ordering::{self, Ordered, PositionUpdate};
use crate::repositories::{CatalogStore, SiblingGroup};

/// Persists sibling positions one write at a time.
///
/// Writes are not atomic across a group. When one fails the remaining writes are
/// skipped and the error is returned; callers must re-read the group from the store
/// instead of trusting what they hold locally.
pub struct OrderingService<S: CatalogStore + ?Sized> {
    store: Arc<S>,
}

impl<S: CatalogStore + ?Sized> OrderingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Moves a category and returns the stored order afterwards.
    pub async fn reorder_categories(
        &self,
        moved_id: EntityId,
        from_index: i64,
        to_index: i64,
    ) -> Result<Vec<Category>, DomainError> {
        let current = self.store.list_categories().await?;
        let updates = plan_move(&current, moved_id, from_index, to_index)?;
        if updates.is_empty() {
            return Ok(current);
        }

        self.apply(SiblingGroup::Categories, &updates).await?;
        info!("Moved category {} from {} to {}", moved_id, from_index, to_index);
        self.store.list_categories().await
    }

    /// Moves a subcategory within its category and returns the stored order afterwards.
    pub async fn reorder_subcategories(
        &self,
        category_id: EntityId,
        moved_id: EntityId,
        from_index: i64,
        to_index: i64,
    ) -> Result<Vec<Subcategory>, DomainError> {
        if self.store.find_category(category_id).await?.is_none() {
            return Err(DomainError::not_found(EntityKind::Category, category_id));
        }

        let current = self.store.list_subcategories(Some(category_id)).await?;
        let updates = plan_move(&current, moved_id, from_index, to_index)?;
        if updates.is_empty() {
            return Ok(current);
        }

        self.apply(SiblingGroup::Subcategories { category_id }, &updates)
            .await?;
        info!(
            "Moved subcategory {} of category {} from {} to {}",
            moved_id, category_id, from_index, to_index
        );
        self.store.list_subcategories(Some(category_id)).await
    }

    /// Restores `0..n` positions across all categories. Returns the number of writes.
    pub async fn renumber_categories(&self) -> Result<usize, DomainError> {
        let current = self.store.list_categories().await?;
        let updates = ordering::renumber(&current);
        self.apply(SiblingGroup::Categories, &updates).await?;
        Ok(updates.len())
    }

    /// Restores `0..n` positions across one category's subcategories. Returns the number of writes.
    pub async fn renumber_subcategories(&self, category_id: EntityId) -> Result<usize, DomainError> {
        let current = self.store.list_subcategories(Some(category_id)).await?;
        let updates = ordering::renumber(&current);
        self.apply(SiblingGroup::Subcategories { category_id }, &updates)
            .await?;
        Ok(updates.len())
    }

    pub(crate) async fn apply(
        &self,
        group: SiblingGroup,
        updates: &[PositionUpdate],
    ) -> Result<(), DomainError> {
        for (applied, update) in updates.iter().enumerate() {
            if let Err(e) = self.store.set_position(group, update.id, update.position).await {
                error!(
                    "Position update aborted for {:?} after {} of {} writes: {}",
                    group,
                    applied,
                    updates.len(),
                    e
                );
                return Err(e);
            }
        }
        debug!("Applied {} position updates to {:?}", updates.len(), group);
        Ok(())
    }
}

/// Validates the move against the stored group and computes the writes needed.
fn plan_move<T: Ordered + Clone>(
    siblings: &[T],
    moved_id: EntityId,
    from_index: i64,
    to_index: i64,
) -> Result<Vec<PositionUpdate>, DomainError> {
    let (from, to) = match (usize::try_from(from_index), usize::try_from(to_index)) {
        (Ok(from), Ok(to)) => (from, to),
        _ => {
            return Err(DomainError::InvalidReorder {
                moved_id,
                from_index,
                to_index,
                len: siblings.len(),
            })
        }
    };

    let mut sorted = siblings.to_vec();
    ordering::sort_siblings(&mut sorted);
    let ids: Vec<EntityId> = sorted.iter().map(Ordered::id).collect();

    let next = ordering::move_entry(&ids, moved_id, from, to)?;
    if from_index == to_index {
        return Ok(Vec::new());
    }
    Ok(ordering::dense_updates(&next, &sorted))
}

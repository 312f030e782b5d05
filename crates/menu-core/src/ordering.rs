//! Ordering engine: positions of siblings after a drag-and-drop move.
//!
//! A sibling group is every category, or every subcategory of one category.
//! After applying the updates computed here the group's `order` values are
//! exactly `0..n` with no duplicates.

use menu_shared::EntityId;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Subcategory};
use crate::error::DomainError;

/// New position for one sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub id: EntityId,
    pub position: i32,
}

/// Rows that take part in a sibling ordering.
pub trait Ordered {
    fn id(&self) -> EntityId;
    fn order(&self) -> i32;
}

impl Ordered for Category {
    fn id(&self) -> EntityId {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }
}

impl Ordered for Subcategory {
    fn id(&self) -> EntityId {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }
}

/// Sorts by `order`, ties broken by id, so duplicate or missing positions still render.
pub fn sort_siblings<T: Ordered>(siblings: &mut [T]) {
    siblings.sort_by_key(|s| (s.order(), s.id()));
}

/// Moves `moved_id` from `from_index` to `to_index` and returns the resulting sequence.
pub fn move_entry(
    current: &[EntityId],
    moved_id: EntityId,
    from_index: usize,
    to_index: usize,
) -> Result<Vec<EntityId>, DomainError> {
    let len = current.len();
    if from_index >= len || to_index >= len || current[from_index] != moved_id {
        return Err(DomainError::InvalidReorder {
            moved_id,
            from_index: from_index as i64,
            to_index: to_index as i64,
            len,
        });
    }

    let mut next = current.to_vec();
    let entry = next.remove(from_index);
    next.insert(to_index, entry);
    Ok(next)
}

/// Position updates for a move within `current`, which is the full group in position order.
///
/// Only siblings whose index changed are returned; a move onto itself returns nothing.
pub fn reorder(
    current: &[EntityId],
    moved_id: EntityId,
    from_index: usize,
    to_index: usize,
) -> Result<Vec<PositionUpdate>, DomainError> {
    let next = move_entry(current, moved_id, from_index, to_index)?;
    Ok(next
        .iter()
        .enumerate()
        .filter(|(index, id)| current[*index] != **id)
        .map(|(index, id)| PositionUpdate {
            id: *id,
            position: index as i32,
        })
        .collect())
}

/// Updates that bring `sequence` to dense positions, given what each sibling stores now.
pub fn dense_updates<T: Ordered>(sequence: &[EntityId], stored: &[T]) -> Vec<PositionUpdate> {
    sequence
        .iter()
        .enumerate()
        .filter(|(index, id)| {
            stored
                .iter()
                .find(|s| s.id() == **id)
                .map_or(true, |s| s.order() != *index as i32)
        })
        .map(|(index, id)| PositionUpdate {
            id: *id,
            position: index as i32,
        })
        .collect()
}

/// Updates that close gaps and resolve duplicates while keeping the current display order.
pub fn renumber<T: Ordered + Clone>(siblings: &[T]) -> Vec<PositionUpdate> {
    let mut sorted = siblings.to_vec();
    sort_siblings(&mut sorted);
    let sequence: Vec<EntityId> = sorted.iter().map(Ordered::id).collect();
    dense_updates(&sequence, siblings)
}

/// True when the positions are exactly `0..n` in some arrangement.
pub fn is_dense(orders: &[i32]) -> bool {
    let mut sorted = orders.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(index, order)| *order == index as i32)
}

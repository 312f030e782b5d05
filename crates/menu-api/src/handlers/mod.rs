//! HTTP handlers

pub mod categories;
pub mod health;
pub mod menu;
pub mod menu_items;
pub mod subcategories;

use menu_core::domain::{Category, MenuItem, Subcategory};
use menu_shared::EntityId;
use serde::{Deserialize, Serialize};

/// A stored row plus the slug clients use to address it.
#[derive(Debug, Serialize)]
pub struct Slugged<T: Serialize> {
    #[serde(flatten)]
    pub record: T,
    pub slug: String,
}

impl From<Category> for Slugged<Category> {
    fn from(record: Category) -> Self {
        Self {
            slug: record.slug(),
            record,
        }
    }
}

impl From<Subcategory> for Slugged<Subcategory> {
    fn from(record: Subcategory) -> Self {
        Self {
            slug: record.slug(),
            record,
        }
    }
}

impl From<MenuItem> for Slugged<MenuItem> {
    fn from(record: MenuItem) -> Self {
        Self {
            slug: record.slug(),
            record,
        }
    }
}

pub(crate) fn slugged<T>(records: Vec<T>) -> Vec<Slugged<T>>
where
    T: Serialize,
    Slugged<T>: From<T>,
{
    records.into_iter().map(Into::into).collect()
}

/// Drag-and-drop move within a sibling list. Negative indices are rejected as invalid reorders.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub moved_id: EntityId,
    pub from_index: i64,
    pub to_index: i64,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detached_items: Option<usize>,
}

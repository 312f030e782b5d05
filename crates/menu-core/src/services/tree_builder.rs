//! Catalog tree assembly for the admin dashboard and the public menu.

use std::collections::HashMap;
use std::sync::Arc;

use menu_shared::EntityId;
use tracing::{debug, warn};

use crate::domain::{Category, CategoryNode, MenuItem, Subcategory, SubcategoryNode};
use crate::error::DomainError;
use crate::ordering;
use crate::repositories::{CatalogStore, MenuItemFilter, MenuItemSort};

/// Groups flat rows into a two-level tree.
///
/// Categories and each category's subcategories come out sorted by `order` then id,
/// so duplicate or sparse positions still render deterministically. Subcategories
/// whose category is missing are dropped.
pub fn build_tree(
    mut categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    items: &[MenuItem],
) -> Vec<CategoryNode> {
    ordering::sort_siblings(&mut categories);

    let mut category_counts: HashMap<EntityId, usize> = HashMap::new();
    let mut subcategory_counts: HashMap<EntityId, usize> = HashMap::new();
    for item in items {
        *category_counts.entry(item.category_id).or_default() += 1;
        if let Some(subcategory_id) = item.subcategory_id {
            *subcategory_counts.entry(subcategory_id).or_default() += 1;
        }
    }

    let mut grouped: HashMap<EntityId, Vec<Subcategory>> = HashMap::new();
    for sub in subcategories {
        grouped.entry(sub.category_id).or_default().push(sub);
    }

    let mut nodes = Vec::with_capacity(categories.len());
    for category in categories {
        let mut children = grouped.remove(&category.id).unwrap_or_default();
        ordering::sort_siblings(&mut children);

        let subcategories = children
            .into_iter()
            .map(|subcategory| SubcategoryNode {
                slug: subcategory.slug(),
                item_count: subcategory_counts.get(&subcategory.id).copied().unwrap_or(0),
                subcategory,
            })
            .collect();

        nodes.push(CategoryNode {
            slug: category.slug(),
            item_count: category_counts.get(&category.id).copied().unwrap_or(0),
            subcategories,
            category,
        });
    }

    for (category_id, orphans) in &grouped {
        warn!(
            "Skipping {} subcategories of missing category {}",
            orphans.len(),
            category_id
        );
    }
    nodes
}

/// Loads the catalog from the store and builds the tree.
pub struct TreeBuilder<S: CatalogStore + ?Sized> {
    store: Arc<S>,
}

impl<S: CatalogStore + ?Sized> TreeBuilder<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn build(&self) -> Result<Vec<CategoryNode>, DomainError> {
        let categories = self.store.list_categories().await?;
        let subcategories = self.store.list_subcategories(None).await?;
        let items = self
            .store
            .list_menu_items(&MenuItemFilter::all(), MenuItemSort::CreatedAt)
            .await?;

        let tree = build_tree(categories, subcategories, &items);
        debug!("Catalog tree built: {} categories, {} items", tree.len(), items.len());
        Ok(tree)
    }
}

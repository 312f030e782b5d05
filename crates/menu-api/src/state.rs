//! Shared handler state

use std::sync::Arc;

use menu_core::repositories::CatalogStore;
use menu_core::services::{CatalogService, MenuService, TreeBuilder};
use menu_shared::CategoryDeletePolicy;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService<dyn CatalogStore>>,
    pub tree: Arc<TreeBuilder<dyn CatalogStore>>,
    pub menu: Arc<MenuService<dyn CatalogStore>>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, delete_policy: CategoryDeletePolicy) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(store.clone(), delete_policy)),
            tree: Arc::new(TreeBuilder::new(store.clone())),
            menu: Arc::new(MenuService::new(store)),
        }
    }
}

//! Repository traits (ports)

pub mod catalog_store;

pub use catalog_store::{CatalogStore, MenuItemFilter, MenuItemSort, SiblingGroup};

#[cfg(test)]
pub use catalog_store::MockCatalogStore;

//! Domain services (business logic)

pub mod catalog_service;
pub mod menu_service;
pub mod ordering_service;
pub mod tree_builder;

pub use catalog_service::CatalogService;
pub use menu_service::{CategoryPage, HomePage, ItemPage, MenuService};
pub use ordering_service::OrderingService;
pub use tree_builder::{build_tree, TreeBuilder};

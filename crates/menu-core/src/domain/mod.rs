//! # Menu Core - Domain Module
//! 
//! Catalog entities: categories, subcategories, menu items, and their read models.

pub mod bilingual;
pub mod category;
pub mod subcategory;
pub mod menu_item;
pub mod draft;
pub mod tree;

// Re-export all entities
pub use bilingual::{localized, Bilingual};
pub use category::{Category, CategoryFields};
pub use subcategory::{Subcategory, SubcategoryFields};
pub use menu_item::{MenuItem, MenuItemFields};
pub use draft::{ClientTempId, EntityRef, SubcategoryDraft};
pub use tree::{CategoryNode, SubcategoryNode};

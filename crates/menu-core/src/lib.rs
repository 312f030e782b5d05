//! # Menu Core
//! 
//! Catalog entities, the slug codec, the ordering engine, the catalog store port,
//! and the services that keep categories, subcategories, and menu items consistent.

pub mod domain;
pub mod slug;
pub mod collation;
pub mod ordering;
pub mod repositories;
pub mod services;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;

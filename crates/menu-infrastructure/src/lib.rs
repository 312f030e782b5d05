//! # Menu Infrastructure
//! 
//! Catalog store implementations (adapters): PostgreSQL and in-memory.

pub mod database;
pub mod memory;

pub use database::{create_pool, run_migrations, PgCatalogStore};
pub use memory::InMemoryCatalogStore;

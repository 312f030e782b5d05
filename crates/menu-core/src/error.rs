//! Domain errors

use std::fmt;

use menu_shared::EntityId;
use thiserror::Error;

/// Catalog table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    Subcategory,
    MenuItem,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Subcategory => "subcategory",
            EntityKind::MenuItem => "menu item",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid identifier: {0:?} has no trailing numeric id")]
    InvalidIdentifier(String),

    #[error("Invalid reorder: cannot move {moved_id} from index {from_index} to {to_index} in a group of {len}")]
    InvalidReorder {
        moved_id: EntityId,
        from_index: i64,
        to_index: i64,
        len: usize,
    },

    #[error("Cannot delete {entity} {id}: {subcategories} subcategories and {items} menu items still reference it")]
    HasDependents {
        entity: EntityKind,
        id: EntityId,
        subcategories: usize,
        items: usize,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: EntityId },

    #[error("Validation error: {0}")]
    ValidationFailed(String),

    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: EntityId) -> Self {
        DomainError::NotFound { entity, id }
    }

    /// Stable machine-readable code, one per error kind.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            DomainError::InvalidReorder { .. } => "INVALID_REORDER",
            DomainError::HasDependents { .. } => "HAS_DEPENDENTS",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::ValidationFailed(_) => "VALIDATION_FAILED",
            DomainError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationFailed(errors.to_string())
    }
}

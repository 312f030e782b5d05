// ============================================================================
// Menu Core - Category Entity
// File: crates/menu-core/src/domain/category.rs
// Description: Top level of the catalog tree
// ============================================================================

use chrono::{DateTime, Utc};
use menu_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::bilingual::{ensure_named, trim_optional, Bilingual};
use crate::error::DomainError;
use crate::slug;

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name_tr: String,
    pub name_en: String,
    pub image_url: Option<String>,
    /// Position among all categories, dense and zero-based.
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn slug(&self) -> String {
        slug::encode(self.slug_name(), self.id)
    }
}

impl Bilingual for Category {
    fn name_tr(&self) -> &str {
        &self.name_tr
    }

    fn name_en(&self) -> &str {
        &self.name_en
    }
}

/// Editable category fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryFields {
    #[serde(default)]
    #[validate(length(max = 100, message = "Turkish name must be at most 100 characters"))]
    pub name_tr: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "English name must be at most 100 characters"))]
    pub name_en: String,

    #[serde(default)]
    #[validate(length(max = 2048, message = "Image URL too long"))]
    pub image_url: Option<String>,
}

impl CategoryFields {
    pub fn new(name_tr: impl Into<String>, name_en: impl Into<String>) -> Self {
        Self {
            name_tr: name_tr.into(),
            name_en: name_en.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Trims every field and checks lengths plus the bilingual name rule.
    pub fn validated(self) -> Result<Self, DomainError> {
        let fields = Self {
            name_tr: self.name_tr.trim().to_string(),
            name_en: self.name_en.trim().to_string(),
            image_url: trim_optional(self.image_url),
        };
        fields.validate()?;
        ensure_named(&fields.name_tr, &fields.name_en)?;
        Ok(fields)
    }
}

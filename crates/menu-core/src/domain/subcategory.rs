// ============================================================================
// Menu Core - Subcategory Entity
// File: crates/menu-core/src/domain/subcategory.rs
// Description: Second level of the catalog tree, owned by one category
// ============================================================================

use chrono::{DateTime, Utc};
use menu_shared::{EntityId, Locale};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::bilingual::{ensure_named, localized, trim_optional, Bilingual};
use crate::error::DomainError;
use crate::slug;

/// Subcategory entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: EntityId,
    /// Owning category. Never changes after creation.
    pub category_id: EntityId,
    pub name_tr: String,
    pub name_en: String,
    pub description_tr: Option<String>,
    pub description_en: Option<String>,
    pub image_url: Option<String>,
    /// Position among the subcategories of `category_id`, dense and zero-based.
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl Subcategory {
    pub fn slug(&self) -> String {
        slug::encode(self.slug_name(), self.id)
    }

    pub fn description(&self, locale: Locale) -> Option<&str> {
        let text = localized(
            self.description_tr.as_deref().unwrap_or(""),
            self.description_en.as_deref().unwrap_or(""),
            locale,
        );
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl Bilingual for Subcategory {
    fn name_tr(&self) -> &str {
        &self.name_tr
    }

    fn name_en(&self) -> &str {
        &self.name_en
    }
}

/// Editable subcategory fields. The parent category is passed separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SubcategoryFields {
    #[serde(default)]
    #[validate(length(max = 100, message = "Turkish name must be at most 100 characters"))]
    pub name_tr: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "English name must be at most 100 characters"))]
    pub name_en: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description_tr: Option<String>,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description too long"))]
    pub description_en: Option<String>,

    #[serde(default)]
    #[validate(length(max = 2048, message = "Image URL too long"))]
    pub image_url: Option<String>,
}

impl SubcategoryFields {
    pub fn new(name_tr: impl Into<String>, name_en: impl Into<String>) -> Self {
        Self {
            name_tr: name_tr.into(),
            name_en: name_en.into(),
            ..Default::default()
        }
    }

    pub fn with_description(
        mut self,
        description_tr: impl Into<String>,
        description_en: impl Into<String>,
    ) -> Self {
        self.description_tr = Some(description_tr.into());
        self.description_en = Some(description_en.into());
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.name_tr.trim().is_empty() && self.name_en.trim().is_empty()
    }

    pub fn validated(self) -> Result<Self, DomainError> {
        let fields = Self {
            name_tr: self.name_tr.trim().to_string(),
            name_en: self.name_en.trim().to_string(),
            description_tr: trim_optional(self.description_tr),
            description_en: trim_optional(self.description_en),
            image_url: trim_optional(self.image_url),
        };
        fields.validate()?;
        ensure_named(&fields.name_tr, &fields.name_en)?;
        Ok(fields)
    }
}

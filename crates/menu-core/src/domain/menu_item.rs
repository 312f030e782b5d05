// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Priced dish or drink listed under a category
// ============================================================================

use chrono::{DateTime, Utc};
use menu_shared::{EntityId, Locale};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::bilingual::{ensure_named, localized, trim_optional, Bilingual};
use crate::error::DomainError;
use crate::slug;

/// Menu item entity. Items carry no `order`; lists sort by name or creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: EntityId,
    pub category_id: EntityId,
    /// When set, belongs to `category_id`.
    pub subcategory_id: Option<EntityId>,
    pub name_tr: String,
    pub name_en: String,
    pub description_tr: Option<String>,
    pub description_en: Option<String>,
    pub allergens_tr: Option<String>,
    pub allergens_en: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MenuItem {
    pub fn slug(&self) -> String {
        slug::encode(self.slug_name(), self.id)
    }

    pub fn description(&self, locale: Locale) -> Option<&str> {
        optional_localized(&self.description_tr, &self.description_en, locale)
    }

    pub fn allergens(&self, locale: Locale) -> Option<&str> {
        optional_localized(&self.allergens_tr, &self.allergens_en, locale)
    }
}

impl Bilingual for MenuItem {
    fn name_tr(&self) -> &str {
        &self.name_tr
    }

    fn name_en(&self) -> &str {
        &self.name_en
    }
}

fn optional_localized<'a>(
    tr: &'a Option<String>,
    en: &'a Option<String>,
    locale: Locale,
) -> Option<&'a str> {
    let text = localized(
        tr.as_deref().unwrap_or(""),
        en.as_deref().unwrap_or(""),
        locale,
    );
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Editable menu item fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MenuItemFields {
    pub category_id: EntityId,

    #[serde(default)]
    pub subcategory_id: Option<EntityId>,

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
    #[validate(length(max = 500, message = "Allergen text too long"))]
    pub allergens_tr: Option<String>,

    #[serde(default)]
    #[validate(length(max = 500, message = "Allergen text too long"))]
    pub allergens_en: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[serde(default)]
    #[validate(length(max = 2048, message = "Image URL too long"))]
    pub image_url: Option<String>,
}

impl MenuItemFields {
    pub fn new(
        category_id: EntityId,
        name_tr: impl Into<String>,
        name_en: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            category_id,
            name_tr: name_tr.into(),
            name_en: name_en.into(),
            price,
            ..Default::default()
        }
    }

    pub fn in_subcategory(mut self, subcategory_id: EntityId) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }

    pub fn with_allergens(
        mut self,
        allergens_tr: impl Into<String>,
        allergens_en: impl Into<String>,
    ) -> Self {
        self.allergens_tr = Some(allergens_tr.into());
        self.allergens_en = Some(allergens_en.into());
        self
    }

    pub fn validated(self) -> Result<Self, DomainError> {
        if !self.price.is_finite() {
            return Err(DomainError::ValidationFailed(
                "price must be a finite number".to_string(),
            ));
        }
        let fields = Self {
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            name_tr: self.name_tr.trim().to_string(),
            name_en: self.name_en.trim().to_string(),
            description_tr: trim_optional(self.description_tr),
            description_en: trim_optional(self.description_en),
            allergens_tr: trim_optional(self.allergens_tr),
            allergens_en: trim_optional(self.allergens_en),
            price: self.price,
            image_url: trim_optional(self.image_url),
        };
        fields.validate()?;
        ensure_named(&fields.name_tr, &fields.name_en)?;
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let result = MenuItemFields::new(1, "Mercimek Çorbası", "Lentil Soup", -1.0).validated();
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[test]
    fn test_nan_price_rejected() {
        let result = MenuItemFields::new(1, "Mercimek Çorbası", "", f64::NAN).validated();
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[test]
    fn test_zero_price_allowed() {
        let fields = MenuItemFields::new(1, "Su", "Water", 0.0)
            .with_allergens("", "none")
            .validated()
            .unwrap();
        assert_eq!(fields.price, 0.0);
        assert!(fields.allergens_tr.is_none());
    }

    #[test]
    fn test_allergen_fallback() {
        let item = MenuItem {
            id: 9,
            category_id: 1,
            subcategory_id: None,
            name_tr: "Baklava".to_string(),
            name_en: String::new(),
            description_tr: None,
            description_en: None,
            allergens_tr: Some("Fıstık".to_string()),
            allergens_en: None,
            price: 120.0,
            image_url: None,
            created_at: Utc::now(),
        };
        assert_eq!(item.allergens(Locale::En), Some("Fıstık"));
        assert_eq!(item.description(Locale::Tr), None);
        assert_eq!(item.name(Locale::En), "Baklava");
        assert_eq!(item.slug(), "baklava-9");
    }
}

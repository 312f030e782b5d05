//! Turkish/English text pairs with fallback to the other language.

use menu_shared::Locale;

use crate::error::DomainError;

/// Picks the text for `locale`, falling back to the other language when that side is blank.
pub fn localized<'a>(tr: &'a str, en: &'a str, locale: Locale) -> &'a str {
    let side = |locale: Locale| match locale {
        Locale::Tr => tr,
        Locale::En => en,
    };
    let wanted = side(locale);
    if wanted.trim().is_empty() {
        side(locale.fallback())
    } else {
        wanted
    }
}

/// Entities with a bilingual display name.
pub trait Bilingual {
    fn name_tr(&self) -> &str;
    fn name_en(&self) -> &str;

    fn name(&self, locale: Locale) -> &str {
        localized(self.name_tr(), self.name_en(), locale)
    }

    /// Name used to build slugs: Turkish first, then English.
    fn slug_name(&self) -> Option<&str> {
        let name = self.name(Locale::Tr);
        if name.trim().is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// One side may be blank; both blank is rejected.
pub(crate) fn ensure_named(name_tr: &str, name_en: &str) -> Result<(), DomainError> {
    if name_tr.trim().is_empty() && name_en.trim().is_empty() {
        return Err(DomainError::ValidationFailed(
            "name_tr and name_en cannot both be empty".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_fallback() {
        assert_eq!(localized("Çorbalar", "Soups", Locale::Tr), "Çorbalar");
        assert_eq!(localized("Çorbalar", "Soups", Locale::En), "Soups");
        assert_eq!(localized("Çorbalar", "  ", Locale::En), "Çorbalar");
        assert_eq!(localized("", "Soups", Locale::Tr), "Soups");
    }

    #[test]
    fn test_ensure_named() {
        assert!(ensure_named("Tatlılar", "").is_ok());
        assert!(ensure_named("", "Desserts").is_ok());
        assert!(matches!(
            ensure_named(" ", ""),
            Err(DomainError::ValidationFailed(_))
        ));
    }
}

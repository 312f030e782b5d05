//! URL slugs of the form `<normalized-name>-<id>`.
//!
//! The trailing id is authoritative; the name part is decoration and is never
//! looked up. Two rows with the same name still get distinct slugs through their ids.

use menu_shared::EntityId;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DomainError;

/// Name part used when there is no usable name.
pub const SLUG_PLACEHOLDER: &str = "item";

const TRANSLITERATIONS: &[(char, &str)] = &[
    ('ğ', "g"),
    ('ü', "u"),
    ('ş', "s"),
    ('ı', "i"),
    ('ö', "o"),
    ('ç', "c"),
    ('â', "a"),
    ('î', "i"),
    ('û', "u"),
    ('Ğ', "g"),
    ('Ü', "u"),
    ('Ş', "s"),
    ('İ', "i"),
    ('Ö', "o"),
    ('Ç', "c"),
    ('Â', "a"),
    ('Î', "i"),
    ('Û', "u"),
];

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("disallowed-character pattern is valid"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("hyphen pattern is valid"));

/// Builds the slug for `id`. Ids are storage keys and therefore non-negative.
pub fn encode(name: Option<&str>, id: EntityId) -> String {
    let base = name.map(normalize).unwrap_or_default();
    if base.is_empty() {
        format!("{}-{}", SLUG_PLACEHOLDER, id)
    } else {
        format!("{}-{}", base, id)
    }
}

/// Recovers the id from the segment after the last hyphen, or from a bare number.
pub fn decode(slug: &str) -> Result<EntityId, DomainError> {
    let tail = slug.rsplit('-').next().unwrap_or(slug);
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidIdentifier(slug.to_string()));
    }
    tail.parse::<EntityId>()
        .map_err(|_| DomainError::InvalidIdentifier(slug.to_string()))
}

fn normalize(name: &str) -> String {
    let mut transliterated = String::with_capacity(name.len());
    for ch in name.chars() {
        match TRANSLITERATIONS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => transliterated.push_str(to),
            None => transliterated.push(ch),
        }
    }

    let lowered = transliterated.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(stripped.trim(), "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

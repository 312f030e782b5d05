//! Client-side drafts of rows that may not exist in the store yet.

use menu_shared::EntityId;
use serde::{Deserialize, Serialize};

use super::subcategory::SubcategoryFields;

/// Temporary id the admin client assigns before a row is inserted.
pub type ClientTempId = u64;

/// Identity of a row the client is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// Not inserted yet.
    Pending(ClientTempId),
    /// Stored under this id.
    Persisted(EntityId),
}

impl EntityRef {
    pub fn persisted_id(&self) -> Option<EntityId> {
        match self {
            EntityRef::Persisted(id) => Some(*id),
            EntityRef::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EntityRef::Pending(_))
    }
}

/// One row of the subcategory editor, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryDraft {
    pub reference: EntityRef,
    #[serde(flatten)]
    pub fields: SubcategoryFields,
}

impl SubcategoryDraft {
    pub fn pending(temp_id: ClientTempId, fields: SubcategoryFields) -> Self {
        Self {
            reference: EntityRef::Pending(temp_id),
            fields,
        }
    }

    pub fn persisted(id: EntityId, fields: SubcategoryFields) -> Self {
        Self {
            reference: EntityRef::Persisted(id),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_wire_format() {
        let draft = SubcategoryDraft::pending(17, SubcategoryFields::new("Çaylar", "Teas"));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["reference"]["state"], "pending");
        assert_eq!(json["reference"]["id"], 17);
        assert_eq!(json["name_tr"], "Çaylar");

        let parsed: SubcategoryDraft = serde_json::from_str(
            r#"{"reference":{"state":"persisted","id":5},"name_tr":"","name_en":"Coffee"}"#,
        )
        .unwrap();
        assert_eq!(parsed.reference, EntityRef::Persisted(5));
        assert_eq!(parsed.fields.name_en, "Coffee");
    }

    #[test]
    fn test_persisted_id() {
        assert_eq!(EntityRef::Persisted(4).persisted_id(), Some(4));
        assert_eq!(EntityRef::Pending(4).persisted_id(), None);
        assert!(EntityRef::Pending(4).is_pending());
    }
}

//! Entity categories and generator families.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node category. The serialized form is the short wire tag that prefixes
/// every node identifier (`st-3-1`, `fr-3-1-2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "uni")]
    University,
    #[serde(rename = "st")]
    Student,
    #[serde(rename = "fr")]
    Friend,
    #[serde(rename = "pr")]
    Progenitor,
    #[serde(rename = "kid")]
    Kid,
    #[serde(rename = "lkid")]
    LastKid,
    #[serde(rename = "ho")]
    Hobby,
    #[serde(rename = "it")]
    Item,
    #[serde(rename = "attr")]
    Attribute,
    #[serde(rename = "user")]
    User,
}

impl EntityType {
    /// Short wire tag used as the identifier prefix.
    pub fn tag(self) -> &'static str {
        match self {
            EntityType::University => "uni",
            EntityType::Student => "st",
            EntityType::Friend => "fr",
            EntityType::Progenitor => "pr",
            EntityType::Kid => "kid",
            EntityType::LastKid => "lkid",
            EntityType::Hobby => "ho",
            EntityType::Item => "it",
            EntityType::Attribute => "attr",
            EntityType::User => "user",
        }
    }

    /// Resolve a wire tag back to its category.
    pub fn from_tag(tag: &str) -> Result<Self, ModelError> {
        Ok(match tag {
            "uni" => EntityType::University,
            "st" => EntityType::Student,
            "fr" => EntityType::Friend,
            "pr" => EntityType::Progenitor,
            "kid" => EntityType::Kid,
            "lkid" => EntityType::LastKid,
            "ho" => EntityType::Hobby,
            "it" => EntityType::Item,
            "attr" => EntityType::Attribute,
            "user" => EntityType::User,
            _ => {
                return Err(ModelError::UnknownTag {
                    tag: tag.to_string(),
                })
            }
        })
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The three dataset families. Each family recognizes its own subset of
/// entity categories; asking a family's allocator for a foreign category is
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratorFamily {
    Fruni,
    Ftree,
    UserItemAttr,
}

impl GeneratorFamily {
    /// Identifier path arity for `category` within this family, or `None`
    /// when the family does not know the category at all.
    ///
    /// Arity 0 means the allocator supplies the single path component itself
    /// (the running per-category count).
    pub fn arity(self, category: EntityType) -> Option<usize> {
        match (self, category) {
            (GeneratorFamily::Fruni, EntityType::University) => Some(1),
            (GeneratorFamily::Fruni, EntityType::Student) => Some(2),
            (GeneratorFamily::Fruni, EntityType::Friend) => Some(3),
            (GeneratorFamily::Ftree, EntityType::Progenitor) => Some(1),
            (GeneratorFamily::Ftree, EntityType::Kid) => Some(3),
            (GeneratorFamily::Ftree, EntityType::LastKid) => Some(2),
            (GeneratorFamily::Ftree, EntityType::Hobby) => Some(2),
            (GeneratorFamily::UserItemAttr, EntityType::Item) => Some(0),
            (GeneratorFamily::UserItemAttr, EntityType::Attribute) => Some(0),
            (GeneratorFamily::UserItemAttr, EntityType::User) => Some(0),
            _ => None,
        }
    }
}

impl fmt::Display for GeneratorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorFamily::Fruni => "fruni",
            GeneratorFamily::Ftree => "ftree",
            GeneratorFamily::UserItemAttr => "user-item-attr",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for ty in [
            EntityType::University,
            EntityType::Student,
            EntityType::Friend,
            EntityType::Progenitor,
            EntityType::Kid,
            EntityType::LastKid,
            EntityType::Hobby,
            EntityType::Item,
            EntityType::Attribute,
            EntityType::User,
        ] {
            assert_eq!(EntityType::from_tag(ty.tag()).unwrap(), ty);
        }
    }

    #[test]
    fn unknown_tag_is_an_error() {
        assert!(matches!(
            EntityType::from_tag("planet"),
            Err(ModelError::UnknownTag { .. })
        ));
    }

    #[test]
    fn serde_uses_wire_tags() {
        let json = serde_json::to_string(&EntityType::LastKid).unwrap();
        assert_eq!(json, "\"lkid\"");
        let back: EntityType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EntityType::LastKid);
    }

    #[test]
    fn families_reject_foreign_categories() {
        assert_eq!(GeneratorFamily::Fruni.arity(EntityType::Kid), None);
        assert_eq!(GeneratorFamily::Ftree.arity(EntityType::User), None);
        assert_eq!(
            GeneratorFamily::UserItemAttr.arity(EntityType::University),
            None
        );
    }
}

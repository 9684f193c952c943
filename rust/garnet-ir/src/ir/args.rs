//! Declared argument descriptors for reflective consumers.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Formal parameter kind, named the way introspection reports it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ArgumentKind {
    #[strum(serialize = "req")]
    #[serde(rename = "req")]
    Required,
    #[strum(serialize = "opt")]
    #[serde(rename = "opt")]
    Optional,
    #[strum(serialize = "rest")]
    #[serde(rename = "rest")]
    Rest,
    #[strum(serialize = "key")]
    #[serde(rename = "key")]
    Keyword,
    #[strum(serialize = "keyrest")]
    #[serde(rename = "keyrest")]
    KeywordRest,
    #[strum(serialize = "block")]
    #[serde(rename = "block")]
    Block,
}

/// A declared `(kind, name)` pair, e.g. `[:req, "a"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    pub kind: ArgumentKind,
    pub name: String,
}

impl ArgumentDescriptor {
    pub fn new(kind: ArgumentKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ArgumentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[:{}, {:?}]", self.kind, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ArgumentKind::iter() {
            assert_eq!(ArgumentKind::from_str(&kind.to_string()).ok(), Some(kind));
        }
        assert_eq!(ArgumentKind::KeywordRest.to_string(), "keyrest");
        assert!(ArgumentKind::from_str("required").is_err());
    }

    #[test]
    fn test_descriptor_display() {
        let d = ArgumentDescriptor::new(ArgumentKind::Optional, "b");
        assert_eq!(d.to_string(), "[:opt, \"b\"]");
    }

    #[test]
    fn test_descriptor_serializes_short_kind() {
        let d = ArgumentDescriptor::new(ArgumentKind::Block, "blk");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"kind":"block","name":"blk"}"#);
    }
}

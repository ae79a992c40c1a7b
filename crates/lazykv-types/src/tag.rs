//! Remote value type tags.
//!
//! The remote store reports the type of every key as one of six tags. The
//! set is fixed, so dispatch is a plain enum match rather than any kind of
//! dynamic lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The type of a remote value, as reported by `StoreClient::type_of`.
///
/// `None` means the key does not exist in the remote store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    None,
    String,
    List,
    Set,
    ZSet,
    Hash,
}

impl TypeTag {
    /// The lowercase wire name for this tag (`"none"`, `"string"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::None => "none",
            TypeTag::String => "string",
            TypeTag::List => "list",
            TypeTag::Set => "set",
            TypeTag::ZSet => "zset",
            TypeTag::Hash => "hash",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(TypeTag::None),
            "string" => Ok(TypeTag::String),
            "list" => Ok(TypeTag::List),
            "set" => Ok(TypeTag::Set),
            "zset" => Ok(TypeTag::ZSet),
            "hash" => Ok(TypeTag::Hash),
            other => Err(format!("unknown type tag: {}", other)),
        }
    }
}

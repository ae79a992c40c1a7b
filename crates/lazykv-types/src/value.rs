//! Raw local value shapes.
//!
//! `Value` is the input side of `CacheDirectory::set`: the caller hands over
//! a plain local value and the directory classifies it into the matching
//! representative. It is not the representative itself.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::tag::TypeTag;

/// A raw local value, before classification into a typed representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Absence of a value; maps to deleting the remote key.
    Absent,

    /// A single scalar value.
    Scalar(String),

    /// An ordered sequence; maps to a list seeded with this snapshot.
    Sequence(Vec<String>),

    /// An unordered set of members.
    Members(BTreeSet<String>),

    /// A field map. Classification of this shape is deferred functionality
    /// and is rejected with `UnsupportedValueType`.
    Fields(BTreeMap<String, String>),
}

impl Value {
    /// The remote type tag this shape corresponds to.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Absent => TypeTag::None,
            Value::Scalar(_) => TypeTag::String,
            Value::Sequence(_) => TypeTag::List,
            Value::Members(_) => TypeTag::Set,
            Value::Fields(_) => TypeTag::Hash,
        }
    }

    /// A short human-readable name for the shape, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Scalar(_) => "scalar",
            Value::Sequence(_) => "sequence",
            Value::Members(_) => "members",
            Value::Fields(_) => "fields",
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(seq: Vec<String>) -> Self {
        Value::Sequence(seq)
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(members: BTreeSet<String>) -> Self {
        Value::Members(members)
    }
}

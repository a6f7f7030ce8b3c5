//! Identifier newtypes.
//!
//! Every identifier is a string underneath, but the kinds never mix: a
//! `BikeId` cannot be passed where a `ComponentId` is expected.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for identifier types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValidationError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// The slot a component occupies, e.g. "front wheel" or "chain".
    ///
    /// A bike or hashtag holds at most one component per type at a time.
    ComponentType, "component type"
);

define_string_id!(
    /// A stable component identifier referenced by rules.
    ComponentId, "component ID"
);

define_string_id!(
    /// Display name of a component.
    ComponentName, "component name"
);

define_string_id!(
    /// A bike identifier, as assigned by the activity source.
    BikeId, "bike ID"
);

define_string_id!(
    /// Display name of a bike.
    BikeName, "bike name"
);

define_string_id!(
    /// An activity hashtag, stored without the leading `#`.
    HashTag, "hashtag"
);

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"));

impl HashTag {
    /// Extracts all `#word` hashtags from free text, in order of first appearance.
    pub fn extract(text: &str) -> Vec<Self> {
        let mut tags: Vec<Self> = Vec::new();
        for caps in HASHTAG_RE.captures_iter(text) {
            let tag = Self(caps[1].to_string());
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

//! Wire-level building blocks shared by the entity model
//!
//! - [`wire_enum!`]: declares a closed vocabulary with its wire values
//! - [`OneOrMany`]: a scalar or a list, as accepted by many Zabbix parameters
//! - integer helpers for fields the server sends as strings

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A string that matches neither a wire value nor a variant name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    /// Enumeration name
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl UnknownVariant {
    /// Create the error for `value` rejected by enumeration `kind`
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Declare a closed enumeration backed by wire strings
///
/// The generated type:
/// - serializes as its wire value, both as a value and as a map key
/// - deserializes from the wire value given as a string or an integer
/// - parses (`FromStr`, `TryFrom<&str>`) from the wire value or the variant
///   name, case-insensitively for names; wire values are matched first
/// - displays as its wire value
/// - converts into [`OneOrMany`] from a single value or a `Vec`
///
/// A value built from a variant and one parsed from its wire value are equal,
/// so entities compare and serialize the same either way.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant
            ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent on the wire
            pub fn as_wire(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// The symbolic variant name
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_wire())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::wire::UnknownVariant;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .find(|v| v.as_wire() == s)
                    .or_else(|| $name::ALL.iter().find(|v| v.name().eq_ignore_ascii_case(s)))
                    .copied()
                    .ok_or_else(|| $crate::wire::UnknownVariant::new(stringify!($name), s))
            }
        }

        impl ::std::convert::TryFrom<&str> for $name {
            type Error = $crate::wire::UnknownVariant;

            fn try_from(s: &str) -> ::std::result::Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_wire())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                struct WireVisitor;

                impl<'de> ::serde::de::Visitor<'de> for WireVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                        write!(f, "a {} wire value", stringify!($name))
                    }

                    fn visit_str<E: ::serde::de::Error>(self, v: &str) -> ::std::result::Result<$name, E> {
                        v.parse().map_err(E::custom)
                    }

                    fn visit_u64<E: ::serde::de::Error>(self, v: u64) -> ::std::result::Result<$name, E> {
                        self.visit_str(&v.to_string())
                    }

                    fn visit_i64<E: ::serde::de::Error>(self, v: i64) -> ::std::result::Result<$name, E> {
                        self.visit_str(&v.to_string())
                    }
                }

                deserializer.deserialize_any(WireVisitor)
            }
        }

        impl ::std::convert::From<$name> for $crate::wire::OneOrMany<$name> {
            fn from(value: $name) -> Self {
                $crate::wire::OneOrMany::One(value)
            }
        }

        impl ::std::convert::From<::std::vec::Vec<$name>> for $crate::wire::OneOrMany<$name> {
            fn from(values: ::std::vec::Vec<$name>) -> Self {
                $crate::wire::OneOrMany::Many(values)
            }
        }
    };
}

/// A single value or a list of values
///
/// Serialized untagged: `One("1")` is `"1"`, `Many(["1"])` is `["1"]`. The
/// distinction matters to callers: a scalar id selects one entity, a list
/// selects a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A scalar
    One(T),
    /// A list, possibly with a single element
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Returns true for the scalar form
    pub fn is_one(&self) -> bool {
        matches!(self, OneOrMany::One(_))
    }

    /// Number of values held
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    /// Returns true for an empty list
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize to a list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    /// Iterate over the values
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
    }
}

/// Entity identifiers: a single id or a list of ids
pub type Ids = OneOrMany<String>;

impl From<String> for Ids {
    fn from(id: String) -> Self {
        OneOrMany::One(id)
    }
}

impl From<&str> for Ids {
    fn from(id: &str) -> Self {
        OneOrMany::One(id.to_string())
    }
}

impl From<&String> for Ids {
    fn from(id: &String) -> Self {
        OneOrMany::One(id.clone())
    }
}

impl From<Vec<String>> for Ids {
    fn from(ids: Vec<String>) -> Self {
        OneOrMany::Many(ids)
    }
}

impl From<Vec<&str>> for Ids {
    fn from(ids: Vec<&str>) -> Self {
        OneOrMany::Many(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Ids {
    fn from(ids: &[&str]) -> Self {
        OneOrMany::Many(ids.iter().map(|id| id.to_string()).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    fn into_int<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            IntOrString::Int(n) => Ok(n),
            IntOrString::Str(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

/// Deserialize an integer the server may send as a JSON string
pub fn int_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    IntOrString::deserialize(deserializer)?.into_int()
}

/// Deserialize an optional integer the server may send as a JSON string
///
/// Use together with `#[serde(default)]` so a missing member is `None`.
pub fn opt_int_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Option::<IntOrString>::deserialize(deserializer)?
        .map(|raw| raw.into_int::<D::Error>())
        .transpose()
}

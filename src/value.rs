//! Dynamic values and their runtime kinds
//!
//! Rules built for dynamically shaped input (request payloads, decoded
//! documents, scripting bridges) validate a [`Value`]. Every value except
//! [`Value::Undefined`] and [`Value::Null`] carries exactly one [`Kind`],
//! which is what [`KindRule`](crate::rules::KindRule) compares against.
//!
//! # Example
//!
//! ```rust
//! use rulepipe::{Kind, Value};
//!
//! let v = Value::from(vec![1, 2, 3]);
//! assert_eq!(v.kind(), Some(Kind::Array));
//! assert_eq!(v.len(), Some(3));
//!
//! assert_eq!(Value::Null.kind(), None);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

/// The runtime type tag of a [`Value`].
///
/// Matching is nominal: an array is never an object, a date is never a
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Kind {
    /// `true` / `false`
    Boolean,
    /// Any number
    Number,
    /// Text
    String,
    /// Ordered sequence of values
    Array,
    /// String-keyed map of values
    Object,
    /// Point in time
    Date,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Date => "date",
        };
        f.write_str(name)
    }
}

/// A dynamically typed value.
///
/// `Undefined` models a value that was never supplied; `Null` models one that
/// was supplied as explicitly empty. Neither has a [`Kind`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Explicit null.
    Null,
    /// No value at all.
    #[default]
    Undefined,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// String.
    String(String),
    /// Array.
    Array(Vec<Value>),
    /// Date.
    Date(SystemTime),
    /// Object.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// An empty object (`{}`).
    pub fn object() -> Self {
        Value::Object(BTreeMap::new())
    }

    /// The runtime kind, or `None` for undefined and null.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::Undefined | Value::Null => None,
            Value::Bool(_) => Some(Kind::Boolean),
            Value::Number(_) => Some(Kind::Number),
            Value::String(_) => Some(Kind::String),
            Value::Array(_) => Some(Kind::Array),
            Value::Object(_) => Some(Kind::Object),
            Value::Date(_) => Some(Kind::Date),
        }
    }

    /// Length of strings (in chars), arrays and objects.
    ///
    /// ```rust
    /// use rulepipe::Value;
    ///
    /// assert_eq!(Value::from("héllo").len(), Some(5));
    /// assert_eq!(Value::from(3).len(), None);
    /// ```
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// `true` for [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The number, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<SystemTime> for Value {
    fn from(t: SystemTime) -> Self {
        Value::Date(t)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(opt: Option<V>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(map: BTreeMap<String, V>) -> Self {
        Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

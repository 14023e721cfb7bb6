//! Presence rule

use std::time::SystemTime;

use crate::rule::{Rule, Verdict};
use crate::value::Value;

/// Types that can be absent or empty in the sense of [`NotEmptyRule`].
///
/// Only two notions of emptiness count: no value at all, and the empty
/// string. Empty collections and whitespace-only strings are present, and
/// so is every number, boolean and timestamp.
pub trait Presence {
    /// `true` if the value is missing or is the empty string.
    fn is_absent(&self) -> bool;
}

impl Presence for Value {
    fn is_absent(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl Presence for str {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for String {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<V: Presence> Presence for Option<V> {
    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(|v| v.is_absent())
    }
}

impl<V: Presence + ?Sized> Presence for &V {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<V> Presence for Vec<V> {
    fn is_absent(&self) -> bool {
        false
    }
}

impl<V> Presence for [V] {
    fn is_absent(&self) -> bool {
        false
    }
}

macro_rules! always_present {
    ($($t:ty),*) => {
        $(
            impl Presence for $t {
                fn is_absent(&self) -> bool {
                    false
                }
            }
        )*
    };
}

always_present!(bool, SystemTime);
always_present!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

/// Fails when the value is absent or the empty string.
///
/// # Example
///
/// ```rust
/// use rulepipe::prelude::*;
///
/// let rule = NotEmptyRule::new();
/// assert!(rule.evaluate(&Value::from("x")).passed());
/// assert!(rule.evaluate(&Value::from(Vec::<i32>::new())).passed());
/// assert!(rule.evaluate(&Value::Undefined).failed());
/// assert_eq!(
///     rule.evaluate(&Value::from("")).message(),
///     Some("NotEmptyRule: The value must not be empty.")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotEmptyRule {
    message: Option<String>,
}

impl NotEmptyRule {
    /// Rule name.
    pub const NAME: &'static str = "NotEmptyRule";
    /// Default error message.
    pub const MESSAGE: &'static str = "The value must not be empty.";

    /// Create the rule with its default message.
    pub const fn new() -> Self {
        Self { message: None }
    }

    /// Override the error message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Default for NotEmptyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Presence + ?Sized> Rule<T> for NotEmptyRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn error_message(&self) -> &str {
        self.message.as_deref().unwrap_or(Self::MESSAGE)
    }

    fn verdict(&self, value: &T) -> Verdict {
        (!value.is_absent()).into()
    }
}

//! Built-in rules
//!
//! Three archetypes cover most checks:
//!
//! - [`NotEmptyRule`]: the value is present and not the empty string
//! - [`KindRule`]: the value's runtime kind is exactly a target [`Kind`]
//! - [`CustomRule`]: anything expressible as a [`Predicate`](crate::predicate::Predicate)
//!
//! The free functions [`not_empty`], [`is_array`] and [`is_date`] build the
//! commonly used instances. [`not_blank`] and [`is_collection`] are
//! [`CustomRule`]s assembled from predicate combinators.
//!
//! # Example
//!
//! ```rust
//! use rulepipe::prelude::*;
//!
//! let today = Value::from(std::time::SystemTime::now());
//! assert!(is_date().evaluate(&today).passed());
//! assert!(is_array().evaluate(&today).failed());
//! assert!(not_empty().evaluate(&today).passed());
//! ```

mod custom;
mod kind;
mod presence;

pub use custom::CustomRule;
pub use kind::{KindRule, Typed};
pub use presence::{NotEmptyRule, Presence};

use crate::predicate::PredicateExt;
use crate::value::{Kind, Value};

/// A [`NotEmptyRule`] with the default message.
pub const fn not_empty() -> NotEmptyRule {
    NotEmptyRule::new()
}

/// A [`KindRule`] accepting arrays.
pub const fn is_array() -> KindRule {
    KindRule::new(Kind::Array)
}

/// A [`KindRule`] accepting dates.
pub const fn is_date() -> KindRule {
    KindRule::new(Kind::Date)
}

/// Present, and not a string made only of whitespace.
///
/// Stricter than [`not_empty`]: `"  "` fails here.
///
/// ```rust
/// use rulepipe::prelude::*;
///
/// let padded = Value::from(" \t");
/// assert!(not_empty().evaluate(&padded).passed());
/// assert_eq!(
///     not_blank().evaluate(&padded).message(),
///     Some("NotBlankRule: The value must not be blank.")
/// );
/// ```
pub fn not_blank() -> CustomRule {
    let present = |v: &Value| !v.is_absent();
    let blank = |v: &Value| v.as_str().is_some_and(|s| s.trim().is_empty());

    CustomRule::with_predicate(present.and(blank.not()))
        .named("NotBlankRule")
        .with_message("The value must not be blank.")
}

/// An array or an object.
pub fn is_collection() -> CustomRule {
    let array = |v: &Value| v.kind() == Some(Kind::Array);
    let object = |v: &Value| v.kind() == Some(Kind::Object);

    CustomRule::with_predicate(array.or(object))
        .named("CollectionRule")
        .with_message("The value must be an array or an object.")
}

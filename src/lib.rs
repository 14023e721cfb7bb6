//! # Rulepipe
//!
//! Composable validation rules and ordered, short-circuiting pipelines.
//!
//! A [`Rule`] is a named check with a default error message. Rules are
//! evaluated against a value and always produce a [`ValidationResult`]:
//! failing validation is data, not an error. A [`CompositeRule`] runs a list
//! of rules in order, stops at the first failure, and reports which step
//! failed and why.
//!
//! Built-in rules:
//!
//! - [`NotEmptyRule`]: present and not the empty string
//! - [`KindRule`]: runtime [`Kind`] is exactly a target kind
//! - [`CustomRule`]: any caller-supplied predicate
//! - [`NoopRule`]: a named rule that always passes
//!
//! ## Quick Example
//!
//! ```rust
//! use rulepipe::prelude::*;
//!
//! let pipeline = CompositeRule::new()
//!     .with_rule(not_empty())
//!     .with_rule(is_array())
//!     .with_rule(
//!         CustomRule::with_predicate(|v: &Value| v.len() == Some(3))
//!             .named("LengthRule")
//!             .with_message("An array has incorrect length. Must be 3."),
//!     );
//!
//! for value in [Value::Undefined, Value::object(), Value::from(vec![1, 2])] {
//!     let result = pipeline.evaluate(&value);
//!     assert!(result.failed());
//!     println!("{}", result.message().unwrap_or_default());
//! }
//!
//! assert!(pipeline.evaluate(&Value::from(vec![1, 2, 3])).passed());
//! ```
//!
//! ## Cargo features
//!
//! - `tracing`: pipeline steps and short-circuits are reported as
//!   `tracing` events.
//! - `serde`: `Serialize`/`Deserialize` for [`Value`] and [`Kind`],
//!   `Serialize` for [`ValidationResult`].
//! - `proptest`: `Arbitrary` for [`Value`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod composite;
pub mod error;
pub mod predicate;
pub mod result;
pub mod rule;
pub mod rules;
pub mod testing;
pub mod value;

// Re-exports
pub use composite::CompositeRule;
pub use error::{InvalidRuleError, Violation};
pub use predicate::{Predicate, PredicateExt};
pub use result::ValidationResult;
pub use rule::{NoopRule, Rule, Verdict};
pub use rules::{CustomRule, KindRule, NotEmptyRule};
pub use value::{Kind, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::composite::CompositeRule;
    pub use crate::error::{InvalidRuleError, Violation};
    pub use crate::predicate::{Predicate, PredicateExt};
    pub use crate::result::ValidationResult;
    pub use crate::rule::{NoopRule, Rule, Verdict};
    pub use crate::rules::{
        is_array, is_collection, is_date, not_blank, not_empty, CustomRule, KindRule,
        NotEmptyRule, Presence, Typed,
    };
    pub use crate::value::{Kind, Value};
}

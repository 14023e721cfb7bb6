//! The rule contract
//!
//! Every check in this crate implements [`Rule`]. A rule has a name, a
//! default error message, and a [`verdict`](Rule::verdict) over a value.
//! [`evaluate`](Rule::evaluate) turns the verdict into a
//! [`ValidationResult`], formatting failures as `"<name>: <message>"`.
//!
//! Rules that supply no verdict pass unconditionally. [`NoopRule`] is that
//! case as a named, standalone rule.
//!
//! # Example
//!
//! ```rust
//! use rulepipe::{Rule, Verdict};
//!
//! struct Even;
//!
//! impl Rule<i32> for Even {
//!     fn name(&self) -> &str {
//!         "Even"
//!     }
//!
//!     fn error_message(&self) -> &str {
//!         "The value must be even."
//!     }
//!
//!     fn verdict(&self, value: &i32) -> Verdict {
//!         Verdict::from(value % 2 == 0)
//!     }
//! }
//!
//! assert!(Even.evaluate(&4).passed());
//! assert_eq!(
//!     Even.evaluate(&3).message(),
//!     Some("Even: The value must be even.")
//! );
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::result::ValidationResult;
use crate::value::Value;

/// Message used by rules that do not override it.
pub const DEFAULT_MESSAGE: &str = "The value is not correct.";

/// A rule's decision about one value, before message formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The value satisfies the rule.
    Valid,
    /// The value fails; report the rule's own error message.
    Invalid,
    /// The value fails; report this detail instead of the error message.
    InvalidBecause(String),
}

impl Verdict {
    /// Whether this is [`Verdict::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

/// A named, reusable check over values of type `T`.
///
/// Implementors provide [`name`](Rule::name) and usually
/// [`error_message`](Rule::error_message) and [`verdict`](Rule::verdict).
/// [`evaluate`](Rule::evaluate) should not normally be overridden.
///
/// Rules are `Send + Sync` and must not mutate themselves while evaluating,
/// so one instance can be shared between pipelines and threads.
pub trait Rule<T: ?Sized = Value>: Send + Sync {
    /// The rule's name, used as the prefix of failure messages.
    fn name(&self) -> &str;

    /// The message reported on [`Verdict::Invalid`].
    fn error_message(&self) -> &str {
        DEFAULT_MESSAGE
    }

    /// Decide whether `value` satisfies the rule.
    ///
    /// The default accepts everything: a rule with no predicate is
    /// vacuously valid.
    fn verdict(&self, value: &T) -> Verdict {
        let _ = value;
        Verdict::Valid
    }

    /// Evaluate `value`, producing a result that echoes it back.
    fn evaluate<'a>(&self, value: &'a T) -> ValidationResult<'a, T> {
        match self.verdict(value) {
            Verdict::Valid => ValidationResult::pass(value),
            Verdict::Invalid => ValidationResult::fail(
                value,
                format!("{}: {}", self.name(), self.error_message()),
            ),
            Verdict::InvalidBecause(detail) => {
                ValidationResult::fail(value, format!("{}: {}", self.name(), detail))
            }
        }
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn error_message(&self) -> &str {
        (**self).error_message()
    }

    fn verdict(&self, value: &T) -> Verdict {
        (**self).verdict(value)
    }

    fn evaluate<'a>(&self, value: &'a T) -> ValidationResult<'a, T> {
        (**self).evaluate(value)
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn error_message(&self) -> &str {
        (**self).error_message()
    }

    fn verdict(&self, value: &T) -> Verdict {
        (**self).verdict(value)
    }

    fn evaluate<'a>(&self, value: &'a T) -> ValidationResult<'a, T> {
        (**self).evaluate(value)
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn error_message(&self) -> &str {
        (**self).error_message()
    }

    fn verdict(&self, value: &T) -> Verdict {
        (**self).verdict(value)
    }

    fn evaluate<'a>(&self, value: &'a T) -> ValidationResult<'a, T> {
        (**self).evaluate(value)
    }
}

/// A named rule with no predicate. Always passes.
///
/// # Example
///
/// ```rust
/// use rulepipe::{NoopRule, Rule, Value};
///
/// let rule = NoopRule::new("Placeholder");
/// assert_eq!(Rule::<Value>::name(&rule), "Placeholder");
/// assert!(rule.evaluate(&Value::Null).passed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoopRule {
    name: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl NoopRule {
    /// Create a rule named `name` with the default message.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            message: Cow::Borrowed(DEFAULT_MESSAGE),
        }
    }

    /// Override the error message.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T: ?Sized> Rule<T> for NoopRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

//! Caller-defined rules

use std::borrow::Cow;
use std::fmt;

use crate::predicate::Predicate;
use crate::rule::{Rule, Verdict};
use crate::value::Value;

/// A rule backed by a caller-supplied predicate.
///
/// Name and message are optional overrides. Without a predicate the rule
/// always passes.
///
/// # Example
///
/// ```rust
/// use rulepipe::prelude::*;
///
/// let rule = CustomRule::with_predicate(|v: &Value| v.len() == Some(3))
///     .named("LengthRule")
///     .with_message("An array has incorrect length. Must be 3.");
///
/// assert!(rule.evaluate(&Value::from(vec![1, 2, 3])).passed());
/// assert_eq!(
///     rule.evaluate(&Value::from(vec![1, 2])).message(),
///     Some("LengthRule: An array has incorrect length. Must be 3.")
/// );
/// ```
pub struct CustomRule<T: ?Sized = Value> {
    name: Cow<'static, str>,
    message: Cow<'static, str>,
    predicate: Option<Box<dyn Predicate<T>>>,
}

impl<T: ?Sized> CustomRule<T> {
    /// Default rule name.
    pub const NAME: &'static str = "CustomRule";
    /// Default error message.
    pub const MESSAGE: &'static str = "The value hasn't passed the custom validation.";

    /// A custom rule with no predicate.
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed(Self::NAME),
            message: Cow::Borrowed(Self::MESSAGE),
            predicate: None,
        }
    }

    /// A custom rule checking `predicate`.
    pub fn with_predicate<P>(predicate: P) -> Self
    where
        P: Predicate<T> + 'static,
    {
        Self::new().predicate(predicate)
    }

    /// Set or replace the predicate.
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Predicate<T> + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Override the rule name.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the error message.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Whether a predicate has been supplied.
    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }
}

impl<T: ?Sized> Default for CustomRule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for CustomRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

impl<T: ?Sized> Rule<T> for CustomRule<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn error_message(&self) -> &str {
        &self.message
    }

    fn verdict(&self, value: &T) -> Verdict {
        match &self.predicate {
            Some(predicate) => predicate.check(value).into(),
            None => Verdict::Valid,
        }
    }
}

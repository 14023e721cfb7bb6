//! Error types.
//!
//! Two kinds of error live here and they never mix:
//!
//! - [`InvalidRuleError`] is a caller bug: something the pipeline cannot
//!   recognise as a rule was offered through the dynamic registration path.
//! - [`Violation`] is a failed validation that the caller explicitly chose
//!   to treat as an error via [`ValidationResult::into_result`](crate::ValidationResult::into_result).

use std::fmt;

/// Returned when a candidate offered to
/// [`CompositeRule::try_add_rule`](crate::CompositeRule::try_add_rule) is not
/// a rule object the pipeline can recognise.
///
/// The message is the same whatever was offered.
///
/// # Examples
///
/// ```rust
/// use rulepipe::{CompositeRule, Value};
///
/// let mut pipeline = CompositeRule::<Value>::new();
/// let err = pipeline.try_add_rule(Box::new(42_i32)).unwrap_err();
///
/// assert_eq!(err.to_string(), "Add rule failed: must be an instance of Rule.");
/// assert!(pipeline.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvalidRuleError;

impl fmt::Display for InvalidRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Add rule failed: must be an instance of Rule.")
    }
}

impl std::error::Error for InvalidRuleError {}

/// A failed validation, as an error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    message: String,
}

impl Violation {
    /// Create a violation from a rule's failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consume the violation, returning the message.
    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Violation {}

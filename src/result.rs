//! The outcome of evaluating a rule
//!
//! A [`ValidationResult`] borrows the checked value and carries a failure
//! message exactly when the check failed. Failures are data: nothing in this
//! crate turns them into `Err` unless the caller asks via
//! [`ValidationResult::into_result`].

use std::fmt;

use crate::error::Violation;
use crate::rule::DEFAULT_MESSAGE;

/// Outcome of one [`Rule::evaluate`](crate::Rule::evaluate) call.
///
/// The message is present if and only if the value failed. Both
/// constructors uphold this, and the fields are read-only.
///
/// # Example
///
/// ```rust
/// use rulepipe::ValidationResult;
///
/// let ok = ValidationResult::pass(&5);
/// assert!(ok.passed());
/// assert_eq!(ok.message(), None);
///
/// let bad = ValidationResult::fail(&-5, "Positive: must be positive");
/// assert!(!bad.passed());
/// assert_eq!(bad.value(), &-5);
/// assert_eq!(bad.message(), Some("Positive: must be positive"));
/// ```
#[derive(PartialEq, Eq)]
pub struct ValidationResult<'a, T: ?Sized> {
    value: &'a T,
    message: Option<String>,
}

impl<'a, T: ?Sized> ValidationResult<'a, T> {
    /// A passing result for `value`.
    pub fn pass(value: &'a T) -> Self {
        ValidationResult {
            value,
            message: None,
        }
    }

    /// A failing result for `value`.
    ///
    /// A failure always carries a message: an empty `message` is replaced
    /// with [`DEFAULT_MESSAGE`].
    pub fn fail(value: &'a T, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message.push_str(DEFAULT_MESSAGE);
        }
        ValidationResult {
            value,
            message: Some(message),
        }
    }

    /// Whether the value satisfied the rule.
    pub fn passed(&self) -> bool {
        self.message.is_none()
    }

    /// Whether the value failed the rule.
    pub fn failed(&self) -> bool {
        self.message.is_some()
    }

    /// The value that was checked.
    pub fn value(&self) -> &'a T {
        self.value
    }

    /// The failure message, `None` on success.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Consume the result, returning the failure message if any.
    pub fn into_message(self) -> Option<String> {
        self.message
    }

    /// Convert into a `Result`, for callers that want to propagate failures
    /// with `?`.
    ///
    /// ```rust
    /// use rulepipe::prelude::*;
    ///
    /// fn accept(v: &Value) -> Result<&Value, Violation> {
    ///     not_empty().evaluate(v).into_result()
    /// }
    ///
    /// assert!(accept(&Value::from("x")).is_ok());
    /// let err = accept(&Value::Null).unwrap_err();
    /// assert_eq!(err.message(), "NotEmptyRule: The value must not be empty.");
    /// ```
    pub fn into_result(self) -> Result<&'a T, Violation> {
        match self.message {
            None => Ok(self.value),
            Some(message) => Err(Violation::new(message)),
        }
    }
}

impl<T: ?Sized> Clone for ValidationResult<'_, T> {
    fn clone(&self) -> Self {
        ValidationResult {
            value: self.value,
            message: self.message.clone(),
        }
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for ValidationResult<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResult")
            .field("passed", &self.passed())
            .field("value", &self.value)
            .field("message", &self.message)
            .finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize + ?Sized> serde::Serialize for ValidationResult<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let fields = if self.message.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("ValidationResult", fields)?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("value", self.value)?;
        match &self.message {
            Some(message) => state.serialize_field("message", message)?,
            None => state.skip_field("message")?,
        }
        state.end()
    }
}

//! Testing utilities for rules and pipelines
//!
//! Assertion macros for [`ValidationResult`](crate::ValidationResult), a
//! call-counting [`SpyRule`] for checking short-circuit behaviour, and, with
//! the `proptest` feature, an `Arbitrary` implementation for
//! [`Value`](crate::Value).
//!
//! # Examples
//!
//! ```rust
//! use rulepipe::prelude::*;
//! use rulepipe::{assert_failed, assert_failed_with, assert_passed};
//!
//! assert_passed!(not_empty().evaluate(&Value::from("x")));
//! assert_failed!(not_empty().evaluate(&Value::Null));
//! assert_failed_with!(is_array().evaluate(&Value::Null), "KindRule");
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::result::ValidationResult;
use crate::rule::{Rule, Verdict};

/// Assert that a result passed.
///
/// Panics with the failure message otherwise.
#[macro_export]
macro_rules! assert_passed {
    ($result:expr) => {
        match $result.message() {
            None => {}
            Some(message) => {
                panic!("Expected pass, got failure: {}", message);
            }
        }
    };
}

/// Assert that a result failed.
#[macro_export]
macro_rules! assert_failed {
    ($result:expr) => {
        match $result {
            result => {
                if result.message().is_none() {
                    panic!("Expected failure, got pass: {:?}", result.value());
                }
            }
        }
    };
}

/// Assert that a result failed with a message containing `$needle`.
///
/// # Example
///
/// ```rust
/// use rulepipe::prelude::*;
/// use rulepipe::assert_failed_with;
///
/// let blank = Value::from("");
/// let result = not_empty().evaluate(&blank);
/// assert_failed_with!(result, "must not be empty");
/// ```
#[macro_export]
macro_rules! assert_failed_with {
    ($result:expr, $needle:expr) => {
        match $result {
            result => match result.message() {
                Some(message) => {
                    assert!(
                        message.contains($needle),
                        "Expected failure mentioning {:?}, got: {}",
                        $needle,
                        message
                    );
                }
                None => {
                    panic!(
                        "Expected failure mentioning {:?}, got pass: {:?}",
                        $needle,
                        result.value()
                    );
                }
            },
        }
    };
}

/// Wraps a rule and counts how often it is evaluated.
///
/// Clones share the counter, so a clone can be registered on a pipeline
/// while the original is kept for inspection.
///
/// # Example
///
/// ```rust
/// use rulepipe::prelude::*;
/// use rulepipe::testing::SpyRule;
///
/// let spy = SpyRule::new(is_array());
/// let pipeline = CompositeRule::<Value>::new()
///     .with_rule(not_empty())
///     .with_rule(spy.clone());
///
/// pipeline.evaluate(&Value::Null);
/// assert_eq!(spy.calls(), 0);
///
/// pipeline.evaluate(&Value::from("x"));
/// assert_eq!(spy.calls(), 1);
/// ```
#[derive(Debug)]
pub struct SpyRule<R> {
    inner: Arc<R>,
    calls: Arc<AtomicUsize>,
}

impl<R> SpyRule<R> {
    /// Wrap `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner: Arc::new(inner),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times the rule has been evaluated.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reset the counter to zero.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl<R> Clone for SpyRule<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T: ?Sized, R: Rule<T>> Rule<T> for SpyRule<R> {
    fn name(&self) -> &str {
        Rule::<T>::name(&*self.inner)
    }

    fn error_message(&self) -> &str {
        Rule::<T>::error_message(&*self.inner)
    }

    fn verdict(&self, value: &T) -> Verdict {
        self.inner.verdict(value)
    }

    fn evaluate<'a>(&self, value: &'a T) -> ValidationResult<'a, T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.evaluate(value)
    }
}

#[cfg(feature = "proptest")]
use crate::value::Value;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use std::time::{Duration, SystemTime};

        let leaf = prop_oneof![
            Just(Value::Undefined),
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-1.0e9..1.0e9f64).prop_map(Value::Number),
            ".{0,8}".prop_map(Value::String),
            (0u64..4_000_000_000)
                .prop_map(|secs| Value::Date(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(Value::Object),
            ]
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{is_array, not_empty};
    use crate::value::Value;

    #[test]
    fn spy_counts_evaluations() {
        let spy = SpyRule::new(not_empty());
        assert_eq!(spy.calls(), 0);

        spy.evaluate(&Value::Null);
        spy.clone().evaluate(&Value::from("x"));
        assert_eq!(spy.calls(), 2);

        spy.reset();
        assert_eq!(spy.calls(), 0);
    }

    #[test]
    fn spy_preserves_result() {
        let spy = SpyRule::new(is_array());
        let value = Value::object();
        let result = spy.evaluate(&value);
        assert_eq!(
            result.message(),
            Some("KindRule: The value is of incorrect class.")
        );
        assert_eq!(Rule::<Value>::name(&spy), "KindRule");
    }

    #[test]
    fn assert_passed_macro() {
        assert_passed!(not_empty().evaluate(&Value::from(1)));
    }

    #[test]
    fn assert_failed_macro() {
        assert_failed!(not_empty().evaluate(&Value::Undefined));
    }

    #[test]
    fn assert_failed_with_macro() {
        assert_failed_with!(is_array().evaluate(&Value::from("s")), "incorrect class");
    }

    #[test]
    #[should_panic(expected = "Expected pass, got failure")]
    fn assert_passed_panics_on_failure() {
        assert_passed!(not_empty().evaluate(&Value::Null));
    }

    #[test]
    #[should_panic(expected = "Expected failure, got pass")]
    fn assert_failed_panics_on_pass() {
        assert_failed!(not_empty().evaluate(&Value::from("x")));
    }

    #[test]
    #[should_panic(expected = "Expected failure mentioning")]
    fn assert_failed_with_panics_on_other_message() {
        assert_failed_with!(not_empty().evaluate(&Value::Null), "incorrect class");
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_values_have_consistent_kind(value in any::<Value>()) {
                let kindless = value.is_undefined() || value.is_null();
                prop_assert_eq!(value.kind().is_none(), kindless);
            }
        }
    }
}

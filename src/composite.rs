//! Ordered, short-circuiting rule pipelines
//!
//! A [`CompositeRule`] holds an ordered list of rules and is itself a
//! [`Rule`], so pipelines nest. Evaluation walks the members in registration
//! order and stops at the first failure; later members are not invoked.
//!
//! The failing member's message is carried in the returned result only. The
//! pipeline holds no per-evaluation state, so one instance can be evaluated
//! from many threads at once.
//!
//! # Example
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
//! assert!(pipeline.evaluate(&Value::from(vec![1, 2, 3])).passed());
//!
//! let missing = Value::Undefined;
//! let result = pipeline.evaluate(&missing);
//! assert_eq!(
//!     result.message(),
//!     Some("CompositeRule: Validation step: NotEmptyRule: The value must not be empty.")
//! );
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::InvalidRuleError;
use crate::rule::{NoopRule, Rule, Verdict, DEFAULT_MESSAGE};
use crate::rules::{CustomRule, KindRule, NotEmptyRule, Presence, Typed};
use crate::value::Value;

/// Prefix placed before a failing member's message.
pub const STEP_PREFIX: &str = "Validation step: ";

/// An ordered pipeline of rules evaluated as one rule.
pub struct CompositeRule<T: ?Sized = Value> {
    name: Cow<'static, str>,
    rules: Vec<Arc<dyn Rule<T>>>,
}

impl<T: ?Sized> CompositeRule<T> {
    /// Default pipeline name.
    pub const NAME: &'static str = "CompositeRule";

    /// An empty pipeline. Passes every value until rules are added.
    pub fn new() -> Self {
        Self::named(Self::NAME)
    }

    /// An empty pipeline with a custom name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Append `rule`. It runs after every rule already registered.
    pub fn add_rule<R>(&mut self, rule: R) -> &mut Self
    where
        R: Rule<T> + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append a rule that may also be registered elsewhere.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use rulepipe::prelude::*;
    ///
    /// let required: Arc<dyn Rule> = Arc::new(not_empty());
    ///
    /// let mut names = CompositeRule::named("Names");
    /// let mut tags = CompositeRule::named("Tags");
    /// names.add_shared(Arc::clone(&required));
    /// tags.add_shared(required).add_rule(is_array());
    ///
    /// assert_eq!(names.len(), 1);
    /// assert_eq!(tags.len(), 2);
    /// ```
    pub fn add_shared(&mut self, rule: Arc<dyn Rule<T>>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Builder form of [`add_rule`](Self::add_rule).
    pub fn with_rule<R>(mut self, rule: R) -> Self
    where
        R: Rule<T> + 'static,
    {
        self.add_rule(rule);
        self
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the registered rules, in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }
}

impl<T: Presence + Typed + ?Sized + 'static> CompositeRule<T> {
    /// Register a type-erased candidate, checking that it is a rule.
    ///
    /// Recognised candidates are the erased forms `Arc<dyn Rule<T>>` and
    /// `Box<dyn Rule<T>>`, plus the crate's own rule types: [`NotEmptyRule`],
    /// [`KindRule`], [`NoopRule`], [`CustomRule<T>`] and `CompositeRule<T>`.
    /// Anything else is rejected with [`InvalidRuleError`] and the pipeline
    /// is left unchanged.
    ///
    /// A `dyn Any` cannot reveal which traits its concrete type implements,
    /// so a caller-defined rule struct (or a
    /// [`SpyRule`](crate::testing::SpyRule)) is only recognised once it has
    /// been erased to `Box<dyn Rule<T>>` or `Arc<dyn Rule<T>>`. Use
    /// [`add_rule`](Self::add_rule) when the concrete type is known.
    ///
    /// ```rust
    /// use std::any::Any;
    /// use rulepipe::prelude::*;
    ///
    /// let mut pipeline = CompositeRule::<Value>::new();
    ///
    /// let erased: Box<dyn Rule> = Box::new(is_array());
    /// let candidates: Vec<Box<dyn Any + Send + Sync>> =
    ///     vec![Box::new(not_empty()), Box::new(erased), Box::new(3.5_f64)];
    ///
    /// let outcomes: Vec<bool> = candidates
    ///     .into_iter()
    ///     .map(|c| pipeline.try_add_rule(c).is_ok())
    ///     .collect();
    ///
    /// assert_eq!(outcomes, [true, true, false]);
    /// assert_eq!(pipeline.len(), 2);
    /// ```
    pub fn try_add_rule(
        &mut self,
        candidate: Box<dyn Any + Send + Sync>,
    ) -> Result<&mut Self, InvalidRuleError> {
        let rule: Arc<dyn Rule<T>> = candidate
            .downcast::<Arc<dyn Rule<T>>>()
            .map(|shared| *shared)
            .or_else(|c| c.downcast::<Box<dyn Rule<T>>>().map(|boxed| Arc::from(*boxed)))
            .or_else(erase::<T, NotEmptyRule>)
            .or_else(erase::<T, KindRule>)
            .or_else(erase::<T, NoopRule>)
            .or_else(erase::<T, CustomRule<T>>)
            .or_else(erase::<T, CompositeRule<T>>)
            .map_err(|_| {
                #[cfg(feature = "tracing")]
                tracing::warn!(pipeline = %self.name, "rejected non-rule registration");
                InvalidRuleError
            })?;
        self.rules.push(rule);
        Ok(self)
    }
}

type Candidate = Box<dyn Any + Send + Sync>;

fn erase<T, R>(candidate: Candidate) -> Result<Arc<dyn Rule<T>>, Candidate>
where
    T: ?Sized,
    R: Rule<T> + 'static,
{
    candidate
        .downcast::<R>()
        .map(|rule| Arc::new(*rule) as Arc<dyn Rule<T>>)
}

impl<T: ?Sized> Rule<T> for CompositeRule<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn error_message(&self) -> &str {
        DEFAULT_MESSAGE
    }

    fn verdict(&self, value: &T) -> Verdict {
        for (_step, rule) in self.rules.iter().enumerate() {
            let result = rule.evaluate(value);

            #[cfg(feature = "tracing")]
            tracing::trace!(
                pipeline = %self.name,
                step = _step,
                rule = rule.name(),
                passed = result.passed(),
                "evaluated pipeline step"
            );

            if let Some(message) = result.into_message() {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    pipeline = %self.name,
                    step = _step,
                    rule = rule.name(),
                    "pipeline short-circuited"
                );

                return Verdict::InvalidBecause(format!("{}{}", STEP_PREFIX, message));
            }
        }
        Verdict::Valid
    }
}

impl<T: ?Sized> Default for CompositeRule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for CompositeRule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for CompositeRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeRule")
            .field("name", &self.name)
            .field("rules", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: ?Sized> FromIterator<Arc<dyn Rule<T>>> for CompositeRule<T> {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Rule<T>>>>(iter: I) -> Self {
        let mut pipeline = Self::new();
        pipeline.extend(iter);
        pipeline
    }
}

impl<T: ?Sized> Extend<Arc<dyn Rule<T>>> for CompositeRule<T> {
    fn extend<I: IntoIterator<Item = Arc<dyn Rule<T>>>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{is_array, not_empty};
    use crate::testing::SpyRule;

    fn length_three() -> CustomRule {
        CustomRule::with_predicate(|v: &Value| v.len() == Some(3))
            .named("LengthRule")
            .with_message("An array has incorrect length. Must be 3.")
    }

    fn pipeline() -> CompositeRule {
        CompositeRule::new()
            .with_rule(not_empty())
            .with_rule(is_array())
            .with_rule(length_three())
    }

    #[test]
    fn test_empty_pipeline_passes() {
        let pipeline = CompositeRule::<Value>::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.evaluate(&Value::Undefined).passed());
    }

    #[test]
    fn test_all_pass() {
        let value = Value::from(vec![1, 2, 3]);
        let result = pipeline().evaluate(&value);
        assert!(result.passed());
        assert_eq!(result.value(), &value);
    }

    #[test]
    fn test_first_failure_wins() {
        let value = Value::Undefined;
        let result = pipeline().evaluate(&value);
        assert_eq!(
            result.message(),
            Some("CompositeRule: Validation step: NotEmptyRule: The value must not be empty.")
        );
    }

    #[test]
    fn test_object_fails_kind_step() {
        let value = Value::object();
        let result = pipeline().evaluate(&value);
        assert_eq!(
            result.message(),
            Some("CompositeRule: Validation step: KindRule: The value is of incorrect class.")
        );
    }

    #[test]
    fn test_partial_failure_names_length_rule() {
        let value = Value::from(vec![1, 2]);
        let result = pipeline().evaluate(&value);
        assert_eq!(
            result.message(),
            Some(
                "CompositeRule: Validation step: LengthRule: An array has incorrect length. Must be 3."
            )
        );
    }

    #[test]
    fn test_later_rules_not_invoked() {
        let first = SpyRule::new(not_empty());
        let second = SpyRule::new(is_array());
        let third = SpyRule::new(length_three());

        let mut pipeline = CompositeRule::<Value>::new();
        pipeline
            .add_rule(first.clone())
            .add_rule(second.clone())
            .add_rule(third.clone());

        assert!(pipeline.evaluate(&Value::Undefined).failed());
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
        assert_eq!(third.calls(), 0);

        assert!(pipeline.evaluate(&Value::from(vec![1, 2, 3])).passed());
        assert_eq!(first.calls(), 2);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 1);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let pipeline = pipeline();
        let short = Value::from(vec![1, 2]);

        let first = pipeline.evaluate(&short).into_message();
        let full = Value::from(vec![1, 2, 3]);
        let ok = pipeline.evaluate(&full);
        let second = pipeline.evaluate(&short).into_message();

        assert!(ok.passed());
        assert_eq!(first, second);
    }

    #[test]
    fn test_nested_pipeline() {
        let inner = CompositeRule::named("Shape")
            .with_rule(is_array())
            .with_rule(length_three());
        let outer = CompositeRule::named("Payload")
            .with_rule(not_empty())
            .with_rule(inner);

        assert!(outer.evaluate(&Value::from(vec!["a", "b", "c"])).passed());
        assert_eq!(
            outer.evaluate(&Value::from("abc")).message(),
            Some("Payload: Validation step: Shape: Validation step: KindRule: The value is of incorrect class.")
        );
    }

    #[test]
    fn test_try_add_rejects_number() {
        let mut pipeline = pipeline();
        let before = pipeline.len();

        let err = pipeline.try_add_rule(Box::new(7_i32)).map(|_| ()).unwrap_err();

        assert_eq!(err, InvalidRuleError);
        assert_eq!(pipeline.len(), before);
    }

    #[test]
    fn test_try_add_rejects_unknown_type() {
        struct NotARule;

        let mut pipeline = CompositeRule::<Value>::new();
        assert!(pipeline.try_add_rule(Box::new(NotARule)).is_err());
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_try_add_accepts_builtin_rules() {
        let mut pipeline = CompositeRule::<Value>::new();
        pipeline
            .try_add_rule(Box::new(not_empty()))
            .and_then(|p| p.try_add_rule(Box::new(is_array())))
            .unwrap();

        assert_eq!(
            pipeline.names().collect::<Vec<_>>(),
            ["NotEmptyRule", "KindRule"]
        );
        assert!(pipeline.evaluate(&Value::from(vec![1])).passed());
        assert_eq!(
            pipeline.evaluate(&Value::Null).message(),
            Some("CompositeRule: Validation step: NotEmptyRule: The value must not be empty.")
        );
        assert_eq!(
            pipeline.evaluate(&Value::object()).message(),
            Some("CompositeRule: Validation step: KindRule: The value is of incorrect class.")
        );
    }

    #[test]
    fn test_try_add_builtin_on_native_strings() {
        let mut pipeline = CompositeRule::<str>::named("Name");
        pipeline
            .try_add_rule(Box::new(not_empty()))
            .and_then(|p| p.try_add_rule(Box::new(KindRule::new(crate::value::Kind::String))))
            .unwrap();

        assert!(pipeline.evaluate("Ada").passed());
        assert!(pipeline.evaluate("").failed());
    }

    #[test]
    fn test_try_add_accepts_erased_spy() {
        let spy = SpyRule::new(not_empty());
        let erased: Box<dyn Rule> = Box::new(spy.clone());

        let mut pipeline = CompositeRule::<Value>::new();
        pipeline.try_add_rule(Box::new(erased)).unwrap();
        pipeline.evaluate(&Value::from("x"));

        assert_eq!(spy.calls(), 1);
    }

    #[test]
    fn test_try_add_accepts_erased_rules() {
        let mut pipeline = CompositeRule::<Value>::new();
        let shared: Arc<dyn Rule> = Arc::new(not_empty());
        let boxed: Box<dyn Rule> = Box::new(is_array());

        pipeline
            .try_add_rule(Box::new(shared))
            .and_then(|p| p.try_add_rule(Box::new(boxed)))
            .and_then(|p| p.try_add_rule(Box::new(length_three())))
            .and_then(|p| p.try_add_rule(Box::new(NoopRule::new("Noop"))))
            .and_then(|p| p.try_add_rule(Box::new(CompositeRule::<Value>::named("Inner"))))
            .unwrap();

        assert_eq!(
            pipeline.names().collect::<Vec<_>>(),
            ["NotEmptyRule", "KindRule", "LengthRule", "Noop", "Inner"]
        );
        assert!(pipeline.evaluate(&Value::from(vec![1, 2, 3])).passed());
    }

    #[test]
    fn test_shared_member_across_pipelines() {
        let required: Arc<dyn Rule> = Arc::new(not_empty());
        let a: CompositeRule = [Arc::clone(&required)].into_iter().collect();
        let mut b = CompositeRule::named("B");
        b.add_shared(required).add_rule(is_array());

        assert!(a.evaluate(&Value::from("x")).passed());
        assert!(b.evaluate(&Value::from("x")).failed());
    }

    #[test]
    fn test_clone_shares_members() {
        let original = pipeline();
        let mut copy = original.clone();
        copy.add_rule(NoopRule::new("Extra"));

        assert_eq!(original.len(), 3);
        assert_eq!(copy.len(), 4);
    }

    #[test]
    fn test_debug_lists_member_names() {
        let debug = format!("{:?}", pipeline());
        assert!(debug.contains("NotEmptyRule"));
        assert!(debug.contains("LengthRule"));
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[traced_test]
        #[test]
        fn test_short_circuit_is_logged() {
            let value = Value::from(vec![1]);
            assert!(pipeline().evaluate(&value).failed());

            assert!(logs_contain("pipeline short-circuited"));
            assert!(logs_contain("LengthRule"));
        }

        #[traced_test]
        #[test]
        fn test_passing_pipeline_does_not_short_circuit() {
            let value = Value::from(vec![1, 2, 3]);
            assert!(pipeline().evaluate(&value).passed());

            assert!(logs_contain("evaluated pipeline step"));
            assert!(!logs_contain("pipeline short-circuited"));
        }

        #[traced_test]
        #[test]
        fn test_rejected_registration_is_logged() {
            let mut pipeline = CompositeRule::<Value>::new();
            assert!(pipeline.try_add_rule(Box::new(true)).is_err());

            assert!(logs_contain("rejected non-rule registration"));
        }
    }

    #[test]
    fn test_concurrent_evaluation() {
        let pipeline = Arc::new(pipeline());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let pipeline = Arc::clone(&pipeline);
                std::thread::spawn(move || {
                    let value = if i % 2 == 0 {
                        Value::from(vec![1, 2, 3])
                    } else {
                        Value::from(vec![1, 2])
                    };
                    (i, pipeline.evaluate(&value).into_message())
                })
            })
            .collect();

        for handle in handles {
            let (i, message) = handle.join().unwrap();
            if i % 2 == 0 {
                assert_eq!(message, None);
            } else {
                assert!(message.unwrap().contains("LengthRule"));
            }
        }
    }
}

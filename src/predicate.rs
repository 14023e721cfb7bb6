//! Composable boolean checks
//!
//! A [`Predicate`] is the boolean half of a rule: it decides, and nothing
//! else. Closures of shape `Fn(&T) -> bool` are predicates already, and any
//! two predicates over the same type can be combined with `and`, `or` and
//! `not` before being handed to a [`CustomRule`](crate::rules::CustomRule).
//!
//! # Example
//!
//! ```rust
//! use rulepipe::predicate::{Predicate, PredicateExt};
//! use rulepipe::Value;
//!
//! let short = |v: &Value| v.len().is_some_and(|n| n <= 3);
//! let non_empty = |v: &Value| v.len().is_some_and(|n| n > 0);
//!
//! let p = short.and(non_empty);
//! assert!(p.check(&Value::from("abc")));
//! assert!(!p.check(&Value::from("")));
//! ```

/// A boolean check over values of type `T`.
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Check if the value satisfies this predicate.
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// Method-chaining combinators for any [`Predicate`].
pub trait PredicateExt<T: ?Sized>: Predicate<T> + Sized {
    /// True only when both predicates are true. `other` is skipped when
    /// `self` already failed.
    fn and<P: Predicate<T>>(self, other: P) -> And<Self, P> {
        And(self, other)
    }

    /// True when either predicate is true.
    fn or<P: Predicate<T>>(self, other: P) -> Or<Self, P> {
        Or(self, other)
    }

    /// Inverts the predicate.
    ///
    /// ```rust
    /// use rulepipe::predicate::{Predicate, PredicateExt};
    ///
    /// let is_zero = |n: &i32| *n == 0;
    /// assert!(is_zero.not().check(&4));
    /// ```
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<T: ?Sized, P: Predicate<T>> PredicateExt<T> for P {}

/// Both predicates; see [`PredicateExt::and`].
#[derive(Clone, Copy, Debug)]
pub struct And<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for And<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) && self.1.check(value)
    }
}

/// Either predicate. The right side is not checked once the left passes.
#[derive(Clone, Copy, Debug)]
pub struct Or<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for Or<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) || self.1.check(value)
    }
}

/// The negation of a predicate.
#[derive(Clone, Copy, Debug)]
pub struct Not<P>(pub P);

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        !self.0.check(value)
    }
}

//! Kind identity rule

use std::time::SystemTime;

use crate::rule::{Rule, Verdict};
use crate::value::{Kind, Value};

/// Types that expose a runtime [`Kind`].
///
/// `None` means the value has no discoverable kind (undefined, null, a
/// missing `Option`). Such values never match any kind.
pub trait Typed {
    /// The runtime kind of this value.
    fn kind(&self) -> Option<Kind>;
}

impl Typed for Value {
    fn kind(&self) -> Option<Kind> {
        Value::kind(self)
    }
}

impl Typed for bool {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::Boolean)
    }
}

impl Typed for str {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::String)
    }
}

impl Typed for String {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::String)
    }
}

impl Typed for SystemTime {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::Date)
    }
}

impl<V> Typed for Vec<V> {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::Array)
    }
}

impl<V> Typed for [V] {
    fn kind(&self) -> Option<Kind> {
        Some(Kind::Array)
    }
}

impl<V: Typed> Typed for Option<V> {
    fn kind(&self) -> Option<Kind> {
        self.as_ref().and_then(Typed::kind)
    }
}

macro_rules! typed_number {
    ($($t:ty),*) => {
        $(
            impl Typed for $t {
                fn kind(&self) -> Option<Kind> {
                    Some(Kind::Number)
                }
            }
        )*
    };
}

typed_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

/// Passes when the value's kind is exactly the target kind.
///
/// # Example
///
/// ```rust
/// use rulepipe::prelude::*;
///
/// let rule = KindRule::new(Kind::Array);
/// assert!(rule.evaluate(&Value::from(vec![1, 2, 3])).passed());
/// assert!(rule.evaluate(&Value::object()).failed());
/// assert!(rule.evaluate(&Value::Null).failed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindRule {
    target: Kind,
    message: Option<String>,
}

impl KindRule {
    /// Rule name.
    pub const NAME: &'static str = "KindRule";
    /// Default error message.
    pub const MESSAGE: &'static str = "The value is of incorrect class.";

    /// Create a rule matching `target`.
    pub const fn new(target: Kind) -> Self {
        Self {
            target,
            message: None,
        }
    }

    /// Override the error message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The kind this rule accepts.
    pub fn target(&self) -> Kind {
        self.target
    }
}

impl<T: Typed + ?Sized> Rule<T> for KindRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn error_message(&self) -> &str {
        self.message.as_deref().unwrap_or(Self::MESSAGE)
    }

    fn verdict(&self, value: &T) -> Verdict {
        (value.kind() == Some(self.target)).into()
    }
}

//! AND combinator - type-narrowing conjunction of rules
//!
//! This module provides the [`And`] combinator which chains two rules: the
//! right rule consumes whatever the left rule produced, so every step may
//! narrow the value's type (`Option<String>` -> `String` -> `i64`).
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::combinators::And;
//! use verity_validator::foundation::Rule;
//!
//! let rule = And::new(not_none::<Form, String>(), not_empty());
//! assert!(rule.check(Some("x".to_string()), &form));
//! assert!(!rule.check(None, &form)); // fails not_none, not_empty never runs
//! ```

use std::borrow::Cow;

use crate::foundation::{Failure, Rule};

/// Chains two rules with logical AND.
///
/// The right rule is only evaluated if the left rule succeeded. A failure is
/// reported exactly as the failing side reported it, so the attribution
/// always points at a leaf.
///
/// # Type Parameters
///
/// * `L` - The left (first) rule type
/// * `R` - The right (second) rule type, consuming `L::Output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R> {
    /// The left (first) rule.
    pub(crate) left: L,
    /// The right (second) rule.
    pub(crate) right: R,
}

impl<L, R> And<L, R> {
    /// Creates a new `And` combinator.
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Returns a reference to the left rule.
    pub fn left(&self) -> &L {
        &self.left
    }

    /// Returns a reference to the right rule.
    pub fn right(&self) -> &R {
        &self.right
    }

    /// Extracts the left and right rules.
    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R> Rule for And<L, R>
where
    L: Rule,
    R: Rule<Subject = L::Subject, Input = L::Output>,
{
    type Subject = L::Subject;
    type Input = L::Input;
    type Output = R::Output;

    fn apply(
        &self,
        value: Self::Input,
        subject: &Self::Subject,
    ) -> Result<Self::Output, Failure<'_, Self::Subject>> {
        let intermediate = self.left.apply(value, subject)?;
        self.right.apply(intermediate, subject)
    }

    fn describe(&self) -> Cow<'_, str> {
        let left = self.left.describe();
        let right = self.right.describe();
        match (left.is_empty(), right.is_empty()) {
            (true, _) => right,
            (_, true) => left,
            _ => Cow::Owned(format!("{left} and {right}")),
        }
    }
}

/// Creates an `And` combinator from two rules.
pub fn and<L, R>(left: L, right: R) -> And<L, R>
where
    L: Rule,
    R: Rule<Subject = L::Subject, Input = L::Output>,
{
    And::new(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Predicate;
    use crate::combinators::Identity;
    use crate::foundation::RuleExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Subject;

    fn counting(pass: bool, calls: &Arc<AtomicUsize>, label: &'static str) -> Predicate<Subject, i32> {
        let calls = Arc::clone(calls);
        Predicate::test(move |_: &i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            pass
        })
        .display(label)
        .build()
        .unwrap()
    }

    #[test]
    fn test_and_both_pass() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = And::new(counting(true, &calls, "a"), counting(true, &calls, "b"));
        assert_eq!(rule.apply(7, &Subject).unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_and_left_fails_short_circuits() {
        let left_calls = Arc::new(AtomicUsize::new(0));
        let right_calls = Arc::new(AtomicUsize::new(0));
        let left = counting(false, &left_calls, "a");
        let right = counting(true, &right_calls, "b");

        let rule = And::new(&left, &right);
        let failure = rule.apply(7, &Subject).unwrap_err();

        assert!(failure.is(&left));
        assert!(!failure.is(&right));
        assert_eq!(left_calls.load(Ordering::SeqCst), 1);
        assert_eq!(right_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_and_right_failure_is_attributed_to_right() {
        let calls = Arc::new(AtomicUsize::new(0));
        let left = counting(true, &calls, "a");
        let right = counting(false, &calls, "b");

        let rule = (&left).and(&right);
        let failure = rule.apply(7, &Subject).unwrap_err();
        assert!(failure.is(&right));
        assert_eq!(failure.describe(), "b");
    }

    #[test]
    fn test_and_narrows_type() {
        let parse = Predicate::<Subject, String, i64>::try_map(|s: String| s.parse().ok())
            .display("parses")
            .build()
            .unwrap();
        let positive = Predicate::<Subject, i64>::test(|v: &i64| *v > 0)
            .display("is positive")
            .build()
            .unwrap();

        let rule = and(parse, positive);
        assert_eq!(rule.apply("42".to_string(), &Subject).unwrap(), 42);
        assert!(!rule.check("-1".to_string(), &Subject));
        assert!(!rule.check("x".to_string(), &Subject));
        assert_eq!(rule.describe(), "parses and is positive");
    }

    #[test]
    fn test_describe_skips_identity() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = Identity::<Subject, i32>::new().and(counting(true, &calls, "a"));
        assert_eq!(rule.describe(), "a");

        let rule = counting(true, &calls, "a").and(Identity::new());
        assert_eq!(rule.describe(), "a");
    }
}

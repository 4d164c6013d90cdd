//! Core traits for the constraint algebra
//!
//! Three levels of constraint exist:
//!
//! - [`Constraint`] - a pure predicate over a value;
//! - [`SubjectConstraint`] - a predicate that may also look at the enclosing
//!   subject (cross-field checks);
//! - [`Rule`] - an error-carrying constraint: on success it hands the
//!   (possibly transformed) value on, on failure it names the exact leaf that
//!   rejected it.
//!
//! Chains are built with [`RuleExt::and`], which narrows the value type at
//! each step.

use std::borrow::Cow;
use std::sync::Arc;

use crate::combinators::{And, WithMessage};
use crate::foundation::{Failure, MessageTemplate};

// ============================================================================
// PLAIN CONSTRAINTS
// ============================================================================

/// A pure predicate over a value.
///
/// Every `Fn(&T) -> bool` closure is a constraint.
///
/// # Examples
///
/// ```rust,ignore
/// use verity_validator::foundation::Constraint;
///
/// let positive = |v: &i32| *v > 0;
/// assert!(positive.is_satisfied_by(&3));
/// ```
pub trait Constraint<T: ?Sized> {
    /// Returns true if `value` satisfies the constraint.
    fn is_satisfied_by(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Constraint<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_satisfied_by(&self, value: &T) -> bool {
        self(value)
    }
}

/// A predicate that depends on both the value and the enclosing subject.
pub trait SubjectConstraint<S: ?Sized, T: ?Sized> {
    /// Returns true if `value`, taken from `subject`, satisfies the constraint.
    fn is_satisfied_by(&self, value: &T, subject: &S) -> bool;
}

// ============================================================================
// ERROR-CARRYING RULES
// ============================================================================

/// An error-carrying constraint.
///
/// A rule consumes a value of type [`Input`](Rule::Input), checks it in the
/// context of a [`Subject`](Rule::Subject) and either yields an
/// [`Output`](Rule::Output) (the same value, or a narrowed/derived one) or a
/// [`Failure`] naming the constraint that rejected it.
///
/// Rules never panic for data reasons: a value that does not satisfy the
/// rule is an `Err`, not a crash.
pub trait Rule: Send + Sync {
    /// The subject the checked value was taken from.
    type Subject;
    /// The value this rule consumes.
    type Input;
    /// The value this rule hands on after success.
    type Output;

    /// Checks `value` and transforms it on success.
    fn apply(
        &self,
        value: Self::Input,
        subject: &Self::Subject,
    ) -> Result<Self::Output, Failure<'_, Self::Subject>>;

    /// Diagnostic description of the rule. Empty for the identity rule.
    fn describe(&self) -> Cow<'_, str>;

    /// Returns true if `value` passes, discarding the output.
    fn check(&self, value: Self::Input, subject: &Self::Subject) -> bool {
        self.apply(value, subject).is_ok()
    }
}

/// A type-erased, shareable rule chain.
pub type SharedRule<S, V, R> = Arc<dyn Rule<Subject = S, Input = V, Output = R>>;

impl<T: Rule + ?Sized> Rule for &T {
    type Subject = T::Subject;
    type Input = T::Input;
    type Output = T::Output;

    fn apply(
        &self,
        value: Self::Input,
        subject: &Self::Subject,
    ) -> Result<Self::Output, Failure<'_, Self::Subject>> {
        (**self).apply(value, subject)
    }

    fn describe(&self) -> Cow<'_, str> {
        (**self).describe()
    }
}

impl<T: Rule + ?Sized> Rule for Arc<T> {
    type Subject = T::Subject;
    type Input = T::Input;
    type Output = T::Output;

    fn apply(
        &self,
        value: Self::Input,
        subject: &Self::Subject,
    ) -> Result<Self::Output, Failure<'_, Self::Subject>> {
        (**self).apply(value, subject)
    }

    fn describe(&self) -> Cow<'_, str> {
        (**self).describe()
    }
}

impl<T: Rule + ?Sized> Rule for Box<T> {
    type Subject = T::Subject;
    type Input = T::Input;
    type Output = T::Output;

    fn apply(
        &self,
        value: Self::Input,
        subject: &Self::Subject,
    ) -> Result<Self::Output, Failure<'_, Self::Subject>> {
        (**self).apply(value, subject)
    }

    fn describe(&self) -> Cow<'_, str> {
        (**self).describe()
    }
}

// ============================================================================
// RULE EXTENSION TRAIT
// ============================================================================

/// Combinator methods for rules.
///
/// Automatically implemented for every [`Rule`].
///
/// # Examples
///
/// ```rust,ignore
/// use verity_validator::prelude::*;
///
/// // String -> i64 -> i64
/// let port = parses::<Config, i64>().and(in_range(1, 65535));
/// ```
pub trait RuleExt: Rule + Sized {
    /// Chains `next` after this rule.
    ///
    /// `next` only runs if this rule succeeded, and receives its output.
    fn and<N>(self, next: N) -> And<Self, N>
    where
        N: Rule<Subject = Self::Subject, Input = Self::Output>,
    {
        And::new(self, next)
    }

    /// Replaces the error message reported when this rule fails.
    fn with_message(self, message: MessageTemplate) -> WithMessage<Self> {
        WithMessage::new(self, message)
    }

    /// Erases the rule's type so it can be stored and shared.
    fn shared(self) -> SharedRule<Self::Subject, Self::Input, Self::Output>
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<T: Rule> RuleExt for T {}

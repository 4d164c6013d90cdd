//! Failure attribution
//!
//! When a chain fails, the caller needs the *leaf* that failed, not the
//! composite around it: the leaf owns the message template and the argument
//! list. [`Failure`] is a borrowed handle to that leaf.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{FormatProvider, MessageArgs, MessageTemplate};
use crate::member::MemberPath;

/// A constraint that can explain its own failure.
pub trait Diagnostic<S> {
    /// The error-message template of this constraint.
    fn message(&self) -> &MessageTemplate;

    /// Message arguments, computed against the subject being validated.
    fn arguments(&self, subject: &S) -> MessageArgs;

    /// Human-readable description, for diagnostics only.
    fn describe(&self) -> Cow<'_, str>;
}

/// Handle to the specific constraint that rejected a value.
///
/// The message may be overridden by an enclosing
/// [`WithMessage`](crate::combinators::WithMessage); attribution and
/// arguments always stay with the leaf.
pub struct Failure<'r, S> {
    source: &'r dyn Diagnostic<S>,
    message: Option<&'r MessageTemplate>,
}

impl<'r, S> Failure<'r, S> {
    /// Creates a failure attributed to `source`.
    pub fn new(source: &'r dyn Diagnostic<S>) -> Self {
        Self {
            source,
            message: None,
        }
    }

    /// Replaces the message template, keeping the failed leaf.
    #[must_use]
    pub fn with_message(self, message: &'r MessageTemplate) -> Self {
        Self {
            message: Some(message),
            ..self
        }
    }

    /// The message template to render: the override if any, else the leaf's.
    #[must_use]
    pub fn message(&self) -> &'r MessageTemplate {
        match self.message {
            Some(message) => message,
            None => self.source.message(),
        }
    }

    /// The failed constraint's arguments for `subject`.
    pub fn arguments(&self, subject: &S) -> MessageArgs {
        self.source.arguments(subject)
    }

    /// The failed constraint's description.
    #[must_use]
    pub fn describe(&self) -> Cow<'r, str> {
        self.source.describe()
    }

    /// Returns true if `constraint` is the exact instance that failed.
    pub fn is<D>(&self, constraint: &D) -> bool
    where
        D: Diagnostic<S> + ?Sized,
    {
        std::ptr::addr_eq(self.source, constraint)
    }

    /// Formats the failure message for `member`.
    pub fn render(&self, member: &MemberPath, subject: &S, provider: &dyn FormatProvider) -> String {
        self.message()
            .format(member, &self.arguments(subject), provider)
    }
}

impl<S> Clone for Failure<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Failure<'_, S> {}

impl<S> fmt::Debug for Failure<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("constraint", &self.describe())
            .field("message", &self.message().source())
            .finish()
    }
}

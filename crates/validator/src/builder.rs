//! Leaf-rule builder
//!
//! Every concrete check enters the algebra through [`Predicate`]: a check
//! function (optionally fused with a value transformation), a display text
//! for diagnostics, a message template and the template's arguments.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::builder::Predicate;
//!
//! let adult = Predicate::<Person, i32>::test(|age| *age >= 18)
//!     .display("is adult")
//!     .message("{member} must be at least {arg.min}")
//!     .arg("min", 18)
//!     .build()?;
//!
//! // Transforming predicate: String -> u16
//! let port = Predicate::<Config, String, u16>::try_map(|s| s.parse().ok())
//!     .message("{member} must be a port number")
//!     .build()?;
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::foundation::message::builtin;
use crate::foundation::{
    ArgValue, Constraint, ContractError, Diagnostic, Failure, MessageArgs, MessageTemplate, Rule,
    SubjectConstraint,
};

/// Message used when a predicate is built without one.
pub const DEFAULT_MESSAGE: &str = "{member} is not valid";

type CheckFn<S, V, R> = Arc<dyn Fn(V, &S) -> Option<R> + Send + Sync>;
type ArgsFn<S> = Arc<dyn Fn(&S) -> MessageArgs + Send + Sync>;

// ============================================================================
// PREDICATE
// ============================================================================

/// A leaf rule.
///
/// `S` is the subject, `V` the checked value and `R` the value handed on
/// when the check passes (`V` unless the predicate transforms).
pub struct Predicate<S, V, R = V> {
    check: CheckFn<S, V, R>,
    display: Cow<'static, str>,
    message: MessageTemplate,
    fixed: MessageArgs,
    computed: Option<ArgsFn<S>>,
}

impl<S, V> Predicate<S, V>
where
    S: 'static,
    V: 'static,
{
    /// Starts a predicate over the value alone.
    pub fn test<F>(check: F) -> PredicateBuilder<S, V>
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        PredicateBuilder::new(Arc::new(move |value: V, _: &S| {
            check(&value).then_some(value)
        }))
    }

    /// Starts a predicate that may also look at the subject.
    pub fn test_with_subject<F>(check: F) -> PredicateBuilder<S, V>
    where
        F: Fn(&V, &S) -> bool + Send + Sync + 'static,
    {
        PredicateBuilder::new(Arc::new(move |value: V, subject: &S| {
            check(&value, subject).then_some(value)
        }))
    }

    /// Starts a predicate from any [`Constraint`].
    pub fn from_constraint<C>(constraint: C) -> PredicateBuilder<S, V>
    where
        C: Constraint<V> + Send + Sync + 'static,
    {
        PredicateBuilder::new(Arc::new(move |value: V, _: &S| {
            constraint.is_satisfied_by(&value).then_some(value)
        }))
    }
}

impl<S, V, R> Predicate<S, V, R>
where
    S: 'static,
    V: 'static,
    R: 'static,
{
    /// Starts a transforming predicate: `None` means the check failed.
    pub fn try_map<F>(transform: F) -> PredicateBuilder<S, V, R>
    where
        F: Fn(V) -> Option<R> + Send + Sync + 'static,
    {
        PredicateBuilder::new(Arc::new(move |value: V, _: &S| transform(value)))
    }

    /// Starts a transforming predicate that may also look at the subject.
    pub fn try_map_with_subject<F>(transform: F) -> PredicateBuilder<S, V, R>
    where
        F: Fn(V, &S) -> Option<R> + Send + Sync + 'static,
    {
        PredicateBuilder::new(Arc::new(transform))
    }
}

impl<S, V, R> Predicate<S, V, R> {
    /// Returns the parsed message template.
    pub fn message_template(&self) -> &MessageTemplate {
        &self.message
    }
}

impl<S, V, R> Clone for Predicate<S, V, R> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            display: self.display.clone(),
            message: self.message.clone(),
            fixed: self.fixed.clone(),
            computed: self.computed.clone(),
        }
    }
}

impl<S, V, R> fmt::Debug for Predicate<S, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("display", &self.display)
            .field("message", &self.message.source())
            .field("args", &self.fixed)
            .finish_non_exhaustive()
    }
}

impl<S, V, R> Diagnostic<S> for Predicate<S, V, R> {
    fn message(&self) -> &MessageTemplate {
        &self.message
    }

    fn arguments(&self, subject: &S) -> MessageArgs {
        let mut args = self.fixed.clone();
        if let Some(computed) = &self.computed {
            args.extend(computed(subject));
        }
        args
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.display)
    }
}

impl<S, V, R> Rule for Predicate<S, V, R> {
    type Subject = S;
    type Input = V;
    type Output = R;

    fn apply(&self, value: V, subject: &S) -> Result<R, Failure<'_, S>> {
        (self.check)(value, subject).ok_or_else(|| Failure::new(self))
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.display)
    }
}

impl<S, V: Clone, R> SubjectConstraint<S, V> for Predicate<S, V, R> {
    fn is_satisfied_by(&self, value: &V, subject: &S) -> bool {
        (self.check)(value.clone(), subject).is_some()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

enum PendingMessage {
    Default,
    Text(Cow<'static, str>),
    Parsed(MessageTemplate),
}

/// Builder returned by the [`Predicate`] constructors.
#[must_use = "builder methods must be chained or built"]
pub struct PredicateBuilder<S, V, R = V> {
    check: CheckFn<S, V, R>,
    display: Cow<'static, str>,
    message: PendingMessage,
    fixed: MessageArgs,
    computed: Option<ArgsFn<S>>,
}

impl<S, V, R> PredicateBuilder<S, V, R> {
    fn new(check: CheckFn<S, V, R>) -> Self {
        Self {
            check,
            display: Cow::Borrowed("predicate"),
            message: PendingMessage::Default,
            fixed: MessageArgs::new(),
            computed: None,
        }
    }

    /// Sets the diagnostic description.
    pub fn display(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.display = text.into();
        self
    }

    /// Sets the message template text, parsed by [`build`](Self::build).
    pub fn message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.message = PendingMessage::Text(template.into());
        self
    }

    /// Sets an already parsed message template.
    pub fn template(mut self, template: MessageTemplate) -> Self {
        self.message = PendingMessage::Parsed(template);
        self
    }

    /// Adds a fixed message argument.
    pub fn arg(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<ArgValue>) -> Self {
        self.fixed.push((key.into(), value.into()));
        self
    }

    /// Adds arguments computed from the subject at failure time.
    pub fn args_from<F>(mut self, args: F) -> Self
    where
        F: Fn(&S) -> MessageArgs + Send + Sync + 'static,
    {
        self.computed = Some(Arc::new(args));
        self
    }

    /// Builds the predicate, parsing its message template.
    ///
    /// # Errors
    ///
    /// [`ContractError::MalformedTemplate`] if the template does not parse.
    pub fn build(self) -> Result<Predicate<S, V, R>, ContractError> {
        let message = match self.message {
            PendingMessage::Default => builtin(DEFAULT_MESSAGE),
            PendingMessage::Text(text) => MessageTemplate::parse(text)?,
            PendingMessage::Parsed(template) => template,
        };
        Ok(Predicate {
            check: self.check,
            display: self.display,
            message,
            fixed: self.fixed,
            computed: self.computed,
        })
    }

    /// Builds a predicate whose template is a crate constant.
    pub(crate) fn build_builtin(self, template: &'static str) -> Predicate<S, V, R> {
        Predicate {
            check: self.check,
            display: self.display,
            message: builtin(template),
            fixed: self.fixed,
            computed: self.computed,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::InvariantFormat;
    use crate::member::MemberPath;

    struct Account {
        limit: i64,
    }

    #[test]
    fn test_default_message() {
        let rule = Predicate::<Account, i64>::test(|v| *v > 0).build().unwrap();
        assert_eq!(rule.message_template().source(), DEFAULT_MESSAGE);

        let failure = rule.apply(-1, &Account { limit: 0 }).unwrap_err();
        let text = failure.render(&MemberPath::root("balance"), &Account { limit: 0 }, &InvariantFormat);
        assert_eq!(text, "balance is not valid");
    }

    #[test]
    fn test_malformed_template_fails_at_build() {
        let error = Predicate::<Account, i64>::test(|_| true)
            .message("{member")
            .build()
            .unwrap_err();
        assert!(error.is_malformed_template());
    }

    #[test]
    fn test_subject_aware_predicate_with_computed_args() {
        let rule = Predicate::<Account, i64>::test_with_subject(|v, a| *v <= a.limit)
            .display("within limit")
            .message("{member} must not exceed {arg.limit} ({arg.currency})")
            .arg("currency", "EUR")
            .args_from(|a: &Account| {
                let mut args = MessageArgs::new();
                args.push(("limit".into(), a.limit.into()));
                args
            })
            .build()
            .unwrap();

        let account = Account { limit: 100 };
        assert!(rule.check(100, &account));

        let failure = rule.apply(250, &account).unwrap_err();
        assert!(failure.is(&rule));
        assert_eq!(
            failure.render(&MemberPath::root("amount"), &account, &InvariantFormat),
            "amount must not exceed 100 (EUR)"
        );
    }

    #[test]
    fn test_try_map_transforms() {
        let rule = Predicate::<Account, String, i64>::try_map(|s| s.trim().parse().ok())
            .display("parses")
            .build()
            .unwrap();
        assert_eq!(rule.apply(" 12 ".to_string(), &Account { limit: 0 }).unwrap(), 12);
        assert!(rule.apply("twelve".to_string(), &Account { limit: 0 }).is_err());
    }

    #[test]
    fn test_as_subject_constraint() {
        let rule = Predicate::<Account, i64>::from_constraint(|v: &i64| *v % 2 == 0)
            .build()
            .unwrap();
        let account = Account { limit: 0 };
        assert!(SubjectConstraint::is_satisfied_by(&rule, &4, &account));
        assert!(!SubjectConstraint::is_satisfied_by(&rule, &3, &account));
    }
}

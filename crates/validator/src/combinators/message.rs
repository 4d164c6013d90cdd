//! MESSAGE combinator - custom error messages

use std::borrow::Cow;

use crate::foundation::{ContractError, Failure, MessageTemplate, Rule};

// ============================================================================
// WITH MESSAGE COMBINATOR
// ============================================================================

/// Replaces the error message of a rule.
///
/// The failure is still attributed to the leaf that rejected the value and
/// still carries that leaf's arguments, so an override can reference them:
///
/// ```rust,ignore
/// use verity_validator::combinators::with_message;
/// use verity_validator::validators::at_least;
///
/// let rule = with_message(at_least(18), "{member} must be an adult (>= {arg.min})")?;
/// ```
#[derive(Debug, Clone)]
pub struct WithMessage<R> {
    inner: R,
    message: MessageTemplate,
}

impl<R> WithMessage<R> {
    /// Creates a new `WithMessage` combinator from a parsed template.
    pub fn new(inner: R, message: MessageTemplate) -> Self {
        Self { inner, message }
    }

    /// Returns a reference to the inner rule.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Returns the override template.
    pub fn message(&self) -> &MessageTemplate {
        &self.message
    }

    /// Extracts the inner rule.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Rule> Rule for WithMessage<R> {
    type Subject = R::Subject;
    type Input = R::Input;
    type Output = R::Output;

    fn apply(
        &self,
        value: Self::Input,
        subject: &Self::Subject,
    ) -> Result<Self::Output, Failure<'_, Self::Subject>> {
        self.inner
            .apply(value, subject)
            .map_err(|failure| failure.with_message(&self.message))
    }

    fn describe(&self) -> Cow<'_, str> {
        self.inner.describe()
    }
}

/// Creates a `WithMessage` combinator, parsing `message` first.
pub fn with_message<R>(rule: R, message: impl Into<String>) -> Result<WithMessage<R>, ContractError> {
    Ok(WithMessage::new(rule, MessageTemplate::parse(message)?))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Predicate;
    use crate::foundation::InvariantFormat;
    use crate::member::MemberPath;

    struct Form;

    fn min_length(min: usize) -> Predicate<Form, String> {
        Predicate::test(move |s: &String| s.len() >= min)
            .display(format!("min length {min}"))
            .message("{member} must be at least {arg.min} characters")
            .arg("min", min)
            .build()
            .unwrap()
    }

    #[test]
    fn test_with_message_success() {
        let rule = with_message(min_length(3), "Custom message").unwrap();
        assert!(rule.check("hello".to_string(), &Form));
    }

    #[test]
    fn test_with_message_replaces_message_keeps_arguments() {
        let rule = with_message(min_length(10), "Password too short (min {arg.min})").unwrap();
        let failure = rule.apply("short".to_string(), &Form).unwrap_err();

        assert!(failure.is(rule.inner()));
        assert_eq!(
            failure.render(&MemberPath::root("password"), &Form, &InvariantFormat),
            "Password too short (min 10)"
        );
    }

    #[test]
    fn test_with_message_rejects_malformed_template() {
        let error = with_message(min_length(1), "{member").unwrap_err();
        assert!(error.is_malformed_template());
    }

    #[test]
    fn test_describe_is_inner() {
        let rule = with_message(min_length(2), "x").unwrap();
        assert_eq!(rule.describe(), "min length 2");
    }
}

//! Contract violations
//!
//! Validation failures are data: they end up in an
//! [`ErrorReport`](crate::report::ErrorReport) and are never returned as `Err`.
//! A [`ContractError`] is the other taxonomy: the caller used the API wrongly
//! (an empty or dotted member name, a malformed message template, extending a member
//! that was never opened). These are reported at the point of misuse and are
//! never added to a report.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::foundation::{ContractError, MessageTemplate};
//!
//! let err = MessageTemplate::parse("{member must not be empty").unwrap_err();
//! assert!(err.is_malformed_template());
//! ```

use std::borrow::Cow;

/// A programming error detected while declaring or evaluating constraints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ContractError {
    /// A member was opened with an empty name.
    #[error("member name must not be empty")]
    EmptyName,

    /// An error-message template could not be parsed.
    #[error("malformed message template {template:?} at offset {position}: {reason}")]
    MalformedTemplate {
        template: String,
        position: usize,
        reason: Cow<'static, str>,
    },

    /// A member name contained a path separator (`.`, `[` or `]`).
    ///
    /// Such names could collide with the full names of nested members.
    #[error("member name '{0}' must not contain '.', '[' or ']'")]
    InvalidName(String),

    /// A leaf rule was given a pattern that does not compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A chain was extended for a member that was never opened.
    #[error("no constraint chain is registered for member '{0}'")]
    UnknownMember(String),

    /// A chain was resumed with value types that differ from the registered ones.
    #[error("member '{full_name}' is not tracked as {expected}")]
    MemberTypeMismatch {
        full_name: String,
        expected: &'static str,
    },

    /// The same full name was written twice into one error accumulator.
    #[error("an error for member '{0}' was already recorded in this run")]
    DuplicateError(String),
}

// ============================================================================
// CONSTRUCTOR HELPERS
// ============================================================================

impl ContractError {
    /// Creates a template error at the given byte offset.
    pub fn malformed_template(
        template: impl Into<String>,
        position: usize,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::MalformedTemplate {
            template: template.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Creates an unknown-member error.
    pub fn unknown_member(full_name: impl Into<String>) -> Self {
        Self::UnknownMember(full_name.into())
    }

    /// Creates a duplicate-error error.
    pub fn duplicate_error(full_name: impl Into<String>) -> Self {
        Self::DuplicateError(full_name.into())
    }

    /// Returns true for template parse failures.
    #[must_use]
    pub fn is_malformed_template(&self) -> bool {
        matches!(self, Self::MalformedTemplate { .. })
    }

    /// Returns the member name this error refers to, if any.
    #[must_use]
    pub fn member_name(&self) -> Option<&str> {
        match self {
            Self::UnknownMember(name) | Self::DuplicateError(name) | Self::InvalidName(name) => {
                Some(name)
            }
            Self::MemberTypeMismatch { full_name, .. } => Some(full_name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_template_display() {
        let error = ContractError::malformed_template("{oops", 0, "unclosed placeholder");
        let display = error.to_string();
        assert!(display.contains("offset 0"));
        assert!(display.contains("unclosed placeholder"));
        assert!(error.is_malformed_template());
    }

    #[test]
    fn test_member_name() {
        assert_eq!(
            ContractError::unknown_member("address.zip").member_name(),
            Some("address.zip")
        );
        assert_eq!(ContractError::EmptyName.member_name(), None);
        assert_eq!(
            ContractError::InvalidName("address.zip".into()).member_name(),
            Some("address.zip")
        );
    }
}

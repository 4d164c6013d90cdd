//! Constraint algebra
//!
//! This module contains the fundamental building blocks every other part of
//! the crate is written against:
//!
//! - **Traits**: [`Constraint`], [`SubjectConstraint`], [`Rule`], [`RuleExt`]
//! - **Failures**: [`Failure`] and the [`Diagnostic`] contract of leaf rules
//! - **Messages**: [`MessageTemplate`], [`MessageArgs`], [`FormatProvider`]
//! - **Errors**: [`ContractError`] for programming errors
//!
//! # Architecture
//!
//! ## 1. Type narrowing
//!
//! A rule's output type becomes the next rule's input type, so a chain can
//! parse or unwrap as it goes:
//!
//! ```rust,ignore
//! // Option<String> -> String -> i64
//! let chain = not_none::<Form, String>().and(parses::<Form, i64>());
//! ```
//!
//! ## 2. Precise attribution
//!
//! A failing chain reports the leaf that failed, so its own message template
//! and arguments are used:
//!
//! ```rust,ignore
//! let err = chain.apply(Some("x".into()), &form).unwrap_err();
//! assert_eq!(err.message().source(), "{member} must be a valid {arg.type}");
//! ```
//!
//! ## 3. Two error taxonomies
//!
//! Validation failures are values. Misuse of the API is a [`ContractError`]
//! returned at the point of misuse.

pub mod error;
pub mod failure;
pub mod message;
pub mod traits;

pub use error::ContractError;
pub use failure::{Diagnostic, Failure};
pub use message::{ArgValue, FormatProvider, InvariantFormat, MessageArgs, MessageTemplate};
pub use traits::{Constraint, Rule, RuleExt, SharedRule, SubjectConstraint};

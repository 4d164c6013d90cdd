//! Nullable rules for `Option` values
//!
//! [`not_none`] unwraps: its output is the inner value, so the rest of the
//! chain works on `T` instead of `Option<T>`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! set.verify_that("nickname", |u: &User| u.nickname.clone())?
//!     .satisfies(not_none())
//!     .satisfies(not_empty());
//! ```

use crate::builder::Predicate;

/// Requires `Some`, handing on the inner value.
#[must_use]
pub fn not_none<S: 'static, T: 'static>() -> Predicate<S, Option<T>, T> {
    Predicate::try_map(|value: Option<T>| value)
        .display("is present")
        .build_builtin("{member} is required")
}

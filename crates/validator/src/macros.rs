//! Macros for declaring members with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`member!`] - a `(name, extractor)` pair derived from a field
//! - [`verify_that!`] - opens a field's chain on a set
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::{member, verify_that};
//! use verity_validator::prelude::*;
//!
//! let (name, extract) = member!(Person, name);
//! set.verify_that(name, extract)?.satisfies(not_empty());
//!
//! // Same thing in one step
//! verify_that!(set, Person => name)?.satisfies(not_empty());
//! ```

// ============================================================================
// MEMBER MACRO
// ============================================================================

/// Derives a member name and a cloning extractor from a field.
///
/// `member!(Person, name)` expands to
/// `("name", |subject: &Person| subject.name.clone())`.
#[macro_export]
macro_rules! member {
    ($subject:ty, $field:ident) => {
        (
            stringify!($field),
            |subject: &$subject| ::core::clone::Clone::clone(&subject.$field),
        )
    };
}

// ============================================================================
// VERIFY_THAT MACRO
// ============================================================================

/// Opens the chain of a field on a
/// [`MemberConstraintSet`](crate::tree::MemberConstraintSet).
///
/// `verify_that!(set, Person => age)` is
/// `set.verify_that("age", |subject: &Person| subject.age.clone())`.
#[macro_export]
macro_rules! verify_that {
    ($set:expr, $subject:ty => $field:ident) => {{
        let (name, extract) = $crate::member!($subject, $field);
        $set.verify_that(name, extract)
    }};
}

//! # verity-validator
//!
//! A composable, type-safe engine for validating the members of a subject.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! let mut set = MemberConstraintSet::<Person>::new();
//! set.verify_that("name", |p: &Person| p.name.clone())?
//!     .satisfies(not_empty());
//! set.verify_that("age", |p: &Person| p.age)?
//!     .satisfies(at_least(0));
//!
//! let report = set.validate(&Person { name: String::new(), age: -1 })?;
//! assert_eq!(report.get("name"), Some("name must not be empty"));
//! assert_eq!(report.get("age"), Some("age must be at least 0"));
//! ```
//!
//! ## Concepts
//!
//! - A [`Rule`](foundation::Rule) checks a value and hands on a (possibly
//!   narrowed) value; rules chain with [`RuleExt::and`](foundation::RuleExt::and).
//! - A [`Member`](member::Member) is a named value of the subject.
//! - A [`MemberConstraintSet`](tree::MemberConstraintSet) registers one chain
//!   per member, plus nested scopes for members that are themselves
//!   validated field by field.
//! - Evaluation collects every failure into an
//!   [`ErrorReport`](report::ErrorReport) keyed by full member name.
//!
//! ## Creating Rules
//!
//! Use [`Predicate`](builder::Predicate) for leaf checks, or the
//! [`validators`] catalog for common ones.
//!
//! ## Features
//!
//! - `serde` (default): `Serialize` for [`ErrorReport`](report::ErrorReport).

// Chains of And<And<Arc<dyn Rule<..>>, ..>, ..> are inherent to typed composition.
#![allow(clippy::type_complexity)]

pub mod builder;
pub mod combinators;
pub mod foundation;
mod macros;
pub mod member;
pub mod prelude;
pub mod report;
pub mod tree;
pub mod validators;

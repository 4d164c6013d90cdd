//! Prelude module for convenient imports.
//!
//! Provides a single `use verity_validator::prelude::*;` import that brings
//! in the traits, the tree types, the builder and the built-in rules.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! let mut set = MemberConstraintSet::<Person>::new();
//! set.verify_that("age", |p: &Person| p.age)?.satisfies(at_least(18));
//! ```

// ============================================================================
// FOUNDATION: Core traits, failures, messages
// ============================================================================

pub use crate::foundation::{
    ArgValue, Constraint, ContractError, Diagnostic, Failure, FormatProvider, InvariantFormat,
    MessageArgs, MessageTemplate, Rule, RuleExt, SharedRule, SubjectConstraint,
};

// ============================================================================
// BUILDING BLOCKS: Predicates, members, trees, reports
// ============================================================================

pub use crate::builder::{Predicate, PredicateBuilder};
pub use crate::member::{Member, MemberPath};
pub use crate::report::{ErrorAccumulator, ErrorReport};
pub use crate::tree::{
    ConstraintEvent, EntryInfo, EntryKind, MemberChain, MemberConstraint, MemberConstraintSet,
    Validated, validate_subject,
};

// ============================================================================
// VALIDATORS: All built-in rules
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Composition functions and types
// ============================================================================

pub use crate::combinators::{And, Identity, WithMessage, and, identity, with_message};

//! Validation trees
//!
//! A [`MemberConstraintSet`] is one scope of a validation tree: an ordered
//! registry of member constraints plus nested scopes. Chains are declared
//! through the [`MemberChain`] handle:
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! let mut set = MemberConstraintSet::<Person>::new();
//! set.verify_that("name", |p: &Person| p.name.clone())?
//!     .satisfies(not_empty());
//! set.verify_that("address", |p: &Person| p.address.clone())?
//!     .satisfies(not_none())
//!     .and(|address| {
//!         address
//!             .verify_that("zip", |a: &Address| a.zip.clone())?
//!             .satisfies(not_empty());
//!         Ok(())
//!     })?;
//!
//! let report = set.validate(&person)?;
//! assert_eq!(report.get("address.zip"), Some("address.zip must not be empty"));
//! ```
//!
//! Extending a chain replaces its registry entry in place, so a member keeps
//! its position however many rules it accumulates. Registry changes are
//! published as [`ConstraintEvent`]s; a nested scope is announced on its
//! parent once, as the child entry that owns it.

mod child;
mod constraint;
mod event;
mod set;

pub use child::ChildConstraintSet;
pub use constraint::{MemberChain, MemberConstraint};
pub use event::{ConstraintEvent, EntryInfo, EntryKind, Listener};
pub use set::{MemberConstraintSet, Validated, validate_subject};

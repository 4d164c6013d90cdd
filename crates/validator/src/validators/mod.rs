//! Built-in leaf rules
//!
//! A small catalog of ready-to-use rules, all built through
//! [`Predicate`](crate::builder::Predicate). Every function is generic over
//! the subject type `S`, so the same rule works in any scope.
//!
//! # Categories
//!
//! - **Strings**: [`not_empty`], [`not_blank`], [`matches`], [`parses`]
//! - **Numbers**: [`at_least`], [`at_most`], [`in_range`]
//! - **Collections**: [`min_len`], [`max_len`], [`element_at`]
//! - **Options**: [`not_none`]
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::prelude::*;
//!
//! // Option<String> -> String -> u16
//! let port = not_none().and(parses::<Config, u16>()).and(in_range(1, 65535));
//! ```

pub mod collection;
pub mod length;
pub mod nullable;
pub mod parse;
pub mod pattern;
pub mod range;

pub use collection::element_at;
pub use length::{max_len, min_len, not_blank, not_empty};
pub use nullable::not_none;
pub use parse::parses;
pub use pattern::matches;
pub use range::{at_least, at_most, in_range};

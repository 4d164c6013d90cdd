//! Rule combinators
//!
//! - [`And`] - sequential, type-narrowing conjunction with short-circuit
//! - [`Identity`] - the neutral element of `and`; every chain starts here
//! - [`WithMessage`] - replaces the message of whichever leaf fails

pub mod and;
pub mod identity;
pub mod message;

pub use and::{And, and};
pub use identity::{Identity, identity};
pub use message::{WithMessage, with_message};

//! IDENTITY rule - the neutral element of `and`
//!
//! Every newly opened member chain starts as [`Identity`], so the first call
//! to `satisfies` always has something to extend. For any rule `r`:
//!
//! - `identity().and(r)` behaves exactly like `r`;
//! - `r.and(identity())` behaves exactly like `r`.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Failure, Rule};

/// A rule that accepts every value and returns it unchanged.
///
/// Its description is empty, so it disappears from the description of any
/// chain it is part of.
pub struct Identity<S, V> {
    _marker: PhantomData<fn(&S, V) -> V>,
}

impl<S, V> Identity<S, V> {
    /// Creates the identity rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S, V> Default for Identity<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, V> Clone for Identity<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for Identity<S, V> {}

impl<S, V> fmt::Debug for Identity<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Identity")
    }
}

impl<S, V> Rule for Identity<S, V> {
    type Subject = S;
    type Input = V;
    type Output = V;

    #[inline]
    fn apply(&self, value: V, _subject: &S) -> Result<V, Failure<'_, S>> {
        Ok(value)
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// Creates the identity rule.
#[must_use]
pub const fn identity<S, V>() -> Identity<S, V> {
    Identity::new()
}

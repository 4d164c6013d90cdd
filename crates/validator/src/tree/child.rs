//! Nested validation scopes

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::foundation::{ContractError, FormatProvider};
use crate::member::Member;
use crate::report::ErrorAccumulator;
use crate::tree::event::EntryInfo;
use crate::tree::set::{Entry, MemberConstraintSet};

/// A nested scope over `R`, fed by a member of the parent subject `S`.
pub struct ChildConstraintSet<S, R> {
    owner: Arc<str>,
    feed: Member<S, Option<R>>,
    scope: MemberConstraintSet<R>,
}

impl<S, R> ChildConstraintSet<S, R> {
    pub(crate) fn new(
        owner: Arc<str>,
        feed: Member<S, Option<R>>,
        scope: MemberConstraintSet<R>,
    ) -> Self {
        Self { owner, feed, scope }
    }

    /// The full name of the member owning the scope.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The nested scope.
    pub fn scope(&self) -> &MemberConstraintSet<R> {
        &self.scope
    }
}

impl<S: 'static, R: 'static> Entry<S> for ChildConstraintSet<S, R> {
    fn info(&self) -> EntryInfo {
        EntryInfo::child(Arc::clone(&self.owner))
    }

    fn evaluate_into(
        &self,
        subject: &S,
        errors: &mut ErrorAccumulator,
        provider: &dyn FormatProvider,
    ) -> Result<bool, ContractError> {
        match self.feed.get_value(subject) {
            Some(value) => self.scope.evaluate_into(&value, errors, provider),
            None => {
                tracing::trace!(owner = &*self.owner, "owner chain failed, nested scope skipped");
                Ok(false)
            }
        }
    }

    fn describe(&self) -> String {
        let nested: Vec<String> = self
            .scope
            .entries()
            .map(|entry| format!("{}: {}", entry.info().full_name, entry.describe()))
            .collect();
        format!("{{{}}}", nested.join("; "))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<S, R> fmt::Debug for ChildConstraintSet<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildConstraintSet")
            .field("owner", &self.owner)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

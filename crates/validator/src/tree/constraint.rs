//! Member constraints and the chain-building handle

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::combinators::{And, Identity};
use crate::foundation::{ContractError, Failure, FormatProvider, Rule, SharedRule};
use crate::member::Member;
use crate::report::ErrorAccumulator;
use crate::tree::child::ChildConstraintSet;
use crate::tree::event::{EntryInfo, Listeners};
use crate::tree::set::{Entry, MemberConstraintSet, Validated};

// ============================================================================
// MEMBER CONSTRAINT
// ============================================================================

/// One member bound to its current rule chain `V -> R`.
///
/// Immutable: [`extend`](Self::extend) returns a new constraint and leaves
/// this one untouched.
pub struct MemberConstraint<S, V, R> {
    member: Member<S, V>,
    chain: SharedRule<S, V, R>,
}

impl<S: 'static, V: 'static> MemberConstraint<S, V, V> {
    /// A pass-through constraint over `member`.
    pub fn new(member: Member<S, V>) -> Self {
        Self {
            member,
            chain: Arc::new(Identity::new()),
        }
    }
}

impl<S: 'static, V: 'static, R: 'static> MemberConstraint<S, V, R> {
    /// The constrained member.
    pub fn member(&self) -> &Member<S, V> {
        &self.member
    }

    /// The current chain.
    pub fn chain(&self) -> &SharedRule<S, V, R> {
        &self.chain
    }

    /// The member's full name.
    pub fn full_name(&self) -> &str {
        self.member.full_name()
    }

    /// A new constraint whose chain is this chain followed by `rule`.
    pub fn extend<N>(&self, rule: N) -> MemberConstraint<S, V, N::Output>
    where
        N: Rule<Subject = S, Input = R> + 'static,
        N::Output: 'static,
    {
        MemberConstraint {
            member: self.member.clone(),
            chain: Arc::new(And::new(Arc::clone(&self.chain), rule)),
        }
    }

    /// The same chain over a renamed member.
    #[must_use]
    pub fn renamed(&self, rename: impl FnOnce(&str) -> String) -> Self {
        Self {
            member: self.member.rename(rename),
            chain: Arc::clone(&self.chain),
        }
    }

    /// Runs the chain against `subject`.
    pub fn evaluate(&self, subject: &S) -> Result<R, Failure<'_, S>> {
        self.chain.apply(self.member.get_value(subject), subject)
    }

    /// A member yielding the chain's output, or `None` when the chain fails.
    pub fn output_member(&self) -> Member<S, Option<R>> {
        self.member.try_transform(Arc::clone(&self.chain))
    }

    /// Diagnostic description of the chain.
    pub fn describe(&self) -> String {
        self.chain.describe().into_owned()
    }
}

impl<S, V, R> Clone for MemberConstraint<S, V, R> {
    fn clone(&self) -> Self {
        Self {
            member: self.member.clone(),
            chain: Arc::clone(&self.chain),
        }
    }
}

impl<S, V, R> fmt::Debug for MemberConstraint<S, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberConstraint")
            .field("member", &self.member.full_name())
            .field("chain", &self.chain.describe())
            .finish()
    }
}

impl<S: 'static, V: 'static, R: 'static> Entry<S> for MemberConstraint<S, V, R> {
    fn info(&self) -> EntryInfo {
        EntryInfo::member(self.member.path().full_name_arc())
    }

    fn evaluate_into(
        &self,
        subject: &S,
        errors: &mut ErrorAccumulator,
        provider: &dyn FormatProvider,
    ) -> Result<bool, ContractError> {
        let Err(failure) = self.evaluate(subject) else {
            return Ok(false);
        };
        let message = failure.render(self.member.path(), subject, provider);
        tracing::debug!(
            member = self.member.full_name(),
            constraint = %failure.describe(),
            %message,
            "constraint failed"
        );
        errors.add(self.member.path().full_name_arc(), message)?;
        Ok(true)
    }

    fn describe(&self) -> String {
        MemberConstraint::describe(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// MEMBER CHAIN
// ============================================================================

/// Handle for extending one member's chain in its owning set.
///
/// Every step replaces the registry entry in place; dropping the handle
/// leaves the last registered chain in the set.
pub struct MemberChain<'a, S, V, R> {
    pub(crate) set: &'a mut MemberConstraintSet<S>,
    pub(crate) constraint: MemberConstraint<S, V, R>,
}

impl<'a, S: 'static, V: 'static, R: 'static> MemberChain<'a, S, V, R> {
    /// Extends the chain with `rule`.
    pub fn satisfies<N>(self, rule: N) -> MemberChain<'a, S, V, N::Output>
    where
        N: Rule<Subject = S, Input = R> + 'static,
        N::Output: 'static,
    {
        let next = self.constraint.extend(rule);
        self.set.replace_member(self.constraint.full_name(), next.clone());
        MemberChain {
            set: self.set,
            constraint: next,
        }
    }

    /// Extends the chain with `rule` and renames the member.
    ///
    /// The entry keeps its slot; its key becomes the new full name. A nested
    /// scope registered under the old or the new name is dropped. Keep new
    /// names free of `.` so they cannot collide with nested members.
    pub fn satisfies_named<N>(
        self,
        rule: N,
        rename: impl FnOnce(&str) -> String,
    ) -> MemberChain<'a, S, V, N::Output>
    where
        N: Rule<Subject = S, Input = R> + 'static,
        N::Output: 'static,
    {
        let next = self.constraint.extend(rule).renamed(rename);
        self.set.replace_member(self.constraint.full_name(), next.clone());
        MemberChain {
            set: self.set,
            constraint: next,
        }
    }

    /// Validates the chain's output with a nested scope.
    ///
    /// `inner` declares the nested scope's members; their full names are
    /// prefixed with this member's full name. Ends the chain.
    ///
    /// The scope is fed through [`Member::try_transform`], not
    /// [`Member::transform`]: when this chain fails the scope is skipped
    /// rather than evaluated against a default value.
    ///
    /// Once `inner` returns, the scope is registered under this member's
    /// full name and listeners of this set see a single `Added` or
    /// `Replaced` event for it.
    ///
    /// # Errors
    ///
    /// Whatever `inner` returns.
    pub fn and<F>(self, inner: F) -> Result<(), ContractError>
    where
        F: FnOnce(&mut MemberConstraintSet<R>) -> Result<(), ContractError>,
    {
        let owner = self.constraint.member().path().clone();
        let owner_name = owner.full_name_arc();
        let mut scope = MemberConstraintSet::nested(
            owner.child_path(),
            Listeners::default(),
            Arc::clone(&self.set.provider),
        );
        inner(&mut scope)?;

        let child = ChildConstraintSet::new(owner_name, self.constraint.output_member(), scope);
        self.set.upsert_child(child);
        Ok(())
    }

    /// [`and`](Self::and) using the output type's own declarations.
    ///
    /// # Errors
    ///
    /// Whatever [`Validated::declare`] returns.
    pub fn and_validated(self) -> Result<(), ContractError>
    where
        R: Validated,
    {
        self.and(R::declare)
    }

    /// The constraint registered for this member.
    pub fn constraint(&self) -> &MemberConstraint<S, V, R> {
        &self.constraint
    }

    /// The member's full name.
    pub fn full_name(&self) -> &str {
        self.constraint.full_name()
    }

    /// Ends the chain.
    pub fn done(self) {}
}

impl<'a, S: 'static, V: 'static, T: 'static> MemberChain<'a, S, V, Vec<T>> {
    /// Narrows the chain to the element at `index`, renaming the member to
    /// `name[index]`.
    pub fn element_at(self, index: usize) -> MemberChain<'a, S, V, T> {
        self.satisfies_named(crate::validators::element_at(index), move |name| {
            format!("{name}[{index}]")
        })
    }
}

impl<S, V, R> fmt::Debug for MemberChain<'_, S, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberChain")
            .field("constraint", &self.constraint)
            .finish_non_exhaustive()
    }
}

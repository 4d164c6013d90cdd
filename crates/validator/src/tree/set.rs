//! The validation tree node

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::foundation::{ContractError, FormatProvider, InvariantFormat, Rule};
use crate::member::Member;
use crate::report::{ErrorAccumulator, ErrorReport};
use crate::tree::child::ChildConstraintSet;
use crate::tree::constraint::{MemberChain, MemberConstraint};
use crate::tree::event::{ConstraintEvent, EntryInfo, Listeners};

/// Object-safe view of a registry entry.
pub(crate) trait Entry<S>: Send + Sync {
    fn info(&self) -> EntryInfo;

    /// Evaluates against `subject`, returning true if an error was recorded.
    fn evaluate_into(
        &self,
        subject: &S,
        errors: &mut ErrorAccumulator,
        provider: &dyn FormatProvider,
    ) -> Result<bool, ContractError>;

    fn describe(&self) -> String;

    fn as_any(&self) -> &dyn Any;
}

type Slots<S> = IndexMap<Arc<str>, Box<dyn Entry<S>>>;

/// Types that declare their own constraints.
///
/// # Examples
///
/// ```rust,ignore
/// impl Validated for Address {
///     fn declare(set: &mut MemberConstraintSet<Self>) -> Result<(), ContractError> {
///         set.verify_that("zip", |a: &Address| a.zip.clone())?
///             .satisfies(not_empty());
///         Ok(())
///     }
/// }
/// ```
pub trait Validated: Sized + 'static {
    /// Registers this type's member constraints in `set`.
    fn declare(set: &mut MemberConstraintSet<Self>) -> Result<(), ContractError>;
}

/// Builds `T`'s constraint tree and validates `value` with it.
///
/// # Errors
///
/// Any [`ContractError`] raised while declaring or evaluating.
pub fn validate_subject<T: Validated>(value: &T) -> Result<ErrorReport, ContractError> {
    MemberConstraintSet::<T>::for_type()?.validate(value)
}

// ============================================================================
// MEMBER CONSTRAINT SET
// ============================================================================

/// Registry of member constraints and nested scopes for one subject type.
///
/// Members and nested scopes are each kept in declaration order, which is
/// also evaluation and report order. No two entries of one kind share a full
/// name: declaring an existing name replaces the entry in its slot.
pub struct MemberConstraintSet<S> {
    path: Arc<[Arc<str>]>,
    members: Slots<S>,
    children: Slots<S>,
    listeners: Listeners,
    pub(crate) provider: Arc<dyn FormatProvider>,
}

impl<S: 'static> Default for MemberConstraintSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Validated> MemberConstraintSet<S> {
    /// Builds the tree declared by `S`.
    ///
    /// # Errors
    ///
    /// Whatever [`Validated::declare`] returns.
    pub fn for_type() -> Result<Self, ContractError> {
        let mut set = Self::new();
        S::declare(&mut set)?;
        Ok(set)
    }
}

impl<S: 'static> MemberConstraintSet<S> {
    /// Creates an empty top-level scope.
    #[must_use]
    pub fn new() -> Self {
        Self::nested(
            Arc::from(Vec::<Arc<str>>::new()),
            Listeners::default(),
            Arc::new(InvariantFormat),
        )
    }

    pub(crate) fn nested(
        path: Arc<[Arc<str>]>,
        listeners: Listeners,
        provider: Arc<dyn FormatProvider>,
    ) -> Self {
        Self {
            path,
            members: IndexMap::new(),
            children: IndexMap::new(),
            listeners,
            provider,
        }
    }

    /// Uses `provider` to format message arguments.
    #[must_use]
    pub fn with_format_provider(mut self, provider: impl FormatProvider + 'static) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    /// Opens (or restarts) the chain of the member `name`.
    ///
    /// The chain starts as the identity rule. If a member with the same full
    /// name exists its entry is replaced in place, and the nested scope it
    /// owned, if any, is dropped.
    ///
    /// # Errors
    ///
    /// [`ContractError::EmptyName`] if `name` is empty,
    /// [`ContractError::InvalidName`] if it contains `.`, `[` or `]`.
    pub fn verify_that<V, F>(
        &mut self,
        name: impl Into<Arc<str>>,
        extract: F,
    ) -> Result<MemberChain<'_, S, V, V>, ContractError>
    where
        V: 'static,
        F: Fn(&S) -> V + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(ContractError::EmptyName);
        }
        if name.contains(['.', '[', ']']) {
            return Err(ContractError::InvalidName(name.to_string()));
        }
        let member = Member::new(name, extract).with_ancestors(Arc::clone(&self.path));
        let constraint = MemberConstraint::new(member);
        self.remove_child(constraint.full_name());
        self.replace_member(constraint.full_name(), constraint.clone());
        Ok(MemberChain {
            set: self,
            constraint,
        })
    }

    /// Resumes the chain registered under `full_name`.
    ///
    /// # Errors
    ///
    /// [`ContractError::UnknownMember`] if no member has that name,
    /// [`ContractError::MemberTypeMismatch`] if its chain is not `V -> R`.
    pub fn resume<V, R>(&mut self, full_name: &str) -> Result<MemberChain<'_, S, V, R>, ContractError>
    where
        V: 'static,
        R: 'static,
    {
        let entry = self
            .members
            .get(full_name)
            .ok_or_else(|| ContractError::unknown_member(full_name))?;
        let constraint = entry
            .as_any()
            .downcast_ref::<MemberConstraint<S, V, R>>()
            .cloned()
            .ok_or_else(|| ContractError::MemberTypeMismatch {
                full_name: full_name.to_owned(),
                expected: std::any::type_name::<MemberConstraint<S, V, R>>(),
            })?;
        Ok(MemberChain {
            set: self,
            constraint,
        })
    }

    /// Extends the chain registered under `full_name` with `rule`.
    ///
    /// # Errors
    ///
    /// As [`resume`](Self::resume).
    pub fn extend<V, R, N>(
        &mut self,
        full_name: &str,
        rule: N,
    ) -> Result<MemberChain<'_, S, V, N::Output>, ContractError>
    where
        V: 'static,
        R: 'static,
        N: Rule<Subject = S, Input = R> + 'static,
        N::Output: 'static,
    {
        Ok(self.resume::<V, R>(full_name)?.satisfies(rule))
    }

    /// Evaluates every member, then every nested scope, recording failures.
    ///
    /// Returns true if at least one error was recorded. A failing member
    /// never stops its siblings from being evaluated.
    ///
    /// # Errors
    ///
    /// [`ContractError::DuplicateError`] if `errors` already holds a message
    /// for a failing member.
    pub fn has_errors(&self, subject: &S, errors: &mut ErrorAccumulator) -> Result<bool, ContractError> {
        self.evaluate_into(subject, errors, &*self.provider)
    }

    /// Evaluates the whole tree into a fresh report.
    ///
    /// # Errors
    ///
    /// Only contract violations; validation failures are in the report.
    pub fn validate(&self, subject: &S) -> Result<ErrorReport, ContractError> {
        let mut errors = ErrorAccumulator::new();
        self.has_errors(subject, &mut errors)?;
        tracing::debug!(errors = errors.len(), "validation finished");
        Ok(errors.build_error_tree())
    }

    pub(crate) fn evaluate_into(
        &self,
        subject: &S,
        errors: &mut ErrorAccumulator,
        provider: &dyn FormatProvider,
    ) -> Result<bool, ContractError> {
        let span = tracing::debug_span!(
            "evaluate_scope",
            scope = %self.path.join("."),
            members = self.members.len(),
            children = self.children.len()
        );
        let _guard = span.enter();

        let mut failed = false;
        for entry in self.entries() {
            failed |= entry.evaluate_into(subject, errors, provider)?;
        }
        Ok(failed)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &dyn Entry<S>> + '_ {
        self.members
            .values()
            .chain(self.children.values())
            .map(|entry| &**entry)
    }

    pub(crate) fn replace_member<V: 'static, R: 'static>(
        &mut self,
        previous: &str,
        constraint: MemberConstraint<S, V, R>,
    ) {
        if previous != constraint.full_name() {
            // A scope never outlives the chain that fed it.
            self.remove_child(previous);
            self.remove_child(constraint.full_name());
        }
        upsert(&mut self.members, &self.listeners, previous, Box::new(constraint));
    }

    fn remove_child(&mut self, owner: &str) {
        if let Some(removed) = self.children.shift_remove(owner) {
            let info = removed.info();
            tracing::trace!(entry = %info.full_name, "nested scope dropped");
            self.listeners.emit(&ConstraintEvent::Removed(info));
        }
    }

    pub(crate) fn upsert_child<R: 'static>(&mut self, child: ChildConstraintSet<S, R>) {
        let key = child.owner().to_owned();
        upsert(&mut self.children, &self.listeners, &key, Box::new(child));
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Number of members plus nested scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len() + self.children.len()
    }

    /// Returns true if nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.children.is_empty()
    }

    /// Full names of the members, in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.keys().map(|key| &**key)
    }

    /// Full names of the members owning nested scopes, in declaration order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.children.keys().map(|key| &**key)
    }

    /// Returns true if a member or nested scope is keyed by `full_name`.
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.members.contains_key(full_name) || self.children.contains_key(full_name)
    }

    /// Ancestor names of members declared in this scope.
    #[must_use]
    pub fn path(&self) -> &[Arc<str>] {
        &self.path
    }

    /// Describes the chain of a member.
    #[must_use]
    pub fn describe(&self, full_name: &str) -> Option<String> {
        self.members.get(full_name).map(|entry| entry.describe())
    }

    /// Describes the nested scope owned by the member `full_name`.
    #[must_use]
    pub fn describe_scope(&self, full_name: &str) -> Option<String> {
        self.children.get(full_name).map(|entry| entry.describe())
    }

    /// Registers a listener for registry changes of this scope.
    ///
    /// A nested scope shows up as the child entry owning it.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&ConstraintEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(Arc::new(listener));
    }
}

/// Inserts `entry` into the slot keyed by `previous`, or appends it.
///
/// The new key may differ from `previous` (a renamed member); any other
/// entry already keyed by it is dropped.
fn upsert<S>(slots: &mut Slots<S>, listeners: &Listeners, previous: &str, entry: Box<dyn Entry<S>>) {
    let current = entry.info();
    let key = Arc::clone(&current.full_name);

    let Some(mut index) = slots.get_index_of(previous) else {
        if let Some(displaced) = slots.insert(key, entry) {
            tracing::trace!(entry = %current.full_name, "entry replaced by re-declaration");
            listeners.emit(&ConstraintEvent::Replaced {
                previous: displaced.info(),
                current,
            });
        } else {
            tracing::trace!(entry = %current.full_name, "entry added");
            listeners.emit(&ConstraintEvent::Added(current));
        }
        return;
    };

    let replaced = slots.shift_remove_index(index).map(|(_, old)| old);
    if *key != *previous {
        if let Some((other, _, _)) = slots.shift_remove_full(&*key) {
            tracing::trace!(entry = %key, "rename displaced existing entry");
            if other < index {
                index -= 1;
            }
        }
    }
    slots.shift_insert(index, key, entry);

    let previous = replaced.map_or_else(|| EntryInfo::member(Arc::from(previous)), |old| old.info());
    tracing::trace!(from = %previous.full_name, to = %current.full_name, "entry replaced");
    listeners.emit(&ConstraintEvent::Replaced { previous, current });
}

impl<S> fmt::Debug for MemberConstraintSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberConstraintSet")
            .field("path", &self.path)
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

//! Members: named, lazily evaluated values of a subject
//!
//! A [`Member`] pairs a [`MemberPath`] (short name plus ancestor names) with
//! an extractor `&S -> V`. Nothing is read from the subject until
//! [`Member::get_value`] is called.

use std::fmt;
use std::sync::Arc;

use crate::foundation::Rule;

// ============================================================================
// MEMBER PATH
// ============================================================================

/// The hierarchical name of a member.
///
/// The full name (`address.zip`, `items[2]`) is computed once and shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberPath {
    name: Arc<str>,
    ancestors: Arc<[Arc<str>]>,
    full_name: Arc<str>,
}

impl MemberPath {
    /// Creates a path below `ancestors`.
    pub fn new(name: impl Into<Arc<str>>, ancestors: impl Into<Arc<[Arc<str>]>>) -> Self {
        let name = name.into();
        let ancestors = ancestors.into();
        let full_name = if ancestors.is_empty() {
            Arc::clone(&name)
        } else {
            let mut joined = ancestors.join(".");
            joined.push('.');
            joined.push_str(&name);
            Arc::from(joined)
        };
        Self {
            name,
            ancestors,
            full_name,
        }
    }

    /// Creates a top-level path.
    pub fn root(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, Vec::<Arc<str>>::new())
    }

    /// The short name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ancestors joined with `.`, followed by the short name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub(crate) fn full_name_arc(&self) -> Arc<str> {
        Arc::clone(&self.full_name)
    }

    /// The ancestor names, outermost first.
    #[must_use]
    pub fn ancestors(&self) -> &[Arc<str>] {
        &self.ancestors
    }

    /// The same path with a different short name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<Arc<str>>) -> Self {
        Self::new(name, Arc::clone(&self.ancestors))
    }

    /// The ancestor list of members nested below this one.
    #[must_use]
    pub fn child_path(&self) -> Arc<[Arc<str>]> {
        self.ancestors
            .iter()
            .cloned()
            .chain(std::iter::once(Arc::clone(&self.name)))
            .collect()
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

// ============================================================================
// MEMBER
// ============================================================================

/// A named value derived from a subject of type `S`.
pub struct Member<S, V> {
    path: MemberPath,
    extract: Arc<dyn Fn(&S) -> V + Send + Sync>,
}

impl<S, V> Member<S, V> {
    /// Creates a top-level member.
    pub fn new<F>(name: impl Into<Arc<str>>, extract: F) -> Self
    where
        F: Fn(&S) -> V + Send + Sync + 'static,
    {
        Self {
            path: MemberPath::root(name),
            extract: Arc::new(extract),
        }
    }

    /// Re-roots the member below `ancestors`.
    #[must_use]
    pub fn with_ancestors(self, ancestors: impl Into<Arc<[Arc<str>]>>) -> Self {
        Self {
            path: MemberPath::new(self.path.name, ancestors),
            extract: self.extract,
        }
    }

    /// The member's path.
    pub fn path(&self) -> &MemberPath {
        &self.path
    }

    /// The short name.
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// The dotted full name.
    pub fn full_name(&self) -> &str {
        self.path.full_name()
    }

    /// The ancestor names.
    pub fn ancestors(&self) -> &[Arc<str>] {
        self.path.ancestors()
    }

    /// A copy with a new short name computed from the current one.
    #[must_use]
    pub fn rename(&self, rename: impl FnOnce(&str) -> String) -> Self {
        Self {
            path: self.path.renamed(rename(self.path.name())),
            extract: Arc::clone(&self.extract),
        }
    }

    /// Reads the value from `subject`.
    pub fn get_value(&self, subject: &S) -> V {
        (self.extract)(subject)
    }
}

impl<S: 'static, V: 'static> Member<S, V> {
    /// A member of the same name whose value is `rule`'s output.
    ///
    /// A failing rule yields `Out::default()`.
    pub fn transform<Rl>(&self, rule: Rl) -> Member<S, Rl::Output>
    where
        Rl: Rule<Subject = S, Input = V> + 'static,
        Rl::Output: Default,
    {
        let upstream = Arc::clone(&self.extract);
        Member {
            path: self.path.clone(),
            extract: Arc::new(move |subject: &S| {
                rule.apply(upstream(subject), subject).unwrap_or_default()
            }),
        }
    }

    /// A member of the same name whose value is `rule`'s output, or `None`
    /// if the rule fails.
    pub fn try_transform<Rl>(&self, rule: Rl) -> Member<S, Option<Rl::Output>>
    where
        Rl: Rule<Subject = S, Input = V> + 'static,
    {
        let upstream = Arc::clone(&self.extract);
        Member {
            path: self.path.clone(),
            extract: Arc::new(move |subject: &S| rule.apply(upstream(subject), subject).ok()),
        }
    }
}

impl<S, V> Clone for Member<S, V> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            extract: Arc::clone(&self.extract),
        }
    }
}

impl<S, V> fmt::Debug for Member<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("full_name", &self.path.full_name())
            .field("extract", &"<function>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Predicate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Order {
        items: Vec<String>,
        quantity: String,
    }

    fn order() -> Order {
        Order {
            items: vec!["a".into(), "b".into(), "c".into()],
            quantity: "3".into(),
        }
    }

    #[test]
    fn test_full_name_composition() {
        let path = MemberPath::new("age", vec![Arc::<str>::from("address")]);
        assert_eq!(path.full_name(), "address.age");
        assert_eq!(path.name(), "age");
        assert_eq!(MemberPath::root("age").full_name(), "age");

        let deep = MemberPath::new("zip", path.child_path());
        assert_eq!(deep.full_name(), "address.age.zip");
    }

    #[test]
    fn test_rename_keeps_ancestors_and_extractor() {
        let items = Member::new("items", |o: &Order| o.items.clone())
            .with_ancestors(vec![Arc::<str>::from("order")]);
        let second = items.rename(|name| format!("{name}[2]"));

        assert_eq!(second.full_name(), "order.items[2]");
        assert_eq!(second.get_value(&order()), items.get_value(&order()));
        assert_eq!(items.full_name(), "order.items");
    }

    #[test]
    fn test_get_value_is_lazy_and_repeatable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let member = Member::new("quantity", move |o: &Order| {
            counter.fetch_add(1, Ordering::SeqCst);
            o.quantity.clone()
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let subject = order();
        assert_eq!(member.get_value(&subject), "3");
        assert_eq!(member.get_value(&subject), "3");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_transform_uses_default_on_failure() {
        let parse = Predicate::<Order, String, i64>::try_map(|s| s.parse().ok())
            .build()
            .unwrap();
        let member = Member::new("quantity", |o: &Order| o.quantity.clone());
        let parsed = member.transform(parse.clone());

        assert_eq!(parsed.full_name(), "quantity");
        assert_eq!(parsed.get_value(&order()), 3);

        let bad = Order {
            items: Vec::new(),
            quantity: "many".into(),
        };
        assert_eq!(parsed.get_value(&bad), 0);
        assert_eq!(member.try_transform(parse).get_value(&bad), None);
    }
}

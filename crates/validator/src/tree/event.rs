//! Registry change notifications
//!
//! A [`MemberConstraintSet`](super::MemberConstraintSet) announces every
//! change to its registry. A nested scope is declared in full before its
//! parent registers it, so the parent announces the whole scope once, as the
//! single child entry that owns it, whatever the nesting depth.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// What kind of registry entry an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A member constraint chain.
    Member,
    /// A nested validation scope.
    Child,
}

/// Identifies one registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryInfo {
    /// Full name the entry is keyed by.
    pub full_name: Arc<str>,
    /// Kind of entry.
    pub kind: EntryKind,
}

impl EntryInfo {
    pub(crate) fn member(full_name: Arc<str>) -> Self {
        Self {
            full_name,
            kind: EntryKind::Member,
        }
    }

    pub(crate) fn child(full_name: Arc<str>) -> Self {
        Self {
            full_name,
            kind: EntryKind::Child,
        }
    }
}

/// A change to a constraint registry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstraintEvent {
    /// A new slot was created.
    Added(EntryInfo),
    /// A slot's entry was swapped for a new one in place.
    Replaced {
        previous: EntryInfo,
        current: EntryInfo,
    },
    /// A slot was dropped.
    Removed(EntryInfo),
}

impl ConstraintEvent {
    /// The entry the registry holds after the change, or the dropped one.
    #[must_use]
    pub fn entry(&self) -> &EntryInfo {
        match self {
            Self::Added(info) | Self::Replaced { current: info, .. } | Self::Removed(info) => info,
        }
    }
}

/// A registered listener.
pub type Listener = Arc<dyn Fn(&ConstraintEvent) + Send + Sync>;

/// Shared listener list of one scope.
#[derive(Clone, Default)]
pub(crate) struct Listeners(Arc<RwLock<Vec<Listener>>>);

impl Listeners {
    pub(crate) fn subscribe(&self, listener: Listener) {
        self.0.write().push(listener);
    }

    pub(crate) fn emit(&self, event: &ConstraintEvent) {
        // Snapshot so a listener may subscribe without deadlocking.
        let snapshot: Vec<Listener> = self.0.read().clone();
        for listener in &snapshot {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.0.read().len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder() -> (Listeners, Arc<Mutex<Vec<ConstraintEvent>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let listeners = Listeners::default();
        let sink = Arc::clone(&seen);
        listeners.subscribe(Arc::new(move |event: &ConstraintEvent| {
            sink.lock().push(event.clone());
        }));
        (listeners, seen)
    }

    #[test]
    fn test_emit_reaches_every_listener() {
        let (listeners, seen) = recorder();
        let sink = Arc::clone(&seen);
        listeners.subscribe(Arc::new(move |event: &ConstraintEvent| {
            sink.lock().push(event.clone());
        }));

        listeners.emit(&ConstraintEvent::Added(EntryInfo::member(Arc::from("zip"))));

        assert_eq!(listeners.len(), 2);
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_listener_may_subscribe_while_notified() {
        let listeners = Listeners::default();
        let handle = listeners.clone();
        listeners.subscribe(Arc::new(move |_: &ConstraintEvent| {
            handle.subscribe(Arc::new(|_: &ConstraintEvent| {}));
        }));

        listeners.emit(&ConstraintEvent::Removed(EntryInfo::child(Arc::from("address"))));
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn test_entry_of_each_event() {
        let removed = ConstraintEvent::Removed(EntryInfo::child(Arc::from("address")));
        assert_eq!(removed.entry().kind, EntryKind::Child);

        let renamed = ConstraintEvent::Replaced {
            previous: EntryInfo::member(Arc::from("items")),
            current: EntryInfo::member(Arc::from("items[0]")),
        };
        assert_eq!(&*renamed.entry().full_name, "items[0]");
    }
}

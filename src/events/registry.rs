//! Listener registry.
//!
//! Stores callbacks per event kind and delivers events to them. Callbacks are
//! identified by the [`ListenerId`] handed out at registration; there is no
//! ordering contract between listeners of the same kind.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::{BoardEvent, EventKind};

/// Handle for a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Create a new listener ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Boxed listener callback.
pub type Callback = Box<dyn FnMut(&BoardEvent)>;

struct Listener {
    kind: EventKind,
    callback: Callback,
}

/// Registry of event listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    /// All registered listeners.
    listeners: FxHashMap<ListenerId, Listener>,

    /// Index by event kind for dispatch.
    by_kind: FxHashMap<EventKind, Vec<ListenerId>>,

    /// Next listener ID to allocate.
    next_id: u32,
}

impl ListenerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one event kind.
    pub fn add(&mut self, kind: EventKind, callback: Callback) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;

        self.by_kind.entry(kind).or_default().push(id);
        self.listeners.insert(id, Listener { kind, callback });
        id
    }

    /// Unregister a callback.
    ///
    /// Returns `false` if `id` is unknown or registered for another kind.
    pub fn remove(&mut self, kind: EventKind, id: ListenerId) -> bool {
        if self.listeners.get(&id).map(|l| l.kind) != Some(kind) {
            return false;
        }
        self.listeners.remove(&id);
        if let Some(ids) = self.by_kind.get_mut(&kind) {
            ids.retain(|&lid| lid != id);
            if ids.is_empty() {
                self.by_kind.remove(&kind);
            }
        }
        true
    }

    /// Check if any callback listens for `kind`.
    #[must_use]
    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    /// Number of callbacks registered for `kind`.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver `event` to every callback registered for its kind.
    ///
    /// Returns the number of callbacks invoked.
    pub fn emit(&mut self, event: &BoardEvent) -> usize {
        let Some(ids) = self.by_kind.get(&event.kind()) else {
            return 0;
        };

        let mut delivered = 0;
        for id in ids {
            if let Some(listener) = self.listeners.get_mut(id) {
                (listener.callback)(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Get total listener count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self.by_kind.iter().map(|(k, ids)| (*k, ids.len())).collect();
        counts.sort_by_key(|(k, _)| k.name());
        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .finish()
    }
}

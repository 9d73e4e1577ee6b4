//! Query Store - Shared reactive owner of the current query collection
//!
//! The store plays the role the navigation layer plays in a browser: it owns
//! the current [`QueryMap`], keeps the back/forward history stack, and
//! notifies subscribers through a `Signal` whenever the collection changes.
//!
//! - `current` / `peek` - Tracked and untracked snapshot reads
//! - `apply` - Functional update against the latest snapshot
//! - `push` / `replace` - Navigation with or without a new history entry
//! - `back` / `forward` - History traversal
//! - `global_store` - The conventional process-wide shared instance
//!
//! Every write goes through the history stack first and the signal second,
//! so untracked readers ([`QueryStore::peek`]) and reactive readers always
//! agree. Consecutive pushes of an identical collection collapse into one
//! history entry.
//!
//! # Example
//!
//! ```ignore
//! use spark_query::{QueryMap, QueryStore};
//! use spark_signals::effect;
//!
//! let store = QueryStore::from_map(QueryMap::parse("page=1"));
//!
//! let s = store.clone();
//! let _stop = effect(move || {
//!     println!("url is now ?{}", s.current());
//! });
//!
//! store.push(QueryMap::parse("page=2"));
//! store.back(); // url is now ?page=1 again
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::collection::QueryMap;

// =============================================================================
// HISTORY MODE
// =============================================================================

/// How a write lands in the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Add a new entry; the back button returns to the previous collection.
    Push,
    /// Overwrite the current entry; no new history is created.
    Replace,
}

// =============================================================================
// HISTORY STACK
// =============================================================================

/// Back/forward stack of query collections. Never empty; `position` always
/// indexes a valid entry.
struct History {
    entries: Vec<QueryMap>,
    position: usize,
}

impl History {
    fn new(initial: QueryMap) -> Self {
        Self {
            entries: vec![initial],
            position: 0,
        }
    }

    fn current(&self) -> &QueryMap {
        &self.entries[self.position]
    }

    /// Push a new entry, dropping any forward tail.
    /// Returns false (and changes nothing) when the entry equals the
    /// current one.
    fn push(&mut self, map: QueryMap) -> bool {
        if *self.current() == map {
            return false;
        }
        self.entries.truncate(self.position + 1);
        self.entries.push(map);
        self.position += 1;
        true
    }

    /// Overwrite the current entry in place.
    /// Returns false when the replacement equals the current entry.
    fn replace(&mut self, map: QueryMap) -> bool {
        if *self.current() == map {
            return false;
        }
        self.entries[self.position] = map;
        true
    }

    fn back(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    fn forward(&mut self) -> bool {
        if self.position + 1 < self.entries.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }
}

// =============================================================================
// QUERY STORE
// =============================================================================

/// Shared, change-notifying owner of the current query collection.
///
/// Cheap to clone: clones share the same signal and the same history stack,
/// so every binding created from any clone observes the same state.
#[derive(Clone)]
pub struct QueryStore {
    current: Signal<QueryMap>,
    history: Rc<RefCell<History>>,
}

impl QueryStore {
    /// Store starting from an empty collection.
    pub fn new() -> Self {
        Self::from_map(QueryMap::new())
    }

    /// Store starting from the given collection (e.g. the URL at page load).
    pub fn from_map(map: QueryMap) -> Self {
        Self {
            current: signal(map.clone()),
            history: Rc::new(RefCell::new(History::new(map))),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current collection, as a tracked read.
    ///
    /// Inside an effect or derived this subscribes to store changes; the
    /// effect re-runs whenever the collection changes.
    pub fn current(&self) -> QueryMap {
        self.current.get()
    }

    /// Current collection, without subscribing.
    ///
    /// This is the read every write path uses: it always reflects the latest
    /// committed state, including writes made after any given effect run.
    pub fn peek(&self) -> QueryMap {
        self.history.borrow().current().clone()
    }

    /// The underlying signal, for building deriveds on top of the store.
    pub fn signal(&self) -> Signal<QueryMap> {
        self.current.clone()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Transform the latest collection and commit the result.
    ///
    /// `f` receives the latest committed snapshot, never a stale one a
    /// caller captured earlier. Two rapid updates to different parameters
    /// therefore both land: the second transform starts from the first's
    /// result.
    pub fn apply(&self, mode: HistoryMode, f: impl FnOnce(&QueryMap) -> QueryMap) {
        let snapshot = self.peek();
        let next = f(&snapshot);
        self.commit(mode, next);
    }

    /// Commit a whole collection with push semantics.
    pub fn push(&self, map: QueryMap) {
        self.commit(HistoryMode::Push, map);
    }

    /// Commit a whole collection, overwriting the current history entry.
    pub fn replace(&self, map: QueryMap) {
        self.commit(HistoryMode::Replace, map);
    }

    fn commit(&self, mode: HistoryMode, next: QueryMap) {
        let changed = {
            let mut history = self.history.borrow_mut();
            match mode {
                HistoryMode::Push => history.push(next.clone()),
                HistoryMode::Replace => history.replace(next.clone()),
            }
        };

        if changed {
            log::debug!("navigate ({:?}): ?{}", mode, next);
            self.current.set(next);
        }
    }

    // =========================================================================
    // History traversal
    // =========================================================================

    /// Step back one history entry. Returns false at the oldest entry.
    pub fn back(&self) -> bool {
        let moved = {
            let mut history = self.history.borrow_mut();
            if history.back() {
                Some(history.current().clone())
            } else {
                None
            }
        };

        match moved {
            Some(map) => {
                log::debug!("back: ?{}", map);
                self.current.set(map);
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. Returns false at the newest entry.
    pub fn forward(&self) -> bool {
        let moved = {
            let mut history = self.history.borrow_mut();
            if history.forward() {
                Some(history.current().clone())
            } else {
                None
            }
        };

        match moved {
            Some(map) => {
                log::debug!("forward: ?{}", map);
                self.current.set(map);
                true
            }
            None => false,
        }
    }

    /// True when [`QueryStore::back`] would move.
    pub fn can_go_back(&self) -> bool {
        self.history.borrow().position > 0
    }

    /// True when [`QueryStore::forward`] would move.
    pub fn can_go_forward(&self) -> bool {
        let history = self.history.borrow();
        history.position + 1 < history.entries.len()
    }

    /// Number of history entries (including the current one).
    pub fn history_len(&self) -> usize {
        self.history.borrow().entries.len()
    }
}

impl Default for QueryStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// GLOBAL STORE
// =============================================================================

thread_local! {
    /// Shared store - created on first access, reused per thread.
    static STORE: RefCell<Option<QueryStore>> = const { RefCell::new(None) };
}

/// Get the shared per-thread store.
///
/// The query string is page-wide state, so bindings scattered across a
/// program conventionally attach to this one instance. Clones returned here
/// all share the same signal and history.
pub fn global_store() -> QueryStore {
    STORE.with(|s| {
        let mut opt = s.borrow_mut();
        if opt.is_none() {
            *opt = Some(QueryStore::new());
        }
        opt.clone().unwrap()
    })
}

/// Reset the shared store (for testing).
pub fn reset_global_store() {
    STORE.with(|s| *s.borrow_mut() = None);
}

// =============================================================================
// TESTS
// =============================================================================

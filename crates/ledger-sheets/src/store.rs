//! Workbook state store
//!
//! The [`Store`] owns the current [`StoreState`] snapshot and the
//! [`History`] log. Every change goes through [`Store::dispatch`], which
//! runs the reducer, appends the history entry for workbook mutations and
//! hands the new snapshot to every subscriber.
//!
//! # Example
//!
//! ```rust
//! use ledger_sheets::{Action, Store};
//! use ledger_sheets_core::{CellPatch, CellValue, Coordinates, Workbook};
//!
//! let mut store = Store::new(Workbook::new("wb-1", "Budget"));
//! store
//!     .dispatch(Action::update_cell("sheet-1", Coordinates::new(2, 2), CellPatch::new().value(42)))
//!     .unwrap();
//!
//! let sheet = store.state().workbook.sheet("sheet-1").unwrap();
//! assert_eq!(sheet.cell("C3").unwrap().unwrap().value, CellValue::Number(42.0));
//! assert_eq!(store.history().len(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use ledger_sheets_core::{Result, Workbook};

use crate::action::Action;
use crate::history::History;
use crate::reducer::reduce;
use crate::state::{StoreState, UserIdentity};

/// Id returned by [`Store::subscribe`]
pub type SubscriptionId = u64;

type Subscriber = Box<dyn Fn(&Arc<StoreState>)>;

/// Single owner of the session state
pub struct Store {
    state: Arc<StoreState>,
    history: History,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
}

impl Store {
    /// Create a store for a workbook with the default user
    pub fn new(workbook: Workbook) -> Self {
        Self::from_state(StoreState::new(workbook, UserIdentity::default()))
    }

    /// Create a store from an initial state
    pub fn from_state(state: StoreState) -> Self {
        Self {
            state: Arc::new(state),
            history: History::new(),
            subscribers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Keep at most `limit` history entries (`None` = unbounded)
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history = History::with_limit(limit);
        self
    }

    /// Current snapshot
    pub fn state(&self) -> &Arc<StoreState> {
        &self.state
    }

    /// The history log
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply an action
    ///
    /// On success the new snapshot replaces the current one and is passed
    /// to every subscriber. On error the current snapshot is kept, nothing
    /// is recorded and no subscriber is called.
    pub fn dispatch(&mut self, action: Action) -> Result<Arc<StoreState>> {
        let transition = match reduce(&self.state, &action) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("Rejected {}: {e}", action.name());
                return Err(e);
            }
        };

        let next = Arc::new(transition.state);
        tracing::debug!("Applied {}", action.name());

        if let Some(pending) = transition.record {
            let entry = self
                .history
                .record(pending.sheet_id, next.user.id.clone(), pending.change);
            tracing::debug!("History: {entry}");
        }

        self.state = Arc::clone(&next);
        for (_, subscriber) in &self.subscribers {
            subscriber(&next);
        }
        Ok(next)
    }

    /// Register a callback for new snapshots
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&Arc<StoreState>) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber; returns false if the id was unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::from_state(StoreState::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("history", &self.history)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

//! Observable state containers for the storefront views.
//!
//! Each collection lives in its own [`tokio::sync::watch`] channel, so a view
//! can read a snapshot or await changes. Fetches take `&self`, and stores are
//! meant to be built once and shared by reference or `Arc`.
//!
//! Every collection numbers its fetches. An outcome is applied only if no
//! newer fetch has already applied one, so a slow, superseded response
//! cannot overwrite fresher state. `loading` stays set while any fetch for
//! the collection is pending and is cleared when the last one settles,
//! including when a fetch future is dropped before it completes.

mod catalog;
mod search;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use storefront_core::{Category, Product};
use tokio::sync::watch;

pub use catalog::{CatalogStore, ListingKind};
pub use search::{SearchQuery, SearchStore};

/// A paginated product collection plus its request state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    pub items: Vec<Product>,
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// The unpaginated category directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryDirectory {
    pub items: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

trait RequestState {
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
}

impl RequestState for Listing {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

impl RequestState for CategoryDirectory {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// One observable collection and its fetch sequence.
///
/// The counters are only touched inside the channel's modify closures, so
/// they change atomically with the state they describe.
struct Slot<T> {
    state: watch::Sender<T>,
    issued: AtomicU64,
    applied: AtomicU64,
    in_flight: AtomicU64,
}

impl<T: RequestState> Slot<T> {
    fn new(initial: T) -> Self {
        Self {
            state: watch::Sender::new(initial),
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
            in_flight: AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    /// Marks the collection as loading and returns the guard for this fetch.
    fn begin(&self) -> Pending<'_, T> {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.set_loading(true);
            state.set_error(None);
        });
        Pending {
            slot: self,
            ticket,
            settled: false,
        }
    }

    /// Retires one in-flight fetch and recomputes `loading`.
    fn retire(&self, state: &mut T) {
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        state.set_loading(remaining > 0);
    }
}

/// An in-flight fetch. Settled by [`Pending::finish`]; if dropped unsettled
/// (timeout, `select!`, task abort) it still retires itself, so `loading`
/// cannot stay set.
struct Pending<'a, T: RequestState> {
    slot: &'a Slot<T>,
    ticket: u64,
    settled: bool,
}

impl<T: RequestState> Pending<'_, T> {
    fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Applies a fetch outcome unless a newer fetch already applied one.
    /// Returns whether the outcome was applied.
    fn finish(mut self, outcome: Result<impl FnOnce(&mut T), String>) -> bool {
        self.settled = true;
        let slot = self.slot;
        let ticket = self.ticket;
        let mut applied = false;

        slot.state.send_modify(|state| {
            if ticket > slot.applied.load(Ordering::SeqCst) {
                slot.applied.store(ticket, Ordering::SeqCst);
                match outcome {
                    Ok(apply) => {
                        apply(state);
                        state.set_error(None);
                    }
                    Err(message) => state.set_error(Some(message)),
                }
                applied = true;
            }
            slot.retire(state);
        });

        applied
    }
}

impl<T: RequestState> Drop for Pending<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            let slot = self.slot;
            slot.state.send_modify(|state| slot.retire(state));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let slot = Slot::new(Listing {
            error: Some("Failed to load discounted products.".to_string()),
            ..Listing::default()
        });
        let pending = slot.begin();
        assert_eq!(pending.ticket(), 1);
        let state = slot.snapshot();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn finish_applies_outcome_and_clears_loading() {
        let slot = Slot::new(Listing::default());
        let applied = slot.begin().finish(Ok(|l: &mut Listing| l.count = 5));
        assert!(applied);
        let state = slot.snapshot();
        assert_eq!(state.count, 5);
        assert!(!state.loading);
    }

    #[test]
    fn finish_error_keeps_previous_items() {
        let slot = Slot::new(Listing {
            count: 2,
            ..Listing::default()
        });
        let applied = slot
            .begin()
            .finish(Err::<fn(&mut Listing), _>("boom".to_string()));
        assert!(applied);
        let state = slot.snapshot();
        assert_eq!(state.count, 2);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }

    #[test]
    fn older_outcome_after_newer_one_is_discarded() {
        let slot = Slot::new(Listing::default());
        let first = slot.begin();
        let second = slot.begin();

        assert!(second.finish(Ok(|l: &mut Listing| l.count = 2)));
        assert!(slot.snapshot().loading, "first fetch is still pending");

        assert!(!first.finish(Ok(|l: &mut Listing| l.count = 1)));
        let state = slot.snapshot();
        assert_eq!(state.count, 2);
        assert!(!state.loading);
    }

    #[test]
    fn loading_stays_set_until_last_fetch_settles() {
        let slot = Slot::new(Listing::default());
        let first = slot.begin();
        let second = slot.begin();

        assert!(first.finish(Ok(|l: &mut Listing| l.count = 1)));
        assert!(slot.snapshot().loading);

        assert!(second.finish(Ok(|l: &mut Listing| l.count = 2)));
        let state = slot.snapshot();
        assert_eq!(state.count, 2);
        assert!(!state.loading);
    }

    #[test]
    fn dropped_fetch_clears_loading() {
        let slot = Slot::new(Listing::default());
        let pending = slot.begin();
        assert!(slot.snapshot().loading);
        drop(pending);
        assert!(!slot.snapshot().loading);
    }

    #[test]
    fn dropping_newer_fetch_lets_older_outcome_apply() {
        let slot = Slot::new(Listing::default());
        let first = slot.begin();
        drop(slot.begin());
        assert!(slot.snapshot().loading, "first fetch is still pending");

        assert!(first.finish(Ok(|l: &mut Listing| l.count = 1)));
        let state = slot.snapshot();
        assert_eq!(state.count, 1);
        assert!(!state.loading);
    }

    #[test]
    fn subscribers_see_finished_state() {
        let slot = Slot::new(CategoryDirectory::default());
        let mut rx = slot.subscribe();
        slot.begin()
            .finish(Ok(|d: &mut CategoryDirectory| d.items.clear()));
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().loading);
    }
}

//! Debounced, generation-guarded identifier search.
//!
//! Every call to [`SimbadSearch::input`] bumps a generation counter and schedules a search after
//! the debounce delay. When the timer fires, the task only proceeds if no newer input arrived in
//! the meantime; when the response comes back, it is applied only if its generation is still the
//! newest. Newer input never aborts a request already in flight, its late answer is dropped
//! instead; only the client's request timeout ends it.
//!
//! ```text
//! input("M")   ──┐ gen 1, sleeps ── superseded, no request
//! input("M3")  ──┼ gen 2, sleeps ── request ─────────────── late answer dropped
//! input("M31") ──┘ gen 3, sleeps ──────── request ── answer applied
//! ```
//!
//! The shared state is guarded by a `parking_lot::Mutex` that is never held across an await.

use std::{sync::Arc, time::Duration};

use log::{debug, warn};
use parking_lot::Mutex;
use tokio::{runtime::Handle, task::JoinHandle};

use crate::{
    constants::OidRef,
    notifications::{Notification, Notifier},
    simbad::{
        client::SimbadClient,
        query::{check_query_chars, QueryKind},
        response::IdentifierCandidate,
    },
    target_errors::TargetError,
};

/// Observable state of the search box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    pub query: String,
    pub candidates: Vec<IdentifierCandidate>,
    pub invalid_input: bool,
    pub loading: bool,
    pub generation: u64,
}

#[derive(Default)]
struct SearchState {
    snapshot: SearchSnapshot,
    kind: QueryKind,
    pending: Option<JoinHandle<()>>,
}

pub struct SimbadSearch {
    client: Arc<SimbadClient>,
    notifier: Arc<dyn Notifier>,
    debounce: Duration,
    state: Arc<Mutex<SearchState>>,
}

impl std::fmt::Debug for SimbadSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimbadSearch")
            .field("debounce", &self.debounce)
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl SimbadSearch {
    pub fn new(
        client: Arc<SimbadClient>,
        notifier: Arc<dyn Notifier>,
        debounce: Duration,
        kind: QueryKind,
    ) -> Self {
        SimbadSearch {
            client,
            notifier,
            debounce,
            state: Arc::new(Mutex::new(SearchState {
                kind,
                ..SearchState::default()
            })),
        }
    }

    pub fn query_kind(&self) -> QueryKind {
        self.state.lock().kind
    }

    /// Switch between alternate-name and catalogue-reference searches.
    /// Applies to searches scheduled afterwards.
    pub fn set_query_kind(&self, kind: QueryKind) {
        self.state.lock().kind = kind;
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.lock().snapshot.clone()
    }

    pub fn candidates(&self) -> Vec<IdentifierCandidate> {
        self.state.lock().snapshot.candidates.clone()
    }

    /// Candidate currently listed for `oidref`, if any.
    pub fn find(&self, oidref: OidRef) -> Option<IdentifierCandidate> {
        self.state
            .lock()
            .snapshot
            .candidates
            .iter()
            .find(|c| c.oidref == oidref)
            .cloned()
    }

    /// Record a change of the search text and schedule a debounced search.
    ///
    /// Return
    /// ----------
    /// * The generation assigned to this input, or
    ///   - [`TargetError::InvalidCharacter`] when the text contains a blacklisted character. In
    ///     that case `invalid_input` is set, no loader is shown, no request is scheduled, and any
    ///     previously scheduled search is superseded.
    ///   - [`TargetError::RuntimeUnavailable`] when called outside a tokio runtime; the search
    ///     state is left untouched.
    pub fn input(&self, text: &str) -> Result<u64, TargetError> {
        let runtime = Handle::try_current()?;
        let mut state = self.state.lock();
        state.snapshot.generation += 1;
        state.snapshot.query = text.to_string();
        let generation = state.snapshot.generation;

        if let Err(err) = check_query_chars(text) {
            debug!("search text '{text}' rejected locally: {err}");
            state.snapshot.invalid_input = true;
            state.snapshot.loading = false;
            return Err(err);
        }
        state.snapshot.invalid_input = false;

        let kind = state.kind;
        let handle = runtime.spawn(run_search(
            Arc::clone(&self.state),
            Arc::clone(&self.client),
            Arc::clone(&self.notifier),
            self.debounce,
            text.to_string(),
            kind,
            generation,
        ));
        // dropping the previous handle detaches it; it will notice it was superseded
        state.pending = Some(handle);
        Ok(generation)
    }

    /// Wait until the most recently scheduled search has finished.
    pub async fn settle(&self) {
        loop {
            let pending = self.state.lock().pending.take();
            match pending {
                Some(handle) => {
                    if let Err(err) = handle.await {
                        warn!("search task failed: {err}");
                    }
                }
                None => break,
            }
        }
    }
}

async fn run_search(
    state: Arc<Mutex<SearchState>>,
    client: Arc<SimbadClient>,
    notifier: Arc<dyn Notifier>,
    debounce: Duration,
    text: String,
    kind: QueryKind,
    generation: u64,
) {
    tokio::time::sleep(debounce).await;

    {
        let mut guard = state.lock();
        if guard.snapshot.generation != generation {
            return;
        }
        guard.snapshot.candidates.clear();
        if text.is_empty() {
            guard.snapshot.loading = false;
            return;
        }
        guard.snapshot.loading = true;
    }

    let result = client.search_identifiers(&text, kind).await;

    let notification = {
        let mut guard = state.lock();
        if guard.snapshot.generation != generation {
            debug!("discarding stale SIMBAD answer for '{text}' (generation {generation})");
            return;
        }
        guard.snapshot.loading = false;
        match result {
            Ok(candidates) if candidates.is_empty() => Some(Notification::info(
                "Target not found",
                "target name did not match any records",
            )),
            Ok(candidates) => {
                guard.snapshot.candidates = candidates;
                None
            }
            Err(err) => Some(Notification::from_error(
                "Failed to execute SIMBAD query",
                &err,
            )),
        }
    };

    if let Some(notification) = notification {
        notifier.notify(notification);
    }
}

use std::sync::Arc;

use crate::errors::CoreError;
use crate::services::snapshot_source::SnapshotSource;
use crate::services::store::{Revision, RevisionedStore, StoreView};

/// Where a view is in its fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// Nothing requested yet
    Idle,
    /// Waiting for the response to `generation`
    Fetching { generation: u64 },
    /// Last authoritative fetch was committed under `revision`
    Committed { revision: Revision },
    /// Last authoritative fetch failed; the previous snapshot is still current
    Failed { error: CoreError },
}

/// A request the controller has issued and will accept a result for.
///
/// Only the most recently issued ticket may commit, and only once: a ticket
/// is consumed by `resolve` and cannot be copied.
#[derive(Debug, PartialEq)]
pub struct FetchTicket<P> {
    generation: u64,
    param: P,
}

impl<P> FetchTicket<P> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn param(&self) -> &P {
        &self.param
    }
}

/// What happened when a result was handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Committed(Revision),
    Failed(CoreError),
    /// The ticket had been superseded; the result was dropped unseen.
    Discarded,
}

/// Drives one view: owns its selection, store and fetch state.
///
/// Fetches are identified by a generation number. Any number of fetches may
/// be outstanding, and they may resolve in any order; a result is committed
/// only if its ticket is the last one issued. Superseded requests are not
/// cancelled, just ignored on arrival. There is no automatic retry.
pub struct FetchController<S: SnapshotSource> {
    source: Arc<S>,
    store: RevisionedStore<S::Snapshot>,
    selection: S::Param,
    state: FetchState,
    last_issued: u64,
    last_resolved: u64,
}

impl<S: SnapshotSource> FetchController<S> {
    pub fn new(source: Arc<S>, initial_selection: S::Param) -> Self {
        Self {
            source,
            store: RevisionedStore::new(),
            selection: initial_selection,
            state: FetchState::Idle,
            last_issued: 0,
            last_resolved: 0,
        }
    }

    // ── Triggers ────────────────────────────────────────────────────

    /// First fetch for the current selection.
    pub fn mount(&mut self) -> FetchTicket<S::Param> {
        self.issue()
    }

    /// Change the selection. Selecting what is already selected issues nothing.
    pub fn select(&mut self, param: S::Param) -> Option<FetchTicket<S::Param>> {
        if param == self.selection {
            return None;
        }
        tracing::info!(
            source = self.source.name(),
            from = ?self.selection,
            to = ?param,
            "selection changed"
        );
        self.selection = param;
        Some(self.issue())
    }

    /// Fetch again for the current selection (manual refresh).
    pub fn retrigger(&mut self) -> FetchTicket<S::Param> {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket<S::Param> {
        self.last_issued += 1;
        self.state = FetchState::Fetching {
            generation: self.last_issued,
        };
        tracing::debug!(
            source = self.source.name(),
            generation = self.last_issued,
            param = ?self.selection,
            "fetch issued"
        );
        FetchTicket {
            generation: self.last_issued,
            param: self.selection.clone(),
        }
    }

    // ── Results ─────────────────────────────────────────────────────

    /// Hand back the result for `ticket`. A generation resolves at most once.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket<S::Param>,
        result: Result<S::Snapshot, CoreError>,
    ) -> FetchOutcome {
        if ticket.generation != self.last_issued || ticket.generation <= self.last_resolved {
            tracing::debug!(
                source = self.source.name(),
                generation = ticket.generation,
                current = self.last_issued,
                "discarding superseded fetch result"
            );
            return FetchOutcome::Discarded;
        }
        self.last_resolved = ticket.generation;

        match result {
            Ok(snapshot) => {
                let revision = self.store.commit(snapshot);
                tracing::debug!(source = self.source.name(), %revision, "snapshot committed");
                self.state = FetchState::Committed { revision };
                FetchOutcome::Committed(revision)
            }
            Err(error) => {
                tracing::warn!(
                    source = self.source.name(),
                    param = ?ticket.param,
                    %error,
                    "fetch failed; keeping previous snapshot"
                );
                self.state = FetchState::Failed {
                    error: error.clone(),
                };
                FetchOutcome::Failed(error)
            }
        }
    }

    /// Run the source for `ticket` and resolve it.
    pub async fn load(&mut self, ticket: FetchTicket<S::Param>) -> FetchOutcome {
        let source = Arc::clone(&self.source);
        let result = source.load(&ticket.param).await;
        self.resolve(ticket, result)
    }

    /// `select` + `load`. `None` when the selection did not change.
    pub async fn change_selection(&mut self, param: S::Param) -> Option<FetchOutcome> {
        let ticket = self.select(param)?;
        Some(self.load(ticket).await)
    }

    /// `retrigger` + `load`.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.retrigger();
        self.load(ticket).await
    }

    // ── Read side ───────────────────────────────────────────────────

    /// Current (snapshot, revision) pair for the rendering surface.
    pub fn current(&self) -> StoreView<S::Snapshot> {
        self.store.current()
    }

    pub fn revision(&self) -> Revision {
        self.store.revision()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn selection(&self) -> &S::Param {
        &self.selection
    }

    /// The error of the last authoritative fetch, if it failed.
    pub fn error(&self) -> Option<&CoreError> {
        match &self.state {
            FetchState::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.state, FetchState::Fetching { .. })
    }

    /// Shared handle to the source, for running a ticket outside `load`.
    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }
}

use serde::Serialize;
use std::sync::Arc;

/// Change token for a committed snapshot. 0 means nothing has been loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    pub const INITIAL: Revision = Revision(0);

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_initial(&self) -> bool {
        self.0 == 0
    }

    fn next(self) -> Revision {
        Revision(self.0 + 1)
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A snapshot together with the revision it was committed under.
///
/// Cheap to clone; readers hold one of these and can never observe a
/// snapshot paired with another commit's revision.
#[derive(Debug)]
pub struct StoreView<S> {
    pub snapshot: Arc<S>,
    pub revision: Revision,
}

impl<S> Clone for StoreView<S> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
            revision: self.revision,
        }
    }
}

/// Single-writer holder of the current snapshot.
///
/// `commit` swaps snapshot and revision in one assignment, so there is no
/// window in which the two disagree.
#[derive(Debug)]
pub struct RevisionedStore<S> {
    current: StoreView<S>,
}

impl<S: Default> RevisionedStore<S> {
    /// Starts with `S::default()` at revision 0.
    pub fn new() -> Self {
        Self {
            current: StoreView {
                snapshot: Arc::new(S::default()),
                revision: Revision::INITIAL,
            },
        }
    }
}

impl<S: Default> Default for RevisionedStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RevisionedStore<S> {
    /// Replace the snapshot and bump the revision by exactly one.
    pub fn commit(&mut self, snapshot: S) -> Revision {
        let revision = self.current.revision.next();
        self.current = StoreView {
            snapshot: Arc::new(snapshot),
            revision,
        };
        revision
    }

    /// The current (snapshot, revision) pair.
    pub fn current(&self) -> StoreView<S> {
        self.current.clone()
    }

    pub fn snapshot(&self) -> &S {
        &self.current.snapshot
    }

    pub fn revision(&self) -> Revision {
        self.current.revision
    }

    /// `true` once anything has been committed, even an empty snapshot.
    pub fn is_loaded(&self) -> bool {
        !self.current.revision.is_initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unloaded() {
        let store: RevisionedStore<Vec<u32>> = RevisionedStore::new();
        assert_eq!(store.revision(), Revision::INITIAL);
        assert!(!store.is_loaded());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn empty_commit_counts_as_loaded() {
        let mut store: RevisionedStore<Vec<u32>> = RevisionedStore::new();
        store.commit(Vec::new());
        assert!(store.is_loaded());
        assert_eq!(store.revision().value(), 1);
    }

    #[test]
    fn held_view_survives_later_commits() {
        let mut store = RevisionedStore::new();
        store.commit(vec![1]);
        let view = store.current();
        store.commit(vec![2]);
        assert_eq!(*view.snapshot, vec![1]);
        assert_eq!(view.revision.value(), 1);
        assert_eq!(store.current().revision.value(), 2);
    }
}

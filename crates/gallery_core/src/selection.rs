use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::RecordId;

/// Set of chosen record identifiers, independent of whichever page is loaded.
///
/// Grows only via [`SelectionStore::add`] and shrinks only via
/// [`SelectionStore::remove`]; navigation never clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStore {
    ids: HashSet<RecordId>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `id` was not already selected.
    pub fn add(&mut self, id: RecordId) -> bool {
        self.ids.insert(id)
    }

    /// Returns `true` when `id` was selected before the call.
    pub fn remove(&mut self, id: RecordId) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The members of `ids` that are currently selected.
    pub fn snapshot_intersected_with<I>(&self, ids: I) -> HashSet<RecordId>
    where
        I: IntoIterator<Item = RecordId>,
    {
        ids.into_iter().filter(|id| self.ids.contains(id)).collect()
    }

    /// All selected ids in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<RecordId> {
        let mut ids: Vec<_> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Session-scoped handle to a [`SelectionStore`].
///
/// Page navigation and bulk scanning both mutate the same store; each
/// operation holds the lock only for the duration of a set update, never
/// across an await point.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    inner: Arc<Mutex<SelectionStore>>,
}

impl SharedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: SelectionStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SelectionStore> {
        // Every mutation is a single set insert/remove, so a poisoned store is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, id: RecordId) -> bool {
        self.lock().add(id)
    }

    pub fn remove(&self, id: RecordId) -> bool {
        self.lock().remove(id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.lock().contains(id)
    }

    pub fn size(&self) -> usize {
        self.lock().size()
    }

    pub fn snapshot_intersected_with<I>(&self, ids: I) -> HashSet<RecordId>
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.lock().snapshot_intersected_with(ids)
    }

    /// Runs `f` with exclusive access, for updates that must apply as one step.
    pub fn with<R>(&self, f: impl FnOnce(&mut SelectionStore) -> R) -> R {
        f(&mut *self.lock())
    }

    /// A point-in-time copy of the store.
    pub fn snapshot(&self) -> SelectionStore {
        self.lock().clone()
    }
}

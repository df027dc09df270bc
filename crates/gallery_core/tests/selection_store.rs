use std::collections::HashSet;
use std::thread;

use gallery_core::{SelectionStore, SharedSelection};

#[test]
fn add_is_idempotent() {
    let mut store = SelectionStore::new();
    assert!(store.add(7));
    assert!(!store.add(7));
    assert_eq!(store.size(), 1);
    assert!(store.contains(7));
}

#[test]
fn remove_absent_id_is_noop() {
    let mut store = SelectionStore::new();
    store.add(1);
    assert!(!store.remove(2));
    assert_eq!(store.size(), 1);

    assert!(store.remove(1));
    assert!(store.is_empty());
    assert!(!store.remove(1));
}

#[test]
fn snapshot_intersection_only_reports_listed_ids() {
    let mut store = SelectionStore::new();
    for id in [1, 2, 3, 40, 41] {
        store.add(id);
    }

    let snapshot = store.snapshot_intersected_with([2, 3, 4, 5]);
    assert_eq!(snapshot, HashSet::from([2, 3]));
    assert!(store.snapshot_intersected_with(Vec::new()).is_empty());
}

#[test]
fn sorted_vec_is_ascending() {
    let mut store = SelectionStore::new();
    for id in [30, 4, 17] {
        store.add(id);
    }
    assert_eq!(store.to_sorted_vec(), vec![4, 17, 30]);
}

#[test]
fn shared_handles_see_the_same_store() {
    let selection = SharedSelection::new();
    let other = selection.clone();

    selection.add(5);
    assert!(other.contains(5));
    other.remove(5);
    assert_eq!(selection.size(), 0);
}

#[test]
fn interleaved_adds_from_threads_are_all_kept() {
    let selection = SharedSelection::new();
    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let selection = selection.clone();
            thread::spawn(move || {
                for id in 0..50u64 {
                    // Overlapping ranges exercise idempotent add under contention.
                    selection.add(worker * 25 + id);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(selection.size(), 125);
}

#[test]
fn with_applies_batch_under_one_lock() {
    let selection = SharedSelection::new();
    let added = selection.with(|store| [1, 2, 2, 3].into_iter().filter(|id| store.add(*id)).count());
    assert_eq!(added, 3);
    assert_eq!(selection.snapshot().to_sorted_vec(), vec![1, 2, 3]);
}

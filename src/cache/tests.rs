//! Tests for the result cache

use super::ResultCache;
use crate::model::{DataSource, LocalState, Relationship, RepoKind};
use std::sync::{Arc, Barrier};
use std::thread;

fn source(name: &str) -> DataSource {
    DataSource::new(name, format!("/repos/{name}"), RepoKind::Hg)
}

#[test]
fn test_get_materializes_pending_on_miss() {
    let cache: ResultCache<Relationship> = ResultCache::new();
    assert!(cache.is_empty());

    let first = cache.get(&source("alice"));
    assert_eq!(first.current(), Relationship::Pending);
    assert_eq!(first.previous(), None);
    assert_eq!(first.source(), &source("alice"));

    // The miss was recorded, and a second read returns the same value
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&source("alice")), first);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_put_carries_previous_forward() {
    let cache: ResultCache<Relationship> = ResultCache::new();
    let alice = source("alice");

    let first = cache.put(&alice, Relationship::Ahead);
    assert_eq!(first.current(), Relationship::Ahead);
    assert_eq!(first.previous(), None);

    let second = cache.put(&alice, Relationship::MergeConflict);
    assert_eq!(second.current(), Relationship::MergeConflict);
    assert_eq!(second.previous(), Some(Relationship::Ahead));

    assert_eq!(cache.get(&alice), second);
}

#[test]
fn test_put_after_get_uses_pending_as_previous() {
    let cache: ResultCache<LocalState> = ResultCache::new();
    let me = source("me");

    cache.get(&me);
    let result = cache.put(&me, LocalState::AllClear);
    assert_eq!(result.previous(), Some(LocalState::Pending));
}

#[test]
fn test_reset_to_pending_tolerates_missing_entry() {
    let cache: ResultCache<LocalState> = ResultCache::new();
    let me = source("me");

    let fresh = cache.reset_to_pending(&me);
    assert_eq!(fresh.current(), LocalState::Pending);
    assert_eq!(fresh.previous(), None);

    cache.put(&me, LocalState::MustResolve);
    let reset = cache.reset_to_pending(&me);
    assert_eq!(reset.current(), LocalState::Pending);
    assert_eq!(reset.previous(), Some(LocalState::MustResolve));
}

#[test]
fn test_upsert_with_sees_prior_entry() {
    let cache: ResultCache<Relationship> = ResultCache::new();
    let bob = source("bob");

    let seen_none = cache.upsert_with(&bob, |prior| {
        assert!(prior.is_none());
        crate::model::RelationshipResult::succeeding(bob.clone(), Relationship::Same, prior)
    });
    assert_eq!(seen_none.previous(), None);

    cache.upsert_with(&bob, |prior| {
        assert_eq!(prior.map(|p| p.current()), Some(Relationship::Same));
        crate::model::RelationshipResult::succeeding(bob.clone(), Relationship::Behind, prior)
    });
    assert_eq!(cache.get(&bob).current(), Relationship::Behind);
}

#[test]
fn test_values_is_a_snapshot() {
    let cache: ResultCache<Relationship> = ResultCache::new();
    cache.put(&source("bob"), Relationship::Same);
    cache.put(&source("alice"), Relationship::Behind);

    let snapshot = cache.values();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].source().name, "alice");
    assert_eq!(snapshot[1].source().name, "bob");

    cache.put(&source("alice"), Relationship::Same);
    cache.get(&source("carol"));

    // Earlier snapshot is unaffected by later mutations
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].current(), Relationship::Behind);
    assert_eq!(cache.values().len(), 3);
}

#[test]
fn test_concurrent_get_on_same_key_inserts_once() {
    let cache: Arc<ResultCache<Relationship>> = Arc::new(ResultCache::new());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get(&source("shared"))
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(result.current(), Relationship::Pending);
        assert_eq!(result.previous(), None);
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_concurrent_puts_never_lose_an_update() {
    // Every write must see the value written immediately before it, so the
    // chain of (previous -> current) pairs covers every write exactly once.
    let cache: Arc<ResultCache<Relationship>> = Arc::new(ResultCache::new());
    let key = source("racy");
    let values = [
        Relationship::Same,
        Relationship::Ahead,
        Relationship::Behind,
        Relationship::MergeClean,
    ];
    let rounds = 200;

    let handles: Vec<_> = values
        .iter()
        .map(|&value| {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            thread::spawn(move || {
                (0..rounds)
                    .map(|_| cache.put(&key, value))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    let firsts = results.iter().filter(|r| r.previous().is_none()).count();
    assert_eq!(firsts, 1, "exactly one write saw an empty cache");

    // Each stored value is named as `previous` by exactly one later write,
    // except the final one still in the cache.
    for value in values {
        let written = results.iter().filter(|r| r.current() == value).count();
        let replaced = results
            .iter()
            .filter(|r| r.previous() == Some(value))
            .count();
        let still_current = usize::from(cache.get(&key).current() == value);
        assert_eq!(written, replaced + still_current);
    }
}

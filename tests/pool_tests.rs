// Host-side tests for the fixed-capacity particle pool.

use ambient_core::*;
use std::collections::HashSet;

#[test]
fn acquire_hands_out_distinct_records_until_exhausted() {
    let mut pool = ParticlePool::new(5);
    let mut ids = HashSet::new();
    for _ in 0..5 {
        let r = pool.acquire().expect("pool has room");
        assert!(r.active);
        ids.insert(r.id);
    }
    assert_eq!(ids.len(), 5);
    assert_eq!(pool.active_count(), 5);
    assert_eq!(pool.available(), 0);

    // Sixth acquire fails without disturbing the held set
    assert!(pool.acquire().is_none());
    assert_eq!(pool.active_count(), 5);
}

#[test]
fn released_record_is_reused() {
    let mut pool = ParticlePool::new(5);
    for _ in 0..5 {
        pool.acquire();
    }
    pool.release(2);
    assert_eq!(pool.active_count(), 4);
    assert!(!pool.get(2).unwrap().active);

    let again = pool.acquire().expect("one record was freed");
    assert_eq!(again.id, 2);
    assert!(again.active);
    assert_eq!(pool.active_count(), 5);
}

#[test]
fn counts_always_sum_to_capacity() {
    let mut pool = ParticlePool::new(8);
    let mut held = Vec::new();
    for step in 0..40u32 {
        if step % 3 == 2 {
            if let Some(id) = held.pop() {
                pool.release(id);
            }
        } else if let Some(r) = pool.acquire() {
            held.push(r.id);
        }
        assert_eq!(pool.active_count() + pool.available(), pool.capacity());
        assert_eq!(pool.active_count(), held.len());
        assert!(pool.active_count() <= pool.capacity());
    }
}

#[test]
fn release_is_idempotent_and_ignores_unknown_ids() {
    let mut pool = ParticlePool::new(3);
    let id = pool.acquire().unwrap().id;
    let kept: Vec<_> = (0..2).map(|_| pool.acquire().unwrap().id).collect();
    pool.release(id);

    let snapshot = |pool: &ParticlePool| {
        (
            pool.available(),
            pool.active_count(),
            pool.iter_active().map(|r| r.id).collect::<Vec<_>>(),
            (0..3).map(|i| *pool.get(i).unwrap()).collect::<Vec<_>>(),
        )
    };
    let after_first = snapshot(&pool);
    pool.release(id);
    assert_eq!(snapshot(&pool), after_first);
    pool.release(99);
    assert_eq!(snapshot(&pool), after_first);

    assert_eq!(pool.active_count(), 2);
    assert_eq!(pool.available(), 1);
    assert!(!pool.get(id).unwrap().active);
    assert_eq!(pool.iter_active().map(|r| r.id).collect::<Vec<_>>(), kept);

    // the released record is the next one handed out
    assert_eq!(pool.acquire().unwrap().id, id);
    assert!(pool.acquire().is_none());
}

#[test]
fn release_from_the_middle_keeps_the_active_list_consistent() {
    let mut pool = ParticlePool::new(4);
    let ids: Vec<_> = (0..4).map(|_| pool.acquire().unwrap().id).collect();
    pool.release(ids[1]);
    pool.release(ids[3]);

    let active: HashSet<_> = pool.iter_active().map(|r| r.id).collect();
    assert_eq!(active, HashSet::from([ids[0], ids[2]]));
    assert!(pool.iter_active().all(|r| r.active));

    // The record moved by swap_remove can still be released
    pool.release(ids[0]);
    pool.release(ids[2]);
    assert_eq!(pool.active_count(), 0);
}

#[test]
fn reset_all_returns_everything() {
    let mut pool = ParticlePool::new(6);
    for _ in 0..4 {
        pool.acquire();
    }
    pool.reset_all();
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.available(), 6);
    assert_eq!(pool.iter_active().count(), 0);
}

#[test]
fn get_mut_only_reaches_held_records() {
    let mut pool = ParticlePool::new(2);
    assert!(pool.get_mut(0).is_none());
    let id = pool.acquire().unwrap().id;
    pool.get_mut(id).unwrap().size = 4.5;
    assert_eq!(pool.get(id).unwrap().size, 4.5);
    pool.release(id);
    assert!(pool.get_mut(id).is_none());
}

#[test]
fn zero_capacity_pool_never_hands_out() {
    let mut pool = ParticlePool::new(0);
    assert!(pool.acquire().is_none());
    assert_eq!(pool.capacity(), 0);
}

#[test]
fn capacity_is_clamped_to_the_id_space() {
    assert_eq!(ParticlePool::clamped_capacity(64), 64);
    assert_eq!(
        ParticlePool::clamped_capacity(usize::MAX),
        ParticleId::MAX as usize
    );

    let mut pool = ParticlePool::new(5);
    let ids: Vec<_> = (0..5).map(|_| pool.acquire().unwrap().id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

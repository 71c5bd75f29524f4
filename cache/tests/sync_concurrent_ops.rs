mod common;

use common::{build_region, init_tracing};
use region_cache::PolicyKind;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_inserts_lose_nothing() {
  init_tracing();
  let (cache, overflow) = build_region(PolicyKind::Lru, 50, 4);

  let num_threads = 8;
  let per_thread = 200;
  let barrier = Arc::new(Barrier::new(num_threads));
  let mut handles = vec![];

  for t in 0..num_threads {
    let cache = cache.clone();
    let barrier = barrier.clone();
    handles.push(thread::spawn(move || {
      barrier.wait();
      for i in 0..per_thread {
        cache.put(format!("t{t}-{i}"), i as i32);
      }
    }));
  }
  for handle in handles {
    handle.join().unwrap();
  }

  // Every distinct key is either resident or was spooled exactly once.
  assert!(cache.size() <= 50);
  assert_eq!(cache.size() + overflow.len(), num_threads * per_thread);
  let spilled: HashSet<String> = overflow.keys().into_iter().collect();
  assert_eq!(spilled.len(), overflow.len());
  assert!(cache.key_set().iter().all(|key| !spilled.contains(key)));
  assert!(cache.verify());
}

#[test]
fn test_concurrent_mixed_ops_stay_consistent() {
  for policy in [PolicyKind::Lru, PolicyKind::Fifo, PolicyKind::Lifo, PolicyKind::Mru] {
    let (cache, _overflow) = build_region(policy, 20, 2);

    let num_threads = 6;
    let barrier = Arc::new(Barrier::new(num_threads));
    let mut handles = vec![];

    for t in 0..num_threads {
      let cache = cache.clone();
      let barrier = barrier.clone();
      handles.push(thread::spawn(move || {
        barrier.wait();
        for i in 0..500usize {
          // A small shared key space so threads fight over the same entries.
          let key = format!("k{}", (i * 7 + t) % 40);
          match i % 5 {
            0 | 1 => cache.put(key, i as i32),
            2 | 3 => {
              cache.get(&key);
            }
            _ => {
              cache.remove(&key);
            }
          }
        }
      }));
    }
    for handle in handles {
      handle.join().unwrap();
    }

    assert!(cache.size() <= 20, "{policy}: size {}", cache.size());
    assert!(cache.verify(), "{policy}: map and list diverged");
    assert_eq!(cache.keys_in_eviction_order().len(), cache.size());
  }
}

#[test]
fn test_concurrent_remove_all_and_inserts() {
  let (cache, _overflow) = build_region(PolicyKind::Fifo, 30, 3);

  let barrier = Arc::new(Barrier::new(3));
  let mut handles = vec![];

  for t in 0..2 {
    let cache = cache.clone();
    let barrier = barrier.clone();
    handles.push(thread::spawn(move || {
      barrier.wait();
      for i in 0..1000 {
        cache.put(format!("t{t}-{}", i % 100), i);
      }
    }));
  }

  let clearer = cache.clone();
  let clear_barrier = barrier.clone();
  handles.push(thread::spawn(move || {
    clear_barrier.wait();
    for _ in 0..50 {
      clearer.remove_all();
      thread::yield_now();
    }
  }));

  for handle in handles {
    handle.join().unwrap();
  }

  assert!(cache.size() <= 30);
  assert!(cache.verify());
}

#[test]
fn test_concurrent_free_elements() {
  let (cache, overflow) = build_region(PolicyKind::Lru, 1000, 10);
  for i in 0..400 {
    cache.put(format!("k{i}"), i);
  }

  let barrier = Arc::new(Barrier::new(4));
  let mut handles = vec![];
  for _ in 0..4 {
    let cache = cache.clone();
    let barrier = barrier.clone();
    handles.push(thread::spawn(move || {
      barrier.wait();
      cache.free_elements(150)
    }));
  }

  let freed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
  assert_eq!(freed, 400);
  assert_eq!(overflow.len(), 400);
  assert_eq!(cache.size(), 0);
  assert!(cache.verify());
}

mod common;

use common::{build_region, k, keys};
use pretty_assertions::assert_eq;
use region_cache::PolicyKind;

mod lru {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_lru_evicts_least_recently_used() {
    let (cache, overflow) = build_region(PolicyKind::Lru, 3, 1);
    for name in ["k1", "k2", "k3", "k4"] {
      cache.put(k(name), 0);
    }

    assert_eq!(overflow.keys(), keys(&["k1"]));
    assert_eq!(cache.keys_in_eviction_order(), keys(&["k4", "k3", "k2"]));
  }

  #[test]
  fn test_lru_read_protects_element() {
    let (cache, overflow) = build_region(PolicyKind::Lru, 3, 1);
    for name in ["k1", "k2", "k3"] {
      cache.put(k(name), 0);
    }
    assert!(cache.get(&k("k1")).is_some());

    cache.put(k("k4"), 0);

    assert_eq!(overflow.keys(), keys(&["k2"]));
    assert!(cache.get_quiet(&k("k1")).is_some());
  }

  #[test]
  fn test_lru_read_then_overflow_scenario() {
    let (cache, overflow) = build_region(PolicyKind::Lru, 2, 1);
    cache.put(k("A"), 1);
    cache.put(k("B"), 2);
    cache.get(&k("A"));
    cache.put(k("C"), 3);

    let mut resident: Vec<String> = cache.key_set().into_iter().collect();
    resident.sort();
    assert_eq!(resident, keys(&["A", "C"]));
    assert_eq!(overflow.keys(), keys(&["B"]));
    assert!(cache.verify());
  }

  #[test]
  fn test_lru_update_moves_to_head() {
    let (cache, overflow) = build_region(PolicyKind::Lru, 3, 1);
    for name in ["k1", "k2", "k3"] {
      cache.put(k(name), 0);
    }
    cache.put(k("k1"), 1);
    assert_eq!(cache.keys_in_eviction_order(), keys(&["k1", "k3", "k2"]));

    cache.put(k("k4"), 0);
    assert_eq!(overflow.keys(), keys(&["k2"]));
  }
}

mod fifo {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_fifo_ignores_reads() {
    let (cache, overflow) = build_region(PolicyKind::Fifo, 3, 1);
    for name in ["k1", "k2", "k3"] {
      cache.put(k(name), 0);
    }
    for _ in 0..5 {
      cache.get(&k("k1"));
    }
    assert_eq!(cache.keys_in_eviction_order(), keys(&["k3", "k2", "k1"]));

    cache.put(k("k4"), 0);
    assert_eq!(overflow.keys(), keys(&["k1"]));
  }

  #[test]
  fn test_fifo_rewrite_counts_as_fresh_insert() {
    let (cache, overflow) = build_region(PolicyKind::Fifo, 3, 1);
    for name in ["k1", "k2", "k3"] {
      cache.put(k(name), 0);
    }
    cache.put(k("k1"), 1);

    cache.put(k("k4"), 0);
    assert_eq!(overflow.keys(), keys(&["k2"]));
    assert_eq!(*cache.get(&k("k1")).unwrap().value(), 1);
  }
}

mod lifo {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_lifo_newest_is_next_victim() {
    let (cache, _overflow) = build_region(PolicyKind::Lifo, 5, 1);
    for name in ["A", "B", "C"] {
      cache.put(k(name), 0);
    }
    assert_eq!(cache.keys_in_eviction_order(), keys(&["A", "B", "C"]));

    assert_eq!(cache.free_elements(1), 1);
    assert_eq!(cache.keys_in_eviction_order(), keys(&["A", "B"]));
  }

  #[test]
  fn test_lifo_overflowing_insert_evicts_itself() {
    let (cache, overflow) = build_region(PolicyKind::Lifo, 2, 1);
    for name in ["A", "B", "C"] {
      cache.put(k(name), 0);
    }

    assert_eq!(overflow.keys(), keys(&["C"]));
    assert_eq!(cache.keys_in_eviction_order(), keys(&["A", "B"]));
  }

  #[test]
  fn test_lifo_ignores_reads() {
    let (cache, _overflow) = build_region(PolicyKind::Lifo, 5, 1);
    for name in ["A", "B", "C"] {
      cache.put(k(name), 0);
    }
    cache.get(&k("A"));
    assert_eq!(cache.keys_in_eviction_order(), keys(&["A", "B", "C"]));
  }
}

mod mru {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_mru_read_makes_element_next_victim() {
    let (cache, overflow) = build_region(PolicyKind::Mru, 5, 1);
    for name in ["k1", "k2", "k3"] {
      cache.put(k(name), 0);
    }
    cache.get(&k("k1"));
    assert_eq!(cache.keys_in_eviction_order(), keys(&["k2", "k3", "k1"]));

    assert_eq!(cache.free_elements(1), 1);
    assert_eq!(overflow.keys(), keys(&["k1"]));
  }

  #[test]
  fn test_mru_overflowing_insert_evicts_itself() {
    let (cache, overflow) = build_region(PolicyKind::Mru, 3, 1);
    for name in ["k1", "k2", "k3"] {
      cache.put(k(name), 0);
    }
    cache.put(k("k4"), 0);

    assert_eq!(overflow.keys(), keys(&["k4"]));
    assert_eq!(cache.size(), 3);
    assert!(cache.verify());
  }
}

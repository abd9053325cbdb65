//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's capacity, recency and expiry rules.

use proptest::prelude::*;
use std::collections::HashSet;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{CacheStore, SharedCache};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys shaped like free-form addresses
fn address_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,]{1,48}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
    Evict { key: String },
    EvictStale,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (address_key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Put { key, value }),
        address_key_strategy().prop_map(|key| CacheOp::Get { key }),
        address_key_strategy().prop_map(|key| CacheOp::Evict { key }),
        Just(CacheOp::EvictStale),
    ]
}

fn unique(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits and misses reported by the store match what callers observed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, TEST_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => store.put(key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Evict { key } => {
                    store.evict(&key);
                }
                CacheOp::EvictStale => {
                    store.evict_stale();
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // Inserting N distinct keys into a store of capacity C evicts exactly
    // max(0, N - C) entries and never exceeds C.
    #[test]
    fn prop_capacity_enforcement(
        keys in prop::collection::vec(address_key_strategy(), 1..120),
        capacity in 1usize..40
    ) {
        let keys = unique(keys);
        let mut store = CacheStore::new(capacity, TEST_TTL);

        for key in &keys {
            store.put(key.clone(), "v".to_string());
            prop_assert!(store.len() <= capacity);
        }

        let expected_evictions = keys.len().saturating_sub(capacity) as u64;
        prop_assert_eq!(store.stats().evictions, expected_evictions);
        prop_assert_eq!(store.len(), keys.len().min(capacity));
    }

    // Without intervening reads, the survivors are the most recently written keys.
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::vec(address_key_strategy(), 2..60),
        capacity in 1usize..20
    ) {
        let keys = unique(keys);
        let mut store = CacheStore::new(capacity, TEST_TTL);

        for key in &keys {
            store.put(key.clone(), key.clone());
        }

        let cutoff = keys.len().saturating_sub(capacity);
        for (i, key) in keys.iter().enumerate() {
            if i < cutoff {
                prop_assert!(!store.contains(key), "{} should have been evicted", key);
            } else {
                prop_assert_eq!(store.get(key), Some(key.clone()));
            }
        }
    }

    // A read makes a key the most recently used, so it is not the next victim.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(address_key_strategy(), 3..8),
        new_key in address_key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() >= 3);
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(keys.len(), TEST_TTL);
        for key in &keys {
            store.put(key.clone(), format!("value_{}", key));
        }

        let accessed = keys[0].clone();
        let expected_evicted = keys[1].clone();
        prop_assert!(store.get(&accessed).is_some());

        store.put(new_key.clone(), "new".to_string());

        prop_assert!(store.contains(&accessed));
        prop_assert!(!store.contains(&expected_evicted));
        prop_assert!(store.contains(&new_key));
    }

    // Overwriting a key keeps a single entry holding the latest value.
    #[test]
    fn prop_overwrite_semantics(
        key in address_key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, TEST_TTL);

        store.put(key.clone(), value1);
        store.put(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // A stale sweep on fresh entries removes nothing; evict_all removes everything.
    #[test]
    fn prop_stale_sweep_is_not_a_clear(
        keys in prop::collection::vec(address_key_strategy(), 1..30)
    ) {
        let keys = unique(keys);
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, TEST_TTL);
        for key in &keys {
            store.put(key.clone(), "v".to_string());
        }

        prop_assert_eq!(store.evict_stale(), 0);
        prop_assert_eq!(store.len(), keys.len());

        prop_assert_eq!(store.evict_all(), keys.len());
        prop_assert!(store.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    // Expired entries are never returned and a sweep removes exactly them.
    #[test]
    fn prop_ttl_expiration_behavior(
        stale in prop::collection::vec(address_key_strategy(), 1..10),
        fresh in prop::collection::vec(address_key_strategy(), 1..10)
    ) {
        let stale = unique(stale);
        let fresh: Vec<String> = unique(fresh)
            .into_iter()
            .filter(|k| !stale.contains(k))
            .collect();

        let mut store = CacheStore::new(TEST_MAX_ENTRIES, Duration::from_millis(200));
        for key in &stale {
            store.put(key.clone(), "old".to_string());
        }

        sleep(Duration::from_millis(250));

        for key in &fresh {
            store.put(key.clone(), "new".to_string());
        }

        for key in &stale {
            prop_assert!(!store.contains(key));
        }

        prop_assert_eq!(store.evict_stale(), stale.len());
        prop_assert_eq!(store.len(), fresh.len());
        for key in &fresh {
            prop_assert_eq!(store.get(key), Some("new".to_string()));
        }
    }
}

// == Concurrent Operation Correctness ==

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Concurrent writers and bulk evictions never leave the store above capacity
    // or return a value that was never written for that key.
    #[test]
    fn prop_concurrent_operation_correctness(
        keys in prop::collection::vec(address_key_strategy(), 10..60),
        capacity in 1usize..16
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let cache = SharedCache::new("prop", CacheStore::new(capacity, TEST_TTL));
            let mut handles = vec![];

            for (i, key) in keys.into_iter().enumerate() {
                let cache = cache.clone();
                handles.push(tokio::spawn(async move {
                    if i % 7 == 0 {
                        cache.evict_all().await;
                        return Ok(());
                    }
                    let value = cache
                        .get_or_compute(key.clone(), |k| {
                            let v = format!("value_{}", k);
                            async move { Ok::<_, ()>(v) }
                        })
                        .await
                        .map_err(|_| "compute failed".to_string())?;
                    if value != format!("value_{}", key) {
                        return Err(format!("Corrupted value for '{}': {}", key, value));
                    }
                    Ok::<_, String>(())
                }));
            }

            for handle in handles {
                let result = handle.await.expect("Task should not panic");
                prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
            }

            let stats = cache.stats().await;
            prop_assert!(stats.total_entries <= capacity);
            prop_assert!((0.0..=1.0).contains(&stats.hit_rate()));
            Ok(())
        })?;
    }
}

//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache's expiration, insert-only and
//! promotion rules over generated inputs. Each case runs on its own
//! paused-clock runtime so elapsed time is exact.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::CacheError;
use crate::models::User;
use crate::records::testing::RecordingStore;

// == Test Configuration ==
const TEST_DEFAULT_EXPIRATION: Duration = Duration::from_secs(300);
const TEST_CLEANUP_INTERVAL: Duration = Duration::from_secs(86_400 * 365);

fn test_config() -> Config {
    Config::default()
        .with_default_expiration(TEST_DEFAULT_EXPIRATION)
        .with_cleanup_interval(TEST_CLEANUP_INTERVAL)
}

/// Runs `body` on a fresh current-thread runtime with the clock paused.
fn run_paused<F>(body: F) -> Result<(), TestCaseError>
where
    F: Future<Output = Result<(), TestCaseError>>,
{
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .expect("failed to build runtime")
        .block_on(body)
}

// == Strategies ==
/// Generates valid cache keys
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,32}"
}

fn user_strategy() -> impl Strategy<Value = User> {
    (valid_key_strategy(), 18u32..70, prop_oneof!["female", "male", "other"])
        .prop_map(|(name, age, sex)| User::new(name, age, sex))
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String },
    Delete { key: String },
    Exists { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // A small key space so operations collide often
    let key = "[a-d]";
    prop_oneof![
        key.prop_map(|key| CacheOp::Set { key }),
        key.prop_map(|key| CacheOp::Delete { key }),
        key.prop_map(|key| CacheOp::Exists { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Keys that were never set always report NotFound.
    #[test]
    fn prop_absent_keys_not_found(
        stored in prop::collection::hash_set(valid_key_strategy(), 0..10),
        probe in valid_key_strategy()
    ) {
        prop_assume!(!stored.contains(&probe));

        run_paused(async move {
            let store = CacheStore::new(&test_config(), Arc::new(RecordingStore::new()));
            for key in &stored {
                store.set(key.clone(), User::new(key.clone(), 30, "x"), Duration::ZERO).await.unwrap();
            }

            let result = store.get(&probe).await;
            prop_assert!(matches!(result, Err(CacheError::NotFound(_))));
            Ok(())
        })?;
    }

    // A second Set on a key fails and leaves the first value in place.
    #[test]
    fn prop_set_is_insert_only(first in user_strategy(), age in 18u32..70) {
        run_paused(async move {
            let records = Arc::new(RecordingStore::new());
            let store = CacheStore::new(&test_config(), records.clone());
            store.set_user(first.clone(), Duration::ZERO).await.unwrap();

            let second = User::new(first.name.clone(), age, "changed");
            let result = store.set_user(second, Duration::ZERO).await;

            prop_assert!(matches!(result, Err(CacheError::DuplicateKey(_))));
            let item = store.get(&first.name).await.unwrap();
            prop_assert_eq!(item.value.as_user(), Some(&first));
            prop_assert_eq!(records.inserted().len(), 1);
            Ok(())
        })?;
    }

    // Items are readable up to and including their expiration instant,
    // and expired strictly after it.
    #[test]
    fn prop_strict_expiration_boundary(
        user in user_strategy(),
        lifetime_ms in 1u64..100_000,
        before_ms in 0u64..100_000,
        after_ms in 1u64..100_000
    ) {
        let before_ms = before_ms.min(lifetime_ms);

        run_paused(async move {
            let store = CacheStore::new(&test_config(), Arc::new(RecordingStore::new()));
            let key = user.name.clone();
            store.set_user(user, Duration::from_millis(lifetime_ms)).await.unwrap();

            tokio::time::advance(Duration::from_millis(before_ms)).await;
            prop_assert!(store.get(&key).await.is_ok());

            tokio::time::advance(Duration::from_millis(lifetime_ms - before_ms)).await;
            prop_assert!(store.get(&key).await.is_ok(), "valid at the expiration instant");

            tokio::time::advance(Duration::from_millis(after_ms)).await;
            prop_assert!(matches!(store.get(&key).await, Err(CacheError::Expired(_))));
            Ok(())
        })?;
    }

    // Endless items never report Expired.
    #[test]
    fn prop_endless_items_never_expire(user in user_strategy(), elapsed_secs in 0u64..10_000_000) {
        run_paused(async move {
            let config = test_config().with_endless_lifetime(true);
            let store = CacheStore::new(&config, Arc::new(RecordingStore::new()));
            let key = user.name.clone();
            store.set_user(user, Duration::ZERO).await.unwrap();

            tokio::time::advance(Duration::from_secs(elapsed_secs)).await;

            let item = store.get(&key).await.unwrap();
            prop_assert!(item.is_endless());
            Ok(())
        })?;
    }

    // Promotion is refused exactly while tenure is below the interval.
    #[test]
    fn prop_promotion_gate(
        user in user_strategy(),
        interval_secs in 0u64..1_000,
        tenure_secs in 0u64..2_000
    ) {
        run_paused(async move {
            let records = Arc::new(RecordingStore::new());
            let config = test_config().with_promotion_interval(Duration::from_secs(interval_secs));
            let store = CacheStore::new(&config, records.clone());
            let key = user.name.clone();
            store.set_user(user, Duration::ZERO).await.unwrap();

            tokio::time::advance(Duration::from_secs(tenure_secs)).await;
            let result = store.request_promotion(&key).await;

            if tenure_secs < interval_secs {
                prop_assert!(matches!(result, Err(CacheError::TooSoon { .. })), "expected TooSoon, got {:?}", result);
                prop_assert!(records.promoted().is_empty());
            } else {
                prop_assert!(result.is_ok());
                prop_assert_eq!(records.promoted(), vec![key]);
            }
            Ok(())
        })?;
    }

    // Presence always matches a set-of-keys model, and the record store
    // sees exactly the inserts and deletes that succeeded.
    #[test]
    fn prop_presence_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        run_paused(async move {
            let records = Arc::new(RecordingStore::new());
            let store = CacheStore::new(&test_config(), records.clone());
            let mut model: HashSet<String> = HashSet::new();
            let mut expected_deletes = 0;

            for op in ops {
                match op {
                    CacheOp::Set { key } => {
                        let result = store.set(key.clone(), User::new(key.clone(), 30, "x"), Duration::ZERO).await;
                        prop_assert_eq!(result.is_ok(), model.insert(key));
                    }
                    CacheOp::Delete { key } => {
                        let result = store.delete(&key).await;
                        let present = model.remove(&key);
                        prop_assert_eq!(result.is_ok(), present);
                        if present {
                            expected_deletes += 1;
                        }
                    }
                    CacheOp::Exists { key } => {
                        prop_assert_eq!(store.exists(&key).await, model.contains(&key));
                    }
                }
            }

            prop_assert_eq!(store.len().await, model.len());
            prop_assert_eq!(records.delete_calls().len(), expected_deletes);
            Ok(())
        })?;
    }
}

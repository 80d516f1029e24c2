//! Cache Store Module
//!
//! Main cache engine: a HashMap of items behind one reader/writer lock, kept
//! consistent with the backing record store on every insert and delete.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheStats, ExpirationPolicy, Item};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{EmployeeRecord, Payload, User, UserPatch};
use crate::records::RecordStore;
use crate::tasks::{spawn_reclamation_task, ReclamationHandle};

// == Sweep Report ==
/// Outcome of one reclamation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Keys removed from the cache
    pub reclaimed: Vec<String>,
    /// True if the record store rejected the bulk delete for `reclaimed`
    pub sync_failed: bool,
}

// == Cache Inner ==
/// State shared between the cache handle and its reclamation task.
pub(crate) struct CacheInner {
    items: RwLock<HashMap<String, Item>>,
    policy: ExpirationPolicy,
    promotion_interval: Duration,
    records: Arc<dyn RecordStore>,
    stats: StatsRecorder,
}

impl CacheInner {
    /// Collects keys of items expired at `now` under the shared lock.
    async fn expired_keys(&self, now: Instant) -> Vec<String> {
        self.items
            .read()
            .await
            .iter()
            .filter(|(_, item)| self.policy.is_expired(item, now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Reclaim Expired ==
    /// Runs one reclamation sweep.
    ///
    /// Expired keys are collected under the shared lock, removed under the
    /// exclusive lock, then deleted from the record store with no lock held.
    /// Keys are re-checked before removal, so an item replaced between the
    /// scan and the removal survives. A failed record store delete is
    /// logged and counted; the local removal is kept.
    pub(crate) async fn reclaim_expired(&self) -> SweepReport {
        let mut reclaimed = self.expired_keys(Instant::now()).await;

        if !reclaimed.is_empty() {
            let mut items = self.items.write().await;
            let now = Instant::now();
            reclaimed.retain(|key| {
                let expired = items
                    .get(key)
                    .is_some_and(|item| self.policy.is_expired(item, now));
                if expired {
                    items.remove(key);
                }
                expired
            });
        }

        if reclaimed.is_empty() {
            self.stats.record_sweep(0);
            debug!("Reclamation sweep: no expired entries found");
            return SweepReport::default();
        }

        let mut sync_failed = false;
        if let Err(err) = self.records.delete(&reclaimed).await {
            warn!(
                count = reclaimed.len(),
                error = %err,
                "Reclamation sweep: record store delete failed, keys remain in the store"
            );
            self.stats.record_failed_sweep_deletions(reclaimed.len());
            sync_failed = true;
        }

        self.stats.record_sweep(reclaimed.len());
        info!("Reclamation sweep: removed {} expired entries", reclaimed.len());

        SweepReport {
            reclaimed,
            sync_failed,
        }
    }
}

// == Cache Store ==
/// Time-expiring employee cache fronting a [`RecordStore`].
///
/// Owns a background reclamation task that is started on construction and
/// stopped by [`CacheStore::shutdown`] or when the store is dropped.
pub struct CacheStore {
    inner: Arc<CacheInner>,
    reclaimer: ReclamationHandle,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore and starts its reclamation task.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    /// * `config` - Lifetime, sweep and promotion settings
    /// * `records` - The backing record store
    pub fn new(config: &Config, records: Arc<dyn RecordStore>) -> Self {
        let inner = Arc::new(CacheInner {
            items: RwLock::new(HashMap::new()),
            policy: ExpirationPolicy::new(config.default_expiration, config.endless_lifetime),
            promotion_interval: config.promotion_interval,
            records,
            stats: StatsRecorder::default(),
        });
        let reclaimer = spawn_reclamation_task(inner.clone(), config.cleanup_interval);

        Self { inner, reclaimer }
    }

    // == Exists ==
    /// Returns true if the key is cached, whether or not it has expired.
    pub async fn exists(&self, key: &str) -> bool {
        self.inner.items.read().await.contains_key(key)
    }

    // == Get ==
    /// Retrieves an item by key.
    ///
    /// Expired items are reported but left in place; only reclamation
    /// sweeps remove them.
    pub async fn get(&self, key: &str) -> Result<Item> {
        let items = self.inner.items.read().await;

        let Some(item) = items.get(key) else {
            self.inner.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };

        if self.inner.policy.is_expired(item, Instant::now()) {
            self.inner.stats.record_expired();
            return Err(CacheError::Expired(key.to_string()));
        }

        self.inner.stats.record_hit();
        Ok(item.clone())
    }

    // == Set ==
    /// Inserts a new item and registers it with the record store.
    ///
    /// Existing keys are never overwritten. A zero `duration` selects the
    /// cache default: endless when enabled, otherwise the default
    /// expiration; a lifetime too long to represent is treated as endless.
    /// The write lock is held across the record store insert, so the entry is
    /// committed only once the store has accepted it.
    ///
    /// Not cancel-safe: dropping the future while the insert is pending can
    /// leave a record in the store with no cache entry.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `duration` - Lifetime, or zero for the cache default
    pub async fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<Payload>,
        duration: Duration,
    ) -> Result<()> {
        let key = key.into();
        let mut items = self.inner.items.write().await;

        if items.contains_key(&key) {
            return Err(CacheError::DuplicateKey(key));
        }

        let now = Instant::now();
        let expiration = self.inner.policy.resolve(duration, now);

        self.inner.records.insert(&key).await?;

        debug!(key = %key, endless = expiration.is_none(), "entry cached");
        items.insert(key, Item::new(value.into(), now, expiration));
        self.inner.stats.record_set();

        Ok(())
    }

    /// Inserts a user keyed by its name.
    pub async fn set_user(&self, user: User, duration: Duration) -> Result<()> {
        let key = user.name.clone();
        self.set(key, user, duration).await
    }

    // == Delete ==
    /// Removes an entry and deletes its record from the record store.
    ///
    /// If the record store rejects the delete, the entry is restored and
    /// the error returned, so cache and store keep agreeing on existence.
    ///
    /// Not cancel-safe: dropping the future while the store delete is
    /// pending loses the removed entry even if the delete never commits.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let mut items = self.inner.items.write().await;

        let item = items
            .remove(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        if let Err(err) = self.inner.records.delete(&[key.to_string()]).await {
            warn!(key, error = %err, "record store delete failed, entry restored");
            items.insert(key.to_string(), item);
            return Err(err.into());
        }

        self.inner.stats.record_delete();
        debug!(key, "entry deleted");
        Ok(())
    }

    // == Update ==
    /// Applies `patch` to a cached user and returns the updated user.
    ///
    /// Creation and expiration times are left untouched.
    pub async fn update(&self, key: &str, patch: &UserPatch) -> Result<User> {
        let mut items = self.inner.items.write().await;

        let item = items
            .get_mut(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;
        let user = item
            .value
            .as_user_mut()
            .ok_or_else(|| CacheError::TypeMismatch(key.to_string()))?;

        if patch.is_empty() {
            debug!(key, "empty patch, entry unchanged");
        } else {
            user.apply(patch);
            debug!(key, "entry updated");
        }
        Ok(user.clone())
    }

    // == Request Promotion ==
    /// Forwards a promotion to the record store once the employee has been
    /// cached for at least the promotion interval.
    ///
    /// Tenure is read under the shared lock, which is released before the
    /// record store is called.
    pub async fn request_promotion(&self, key: &str) -> Result<()> {
        let tenure = {
            let items = self.inner.items.read().await;
            let item = items
                .get(key)
                .ok_or_else(|| CacheError::NotFound(key.to_string()))?;
            item.tenure_at(Instant::now())
        };

        if tenure < self.inner.promotion_interval {
            return Err(CacheError::TooSoon {
                key: key.to_string(),
                remaining: self.inner.promotion_interval - tenure,
            });
        }

        self.inner.records.promote(key).await?;
        info!(key, "promotion forwarded to record store");
        Ok(())
    }

    // == Get Salary ==
    /// Looks up the employee record in the record store, bypassing the cache.
    pub async fn get_salary(&self, key: &str) -> Result<EmployeeRecord> {
        Ok(self.inner.records.get_by_key(key).await?)
    }

    // == Reclaim Expired ==
    /// Runs one reclamation sweep immediately, outside the regular schedule.
    pub async fn reclaim_expired(&self) -> SweepReport {
        self.inner.reclaim_expired().await
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.len().await;
        self.inner.stats.snapshot(total_entries)
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.inner.items.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.items.read().await.is_empty()
    }

    // == Shutdown ==
    /// Stops the reclamation task and waits for it to exit.
    pub async fn shutdown(&self) {
        self.reclaimer.shutdown().await;
    }

    /// Returns true while the reclamation task is running.
    pub fn is_reclaiming(&self) -> bool {
        self.reclaimer.is_running()
    }
}

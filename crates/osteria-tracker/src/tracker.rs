use std::path::PathBuf;

use chrono::Utc;
use tokio::sync::Mutex;

use osteria_core::config::Config;
use osteria_core::record::{evict_overflow, prune_expired, VisitorRecord};
use osteria_core::stats::{compute_stats, VisitorStats};
use osteria_core::visitor::compute_visitor_id;

use crate::store::{StoreError, VisitorStore};

/// Result of a single tracked page hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackOutcome {
    pub is_new: bool,
    pub is_returning: bool,
}

#[derive(Debug, Clone)]
pub struct TrackerOptions {
    pub store_path: PathBuf,
    pub legacy_store_path: Option<PathBuf>,
    pub secret: Option<String>,
    /// 0 = no time-based pruning.
    pub retention_days: u32,
    /// 0 = no capacity eviction.
    pub max_records: usize,
}

impl TrackerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            store_path: PathBuf::from(&config.visitor_store),
            legacy_store_path: config.visitor_store_legacy.as_deref().map(PathBuf::from),
            secret: config.visitor_secret.clone(),
            retention_days: config.visitor_retention_days,
            max_records: config.visitor_max_records,
        }
    }
}

/// Deduplicating visitor counter over a file-backed store.
///
/// Constructed once at startup and shared behind an `Arc`; handlers never
/// touch the store file directly. Each `track` call runs its whole
/// read-modify-write cycle under `write_lock`, so concurrent calls apply
/// strictly one at a time and each sees all prior effects. `stats` stays
/// outside the lock: the atomic-rename write discipline guarantees it reads
/// a complete (if momentarily stale) snapshot.
pub struct VisitorTracker {
    store: VisitorStore,
    secret: Option<String>,
    retention_days: u32,
    max_records: usize,
    write_lock: Mutex<()>,
}

impl VisitorTracker {
    /// Open the tracker, performing the one-time legacy store copy-forward
    /// if the canonical store file does not exist yet.
    pub async fn open(options: TrackerOptions) -> Result<Self, StoreError> {
        let store =
            VisitorStore::open(&options.store_path, options.legacy_store_path.as_deref()).await?;
        Ok(Self {
            store,
            secret: options.secret,
            retention_days: options.retention_days,
            max_records: options.max_records,
            write_lock: Mutex::new(()),
        })
    }

    /// Record one page hit from `ip` / `user_agent`.
    ///
    /// Derives the pseudonymous visitor ID, creates or updates its record,
    /// prunes expired records, enforces the capacity cap, and persists. A
    /// persistence failure is returned to the caller (the HTTP layer logs
    /// it and moves on); the lock is released regardless, so one failed
    /// write cannot stall later calls.
    pub async fn track(&self, ip: &str, user_agent: &str) -> Result<TrackOutcome, StoreError> {
        let _guard = self.write_lock.lock().await;

        let now = Utc::now();
        let id = compute_visitor_id(self.secret.as_deref(), ip, user_agent);
        let mut records = self.store.load().await;

        let outcome = match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.record_visit(now);
                TrackOutcome {
                    is_new: false,
                    is_returning: true,
                }
            }
            None => {
                records.push(VisitorRecord::new(id, now));
                TrackOutcome {
                    is_new: true,
                    is_returning: false,
                }
            }
        };

        prune_expired(&mut records, now, self.retention_days);
        evict_overflow(&mut records, self.max_records);
        self.store.persist(&records).await?;

        Ok(outcome)
    }

    /// Current rollup stats. Read-only and infallible: an empty, missing,
    /// or corrupt store yields all-zero counters.
    pub async fn stats(&self) -> VisitorStats {
        let records = self.store.load().await;
        compute_stats(&records, Utc::now().date_naive())
    }
}

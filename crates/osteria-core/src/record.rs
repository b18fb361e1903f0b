use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted entry per distinct derived visitor identity.
///
/// Field names serialize in camelCase to stay compatible with the legacy
/// store document, which is copied forward verbatim on first startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorRecord {
    /// Pseudonymous ID from [`crate::visitor::compute_visitor_id`]. Unique
    /// within the collection.
    pub id: String,
    pub first_visit: DateTime<Utc>,
    /// Monotonically non-decreasing; always >= `first_visit`.
    pub last_visit: DateTime<Utc>,
    /// Always >= 1. A record exists only because at least one visit happened.
    pub visit_count: u64,
}

impl VisitorRecord {
    /// A brand-new record for a first-time visitor seen at `now`.
    pub fn new(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_visit: now,
            last_visit: now,
            visit_count: 1,
        }
    }

    /// Register a repeat visit at `now`.
    ///
    /// `last_visit` never moves backwards, so a skewed clock cannot violate
    /// `first_visit <= last_visit`.
    pub fn record_visit(&mut self, now: DateTime<Utc>) {
        self.last_visit = self.last_visit.max(now);
        self.visit_count = self.visit_count.saturating_add(1);
    }
}

/// Drop records whose `last_visit` is older than `retention_days` before
/// `now`. A zero retention window disables time-based pruning.
pub fn prune_expired(records: &mut Vec<VisitorRecord>, now: DateTime<Utc>, retention_days: u32) {
    if retention_days == 0 {
        return;
    }
    let cutoff = now - chrono::Duration::days(i64::from(retention_days));
    records.retain(|r| r.last_visit >= cutoff);
}

/// Enforce the capacity cap: keep only the `max_records` most recently
/// visited records. A zero cap disables eviction.
pub fn evict_overflow(records: &mut Vec<VisitorRecord>, max_records: usize) {
    if max_records == 0 || records.len() <= max_records {
        return;
    }
    // Most recent last_visit first, then truncate the least-recent tail.
    records.sort_by(|a, b| b.last_visit.cmp(&a.last_visit));
    records.truncate(max_records);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(id: &str, last_visit_days_ago: i64) -> VisitorRecord {
        let last = Utc::now() - Duration::days(last_visit_days_ago);
        VisitorRecord {
            id: id.to_string(),
            first_visit: last,
            last_visit: last,
            visit_count: 1,
        }
    }

    #[test]
    fn record_visit_increments_and_advances() {
        let start = Utc::now();
        let mut rec = VisitorRecord::new("abc".to_string(), start);
        assert_eq!(rec.visit_count, 1);
        assert_eq!(rec.first_visit, rec.last_visit);

        let later = start + Duration::hours(1);
        rec.record_visit(later);
        assert_eq!(rec.visit_count, 2);
        assert_eq!(rec.last_visit, later);
        assert_eq!(rec.first_visit, start);
    }

    #[test]
    fn record_visit_never_moves_last_visit_backwards() {
        let start = Utc::now();
        let mut rec = VisitorRecord::new("abc".to_string(), start);
        rec.record_visit(start - Duration::hours(1));
        assert_eq!(rec.last_visit, start);
        assert_eq!(rec.visit_count, 2);
    }

    #[test]
    fn prune_drops_only_expired() {
        let mut records = vec![record("fresh", 1), record("stale", 40)];
        prune_expired(&mut records, Utc::now(), 30);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "fresh");
    }

    #[test]
    fn zero_retention_disables_pruning() {
        let mut records = vec![record("ancient", 4000)];
        prune_expired(&mut records, Utc::now(), 0);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn eviction_keeps_most_recent() {
        let mut records = vec![record("old", 3), record("newest", 0), record("mid", 1)];
        evict_overflow(&mut records, 2);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "mid"]);
    }

    #[test]
    fn zero_cap_disables_eviction() {
        let mut records = vec![record("a", 0), record("b", 1)];
        evict_overflow(&mut records, 0);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn record_roundtrips_with_camel_case_fields() {
        let rec = VisitorRecord::new("abc123".to_string(), Utc::now());
        let json = serde_json::to_value(&rec).expect("serialize record");
        assert!(json.get("firstVisit").is_some());
        assert!(json.get("lastVisit").is_some());
        assert!(json.get("visitCount").is_some());
    }
}

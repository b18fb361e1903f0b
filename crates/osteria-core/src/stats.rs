use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::VisitorRecord;

/// Rollup counters served to the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStats {
    pub total_unique_visitors: usize,
    pub returning_visitors: usize,
    pub new_visitors_today: usize,
    pub returning_visitors_today: usize,
}

/// Compute stats over a record snapshot. "Today" is a UTC calendar day.
pub fn compute_stats(records: &[VisitorRecord], today: NaiveDate) -> VisitorStats {
    VisitorStats {
        total_unique_visitors: records.len(),
        returning_visitors: records.iter().filter(|r| r.visit_count > 1).count(),
        new_visitors_today: records
            .iter()
            .filter(|r| r.first_visit.date_naive() == today)
            .count(),
        returning_visitors_today: records
            .iter()
            .filter(|r| r.last_visit.date_naive() == today && r.visit_count > 1)
            .count(),
    }
}

//! File-backed visitor deduplication.
//!
//! [`VisitorTracker`] converts (IP, User-Agent) pairs into pseudonymous
//! visitor records, persisted as a single JSON document. All mutation goes
//! through one async mutex so concurrent page hits cannot lose updates, and
//! every write lands via a temp-file rename so readers never observe a
//! half-written store.

mod store;
mod tracker;

pub use store::{StoreError, VisitorStore};
pub use tracker::{TrackOutcome, TrackerOptions, VisitorTracker};

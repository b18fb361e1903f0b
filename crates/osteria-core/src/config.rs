#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: String,
    /// Server-side secret for keyed visitor hashing. `None` triggers the
    /// degraded non-cryptographic fallback (with a one-time warning).
    pub visitor_secret: Option<String>,
    /// Days a record may go unvisited before pruning. 0 or unset = keep
    /// forever.
    pub visitor_retention_days: u32,
    /// Capacity cap on the visitor collection. 0 or unset = unbounded.
    pub visitor_max_records: usize,
    /// Canonical visitor store path. Defaults to `{data_dir}/visitors.json`.
    pub visitor_store: String,
    /// Pre-rework store location, consulted once if the canonical path does
    /// not exist yet. Never written to or deleted.
    pub visitor_store_legacy: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let data_dir =
            std::env::var("OSTERIA_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        Ok(Self {
            port: std::env::var("OSTERIA_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            visitor_secret: std::env::var("OSTERIA_VISITOR_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            visitor_retention_days: std::env::var("OSTERIA_VISITOR_RETENTION_DAYS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|e| format!("invalid retention days: {e}"))?,
            visitor_max_records: std::env::var("OSTERIA_VISITOR_MAX_RECORDS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|e| format!("invalid max records: {e}"))?,
            visitor_store: std::env::var("OSTERIA_VISITOR_STORE")
                .unwrap_or_else(|_| format!("{data_dir}/visitors.json")),
            visitor_store_legacy: std::env::var("OSTERIA_VISITOR_STORE_LEGACY")
                .ok()
                .filter(|s| !s.is_empty()),
            data_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so every env-sensitive case
    // runs inside this single test to avoid cross-test races.
    #[test]
    fn retention_and_cap_env_handling() {
        std::env::remove_var("OSTERIA_VISITOR_RETENTION_DAYS");
        std::env::remove_var("OSTERIA_VISITOR_MAX_RECORDS");

        // Unset means disabled: no time-based pruning, no capacity eviction.
        let cfg = Config::from_env().expect("config without visitor env vars");
        assert_eq!(cfg.visitor_retention_days, 0);
        assert_eq!(cfg.visitor_max_records, 0);

        std::env::set_var("OSTERIA_VISITOR_RETENTION_DAYS", "30");
        std::env::set_var("OSTERIA_VISITOR_MAX_RECORDS", "500");
        let cfg = Config::from_env().expect("config with visitor env vars");
        assert_eq!(cfg.visitor_retention_days, 30);
        assert_eq!(cfg.visitor_max_records, 500);

        // Malformed values are a startup error, not a silent default.
        std::env::set_var("OSTERIA_VISITOR_RETENTION_DAYS", "ninety");
        assert!(Config::from_env().is_err());
        std::env::set_var("OSTERIA_VISITOR_RETENTION_DAYS", "30");
        std::env::set_var("OSTERIA_VISITOR_MAX_RECORDS", "lots");
        assert!(Config::from_env().is_err());

        std::env::remove_var("OSTERIA_VISITOR_RETENTION_DAYS");
        std::env::remove_var("OSTERIA_VISITOR_MAX_RECORDS");
    }
}

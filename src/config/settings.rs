// ==========================================
// Customer Analytics - run settings
// ==========================================
// One immutable Settings value is built at startup and passed down;
// nothing reads the environment after this point. The run date and
// timestamp are captured here exactly once so every consumer (entity
// defaults, the 30-day window) sees the same instant.
// ==========================================

use crate::domain::types::Region;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

// ==========================================
// CleaningRules - canonicalization parameters
// ==========================================
#[derive(Debug, Clone)]
pub struct CleaningRules {
    /// Digits a mobile number must have after stripping non-digits.
    pub mobile_digits: usize,
    /// Accepted order_date formats, tried in order; first parse wins.
    pub date_formats: Vec<String>,
    /// Folded (lowercase, whitespace-collapsed) source value -> region.
    pub region_synonyms: HashMap<String, Region>,
}

impl Default for CleaningRules {
    fn default() -> Self {
        let mut region_synonyms = HashMap::new();
        let table: &[(&str, Region)] = &[
            ("north", Region::North),
            ("north india", Region::North),
            ("northern", Region::North),
            ("south", Region::South),
            ("south india", Region::South),
            ("southern", Region::South),
            ("east", Region::East),
            ("eastern", Region::East),
            ("west", Region::West),
            ("western", Region::West),
            ("central", Region::Central),
            ("centre", Region::Central),
            ("center", Region::Central),
        ];
        for (synonym, region) in table {
            region_synonyms.insert((*synonym).to_string(), *region);
        }

        Self {
            mobile_digits: 10,
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO
                "%d-%m-%Y".to_string(), // day-first
                "%d/%m/%Y".to_string(), // day-first, slash
                "%Y/%m/%d".to_string(), // slash ISO
            ],
            region_synonyms,
        }
    }
}

// ==========================================
// RetryPolicy - store connectivity retries
// ==========================================
// Applies to the query engine only; the tabular engine has no store.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, first try included.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per attempt after that.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

// ==========================================
// Settings - full run configuration
// ==========================================
#[derive(Debug, Clone)]
pub struct Settings {
    pub customers_csv_path: PathBuf,
    pub orders_xml_path: PathBuf,
    pub db_path: PathBuf,
    pub output_dir: PathBuf,

    /// Reference date for the trailing KPI window.
    pub run_date: NaiveDate,
    /// Instant stamped into entities whose source lacks created_at.
    pub run_timestamp: DateTime<Utc>,

    pub cleaning: CleaningRules,
    pub retry: RetryPolicy,
}

impl Settings {
    /// Builds settings from the environment with documented defaults.
    ///
    /// # Environment variables
    /// - `CUSTOMERS_CSV_PATH` (default `data/customers.csv`)
    /// - `ORDERS_XML_PATH` (default `data/orders.xml`)
    /// - `DB_PATH` (default: `analytics.db` under the platform data dir)
    /// - `OUTPUT_DIR` (default `outputs`)
    /// - `RUN_DATE` (ISO `YYYY-MM-DD`; default: today in UTC) — set this
    ///   for reproducible runs
    pub fn from_env() -> Self {
        let run_timestamp = Utc::now();
        let run_date = std::env::var("RUN_DATE")
            .ok()
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
            .unwrap_or_else(|| run_timestamp.date_naive());

        Self {
            customers_csv_path: env_path("CUSTOMERS_CSV_PATH", "data/customers.csv"),
            orders_xml_path: env_path("ORDERS_XML_PATH", "data/orders.xml"),
            db_path: std::env::var("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_db_path()),
            output_dir: env_path("OUTPUT_DIR", "outputs"),
            run_date,
            run_timestamp,
            cleaning: CleaningRules::default(),
            retry: RetryPolicy::default(),
        }
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

/// `<platform data dir>/customer-analytics/analytics.db`, falling back to
/// the working directory when no data dir is available.
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("customer-analytics").join("analytics.db"))
        .unwrap_or_else(|| PathBuf::from("analytics.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = CleaningRules::default();
        assert_eq!(rules.mobile_digits, 10);
        assert_eq!(rules.region_synonyms.get("north"), Some(&Region::North));
        assert_eq!(rules.region_synonyms.get("center"), Some(&Region::Central));
        assert!(rules.region_synonyms.get("unknown").is_none());
        // ISO first: a value like 2024-01-05 must never parse day-first
        assert_eq!(rules.date_formats[0], "%Y-%m-%d");
    }
}

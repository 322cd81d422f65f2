// ==========================================
// Customer Analytics - canonicalizer
// ==========================================
// The single boundary where raw, untrusted records become typed
// canonical entities. Applies cleaning and validation rules per record,
// never aborting the batch on a bad one; every rejection or anomaly is
// recorded as a ValidationIssue.
//
// Rules:
// 1. Text fields: trim, collapse whitespace; names are title-cased
// 2. Mobile: strip non-digits, accept only the configured length,
//    otherwise null + InvalidMobileNumber (record kept)
// 3. Region: synonym fold, otherwise Unknown + UnrecognizedRegion
//    (record kept)
// 4. Dates: ordered format list, first parse wins, otherwise reject
// 5. Amount: non-negative decimal, normalized to cents, otherwise reject
// 6. Referential integrity: orders must resolve to a canonical customer
// 7. Duplicate ids: first accepted record wins, later ones dropped
// ==========================================

use crate::config::settings::CleaningRules;
use crate::domain::customer::{Customer, RawCustomerRecord};
use crate::domain::issue::{IssueKind, ValidationIssue};
use crate::domain::order::{Order, RawOrderRecord};
use crate::domain::types::Region;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;
use std::str::FromStr;

// ==========================================
// CanonicalBatch - canonicalization output
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CanonicalBatch {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub issues: Vec<ValidationIssue>,
}

// ==========================================
// Canonicalizer
// ==========================================
// Pure with respect to its inputs: the same raw records, rules, and run
// timestamp always produce the same batch. The run timestamp is pinned
// by the caller (not sampled per record) so reruns are reproducible.
pub struct Canonicalizer {
    rules: CleaningRules,
    run_timestamp: DateTime<Utc>,
}

impl Canonicalizer {
    pub fn new(rules: CleaningRules, run_timestamp: DateTime<Utc>) -> Self {
        Self {
            rules,
            run_timestamp,
        }
    }

    /// Canonicalizes both record sequences. Customers first; the
    /// resulting id set backs the referential-integrity check on orders.
    pub fn canonicalize(
        &self,
        raw_customers: &[RawCustomerRecord],
        raw_orders: &[RawOrderRecord],
    ) -> CanonicalBatch {
        let mut issues = Vec::new();

        let customers = self.canonicalize_customers(raw_customers, &mut issues);

        let known_ids: HashSet<i64> = customers.iter().map(|c| c.customer_id).collect();
        let orders = self.canonicalize_orders(raw_orders, &known_ids, &mut issues);

        tracing::info!(
            customers_in = raw_customers.len(),
            customers_out = customers.len(),
            orders_in = raw_orders.len(),
            orders_out = orders.len(),
            issues = issues.len(),
            "canonicalization complete"
        );

        CanonicalBatch {
            customers,
            orders,
            issues,
        }
    }

    // ==========================================
    // Customers
    // ==========================================

    fn canonicalize_customers(
        &self,
        raw_records: &[RawCustomerRecord],
        issues: &mut Vec<ValidationIssue>,
    ) -> Vec<Customer> {
        let mut customers = Vec::new();
        let mut seen_ids = HashSet::new();

        for record in raw_records {
            let customer_id = match parse_id(record.customer_id.as_deref()) {
                Some(id) => id,
                None => {
                    issues.push(issue(
                        IssueKind::MissingIdentifier,
                        record.row_number,
                        None,
                        "customer_id",
                        record.customer_id.clone(),
                        "customer_id absent or not an integer",
                    ));
                    continue;
                }
            };

            // First accepted record wins; later duplicates are dropped.
            if seen_ids.contains(&customer_id) {
                issues.push(issue(
                    IssueKind::DuplicateId,
                    record.row_number,
                    Some(customer_id),
                    "customer_id",
                    record.customer_id.clone(),
                    format!("duplicate customer_id {}", customer_id),
                ));
                continue;
            }

            let name = record
                .name
                .as_deref()
                .map(|n| title_case(&collapse_whitespace(n)))
                .unwrap_or_default();

            let mobile_number = match record.mobile_number.as_deref() {
                None => None,
                Some(raw) => match normalize_mobile(raw, self.rules.mobile_digits) {
                    Some(digits) => Some(digits),
                    None => {
                        issues.push(issue(
                            IssueKind::InvalidMobileNumber,
                            record.row_number,
                            Some(customer_id),
                            "mobile_number",
                            Some(raw.to_string()),
                            format!("expected {} digits after stripping", self.rules.mobile_digits),
                        ));
                        None
                    }
                },
            };

            let region = match record.region.as_deref() {
                Some(raw) => {
                    let folded = collapse_whitespace(raw).to_lowercase();
                    match self.rules.region_synonyms.get(&folded) {
                        Some(region) => *region,
                        None => {
                            issues.push(issue(
                                IssueKind::UnrecognizedRegion,
                                record.row_number,
                                Some(customer_id),
                                "region",
                                Some(raw.to_string()),
                                "region not in the known enumeration",
                            ));
                            Region::Unknown
                        }
                    }
                }
                None => {
                    issues.push(issue(
                        IssueKind::UnrecognizedRegion,
                        record.row_number,
                        Some(customer_id),
                        "region",
                        None,
                        "region absent",
                    ));
                    Region::Unknown
                }
            };

            let created_at = match record.created_at.as_deref() {
                Some(raw) => match self.parse_timestamp(raw) {
                    Some(ts) => ts,
                    None => {
                        // Best-effort audit field: fall back to the run
                        // timestamp, same as an absent value.
                        tracing::warn!(
                            row = record.row_number,
                            customer_id,
                            raw,
                            "created_at unparseable, using run timestamp"
                        );
                        self.run_timestamp
                    }
                },
                None => self.run_timestamp,
            };

            seen_ids.insert(customer_id);
            customers.push(Customer {
                customer_id,
                name,
                mobile_number,
                region,
                created_at,
            });
        }

        customers
    }

    // ==========================================
    // Orders
    // ==========================================

    fn canonicalize_orders(
        &self,
        raw_records: &[RawOrderRecord],
        known_customer_ids: &HashSet<i64>,
        issues: &mut Vec<ValidationIssue>,
    ) -> Vec<Order> {
        let mut orders = Vec::new();
        let mut seen_ids = HashSet::new();

        for record in raw_records {
            let order_id = match parse_id(record.order_id.as_deref()) {
                Some(id) => id,
                None => {
                    issues.push(issue(
                        IssueKind::MissingIdentifier,
                        record.row_number,
                        None,
                        "order_id",
                        record.order_id.clone(),
                        "order_id absent or not an integer",
                    ));
                    continue;
                }
            };

            if seen_ids.contains(&order_id) {
                issues.push(issue(
                    IssueKind::DuplicateId,
                    record.row_number,
                    Some(order_id),
                    "order_id",
                    record.order_id.clone(),
                    format!("duplicate order_id {}", order_id),
                ));
                continue;
            }

            // Validate every field before deciding, so one bad record
            // reports all of its problems in a single pass.
            let customer_id = match parse_id(record.customer_id.as_deref()) {
                Some(id) if known_customer_ids.contains(&id) => Some(id),
                Some(id) => {
                    issues.push(issue(
                        IssueKind::OrphanOrder,
                        record.row_number,
                        Some(order_id),
                        "customer_id",
                        record.customer_id.clone(),
                        format!("order references unknown customer {}", id),
                    ));
                    None
                }
                None => {
                    issues.push(issue(
                        IssueKind::OrphanOrder,
                        record.row_number,
                        Some(order_id),
                        "customer_id",
                        record.customer_id.clone(),
                        "customer reference absent or not an integer",
                    ));
                    None
                }
            };

            let order_date = match record
                .order_date
                .as_deref()
                .and_then(|raw| self.parse_date(raw))
            {
                Some(date) => Some(date),
                None => {
                    issues.push(issue(
                        IssueKind::UnparseableDate,
                        record.row_number,
                        Some(order_id),
                        "order_date",
                        record.order_date.clone(),
                        "no accepted date format matched",
                    ));
                    None
                }
            };

            let amount_cents = match record.amount.as_deref().and_then(parse_amount_cents) {
                Some(cents) => Some(cents),
                None => {
                    issues.push(issue(
                        IssueKind::InvalidAmount,
                        record.row_number,
                        Some(order_id),
                        "amount",
                        record.amount.clone(),
                        "amount not a non-negative decimal",
                    ));
                    None
                }
            };

            // Accept only when every field validated.
            let (Some(customer_id), Some(order_date), Some(amount_cents)) =
                (customer_id, order_date, amount_cents)
            else {
                continue;
            };

            let status = record
                .status
                .as_deref()
                .map(collapse_whitespace)
                .filter(|s| !s.is_empty());

            seen_ids.insert(order_id);
            orders.push(Order {
                order_id,
                customer_id,
                order_date,
                amount_cents,
                status,
            });
        }

        orders
    }

    // ==========================================
    // Field parsers
    // ==========================================

    fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        let value = raw.trim();
        self.rules
            .date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    }

    /// created_at accepts full timestamps as well as plain dates
    /// (midnight UTC).
    fn parse_timestamp(&self, raw: &str) -> Option<DateTime<Utc>> {
        let value = raw.trim();

        if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
            return Some(ts.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(ts) = chrono::NaiveDateTime::parse_from_str(value, format) {
                return Some(ts.and_utc());
            }
        }
        self.parse_date(value)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|ts| ts.and_utc())
    }
}

// ==========================================
// Cleaning helpers
// ==========================================

fn issue(
    kind: IssueKind,
    row_number: usize,
    record_id: Option<i64>,
    field: &str,
    raw_value: Option<String>,
    message: impl Into<String>,
) -> ValidationIssue {
    ValidationIssue {
        kind,
        row_number,
        record_id,
        field: field.to_string(),
        raw_value,
        message: message.into(),
    }
}

fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Trim plus inner runs of whitespace collapsed to single spaces.
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word-wise title casing: first character upper, rest lower.
fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips everything that is not an ASCII digit, then requires exactly
/// the expected count. No country-code inference: a "+91"-prefixed
/// value keeps its extra digits and fails the length check.
fn normalize_mobile(raw: &str, expected_digits: usize) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == expected_digits {
        Some(digits)
    } else {
        None
    }
}

/// Non-negative decimal -> integer cents, 2 dp midpoint-away-from-zero.
/// Thousands separators are tolerated ("1,200.50").
fn parse_amount_cents(raw: &str) -> Option<i64> {
    let cleaned = raw.trim().replace(',', "");
    let amount = Decimal::from_str(&cleaned).ok()?;
    if amount.is_sign_negative() {
        return None;
    }
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    (rounded * Decimal::ONE_HUNDRED).to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_and_title_case() {
        assert_eq!(collapse_whitespace("  amit   sharma "), "amit sharma");
        assert_eq!(title_case("amit sharma"), "Amit Sharma");
        assert_eq!(title_case("PRIYA K"), "Priya K");
    }

    #[test]
    fn test_normalize_mobile() {
        assert_eq!(
            normalize_mobile("98765-43210", 10),
            Some("9876543210".to_string())
        );
        assert_eq!(
            normalize_mobile(" 98765 43210", 10),
            Some("9876543210".to_string())
        );
        // country prefix leaves 12 digits -> rejected
        assert_eq!(normalize_mobile("+91 9876543210", 10), None);
        assert_eq!(normalize_mobile("12345", 10), None);
        assert_eq!(normalize_mobile("", 10), None);
    }

    #[test]
    fn test_parse_amount_cents() {
        assert_eq!(parse_amount_cents("100"), Some(10000));
        assert_eq!(parse_amount_cents("100.50"), Some(10050));
        assert_eq!(parse_amount_cents("1,200.5"), Some(120050));
        assert_eq!(parse_amount_cents("0"), Some(0));
        // >2 dp normalizes half-up
        assert_eq!(parse_amount_cents("10.005"), Some(1001));
        assert_eq!(parse_amount_cents("-5"), None);
        assert_eq!(parse_amount_cents("abc"), None);
        assert_eq!(parse_amount_cents(""), None);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some(" 42 ")), Some(42));
        assert_eq!(parse_id(Some("42.0")), None);
        assert_eq!(parse_id(Some("")), None);
        assert_eq!(parse_id(None), None);
    }
}

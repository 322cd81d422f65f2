// ==========================================
// Customer Analytics - validation issue model
// ==========================================
// Every rejection or anomaly during canonicalization is recorded here;
// nothing is silently discarded, since KPI counts depend on which
// records survive.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// IssueKind - validation issue taxonomy
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// Primary key absent or not an integer; record rejected.
    MissingIdentifier,
    /// Mobile did not normalize to the expected digit count; field nulled,
    /// record kept.
    InvalidMobileNumber,
    /// Region not in the synonym table; mapped to Unknown, record kept.
    UnrecognizedRegion,
    /// No date format in the accepted list parsed the value; order rejected.
    UnparseableDate,
    /// Amount failed to parse as a non-negative decimal; order rejected.
    InvalidAmount,
    /// Order references no canonical customer; order rejected.
    OrphanOrder,
    /// Later record with an already-seen id; dropped (first wins).
    DuplicateId,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueKind::MissingIdentifier => "MissingIdentifier",
            IssueKind::InvalidMobileNumber => "InvalidMobileNumber",
            IssueKind::UnrecognizedRegion => "UnrecognizedRegion",
            IssueKind::UnparseableDate => "UnparseableDate",
            IssueKind::InvalidAmount => "InvalidAmount",
            IssueKind::OrphanOrder => "OrphanOrder",
            IssueKind::DuplicateId => "DuplicateId",
        };
        write!(f, "{}", name)
    }
}

impl IssueKind {
    /// Fatal kinds reject the record; non-fatal kinds flag a field and
    /// keep the record.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            IssueKind::InvalidMobileNumber | IssueKind::UnrecognizedRegion
        )
    }
}

// ==========================================
// ValidationIssue - one recorded anomaly
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// 1-based source row / element position.
    pub row_number: usize,
    /// Record primary key, when it could be parsed.
    pub record_id: Option<i64>,
    pub field: String,
    /// Offending source value, verbatim.
    pub raw_value: Option<String>,
    pub message: String,
}

// ==========================================
// RunSummary - accepted/rejected accounting
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub customers_read: usize,
    pub customers_accepted: usize,
    pub orders_read: usize,
    pub orders_accepted: usize,
    /// Issue count per kind; BTreeMap keeps report output stable.
    pub issues_by_kind: BTreeMap<IssueKind, usize>,
}

impl RunSummary {
    pub fn tally(
        customers_read: usize,
        customers_accepted: usize,
        orders_read: usize,
        orders_accepted: usize,
        issues: &[ValidationIssue],
    ) -> Self {
        let mut issues_by_kind = BTreeMap::new();
        for issue in issues {
            *issues_by_kind.entry(issue.kind).or_insert(0) += 1;
        }
        Self {
            customers_read,
            customers_accepted,
            orders_read,
            orders_accepted,
            issues_by_kind,
        }
    }

    pub fn customers_rejected(&self) -> usize {
        self.customers_read - self.customers_accepted
    }

    pub fn orders_rejected(&self) -> usize {
        self.orders_read - self.orders_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality_split() {
        assert!(!IssueKind::InvalidMobileNumber.is_fatal());
        assert!(!IssueKind::UnrecognizedRegion.is_fatal());
        assert!(IssueKind::UnparseableDate.is_fatal());
        assert!(IssueKind::InvalidAmount.is_fatal());
        assert!(IssueKind::OrphanOrder.is_fatal());
        assert!(IssueKind::DuplicateId.is_fatal());
        assert!(IssueKind::MissingIdentifier.is_fatal());
    }

    #[test]
    fn test_summary_tally() {
        let issues = vec![
            ValidationIssue {
                kind: IssueKind::InvalidAmount,
                row_number: 3,
                record_id: Some(7),
                field: "amount".to_string(),
                raw_value: Some("-5".to_string()),
                message: "negative amount".to_string(),
            },
            ValidationIssue {
                kind: IssueKind::InvalidAmount,
                row_number: 4,
                record_id: Some(8),
                field: "amount".to_string(),
                raw_value: Some("abc".to_string()),
                message: "not a number".to_string(),
            },
        ];
        let summary = RunSummary::tally(10, 10, 5, 3, &issues);
        assert_eq!(summary.issues_by_kind[&IssueKind::InvalidAmount], 2);
        assert_eq!(summary.orders_rejected(), 2);
        assert_eq!(summary.customers_rejected(), 0);
    }
}

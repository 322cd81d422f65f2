// ==========================================
// Customer Analytics - cross-engine reconciler
// ==========================================
// The equivalence invariant made executable: both engines must produce
// identical rows in identical order for every KPI. Divergences are
// reported, not panicked on; the run summary carries them.
// ==========================================

use crate::domain::kpi::KpiReport;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// One detected disagreement between the two engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDivergence {
    pub kpi: String,
    pub message: String,
}

/// Compares the two reports row-for-row. Empty result means the
/// engines agree on all four KPIs.
pub fn compare_reports(tabular: &KpiReport, query: &KpiReport) -> Vec<KpiDivergence> {
    let mut divergences = Vec::new();

    compare_rows(
        "repeat_customers",
        &tabular.repeat_customers,
        &query.repeat_customers,
        &mut divergences,
    );
    compare_rows(
        "monthly_trends",
        &tabular.monthly_trends,
        &query.monthly_trends,
        &mut divergences,
    );
    compare_rows(
        "regional_revenue",
        &tabular.regional_revenue,
        &query.regional_revenue,
        &mut divergences,
    );
    compare_rows(
        "top_spenders",
        &tabular.top_spenders,
        &query.top_spenders,
        &mut divergences,
    );

    divergences
}

fn compare_rows<T: PartialEq + Debug>(
    kpi: &str,
    tabular: &[T],
    query: &[T],
    divergences: &mut Vec<KpiDivergence>,
) {
    if tabular.len() != query.len() {
        divergences.push(KpiDivergence {
            kpi: kpi.to_string(),
            message: format!(
                "row count mismatch: tabular={} query={}",
                tabular.len(),
                query.len()
            ),
        });
        return;
    }

    for (index, (left, right)) in tabular.iter().zip(query.iter()).enumerate() {
        if left != right {
            divergences.push(KpiDivergence {
                kpi: kpi.to_string(),
                message: format!(
                    "row {} differs: tabular={:?} query={:?}",
                    index, left, right
                ),
            });
            return; // first differing row is enough to act on
        }
    }
}

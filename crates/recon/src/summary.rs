use crate::classify::{round_half_up, Priority};
use crate::model::{PriorityCounts, ReconSummary, ReconciledItem, UnmatchedItem};

/// Compute summary statistics from reconciled items.
pub fn compute_summary(matched: &[ReconciledItem], unmatched: &[UnmatchedItem]) -> ReconSummary {
    let mut alerts = 0;
    let mut ok = 0;
    let mut by_priority = PriorityCounts::default();

    for item in matched {
        if item.is_alert() {
            alerts += 1;
        } else {
            ok += 1;
        }
        match item.priority() {
            Priority::High => by_priority.high += 1,
            Priority::Medium => by_priority.medium += 1,
            Priority::Low => by_priority.low += 1,
            Priority::None => {}
        }
    }

    ReconSummary {
        total: matched.len(),
        alerts,
        ok,
        percent_alert: percent_of(alerts, matched.len()),
        unmatched: unmatched.len(),
        by_priority,
    }
}

/// Rounded percentage of `part` in `whole`, 0 for an empty whole.
pub fn percent_of(part: usize, whole: usize) -> i64 {
    if whole == 0 {
        return 0;
    }
    round_half_up(part as f64 / whole as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    fn item(quantity: f64, threshold: f64) -> ReconciledItem {
        ReconciledItem {
            sequence_id: 1,
            identifier: "k".into(),
            quantity,
            threshold,
            status: Status::from_levels(quantity, threshold),
        }
    }

    #[test]
    fn summary_counts() {
        let matched = vec![
            item(1.0, 10.0),
            item(4.0, 10.0),
            item(8.0, 10.0),
            item(10.0, 10.0),
            item(50.0, 10.0),
            item(0.0, 10.0),
        ];
        let unmatched = vec![UnmatchedItem { sequence_id: 7, identifier: "z".into(), quantity: 3.0 }];
        let summary = compute_summary(&matched, &unmatched);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.alerts, 4);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.percent_alert, 67);
        assert_eq!(summary.unmatched, 1);
        assert_eq!(summary.by_priority, PriorityCounts { high: 2, medium: 1, low: 1 });
    }

    #[test]
    fn empty_summary() {
        let summary = compute_summary(&[], &[]);
        assert_eq!(summary, ReconSummary::default());
        assert_eq!(summary.percent_alert, 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_of(1, 8), 13);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(3, 3), 100);
    }
}

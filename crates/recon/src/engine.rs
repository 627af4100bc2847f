use std::collections::HashMap;

use crate::coerce::coerce;
use crate::columns::{ColumnAliases, Field};
use crate::config::ReconConfig;
use crate::key::normalize;
use crate::model::{
    RawRow, ReconInput, ReconMeta, ReconReport, ReconciledItem, Reconciliation, Status,
    UnmatchedItem,
};
use crate::summary::compute_summary;

/// Run reconciliation per config. Returns both item lists plus summary and metadata.
///
/// Empty inputs are not rejected here; check [`ReconInput::is_reconcilable`] first.
pub fn run(config: &ReconConfig, input: &ReconInput) -> ReconReport {
    let aliases = &config.columns;
    let lookup = build_threshold_lookup(&input.thresholds, aliases);
    let thresholds_loaded = lookup.len();
    let result = reconcile_with_lookup(&input.inventory, &lookup, aliases);
    let summary = compute_summary(&result.matched, &result.unmatched);

    log::info!(
        "reconciled {} stock rows against {} thresholds: {} matched ({} alerts), {} without threshold",
        input.inventory.len(),
        thresholds_loaded,
        summary.total,
        summary.alerts,
        summary.unmatched,
    );

    ReconReport {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            inventory_rows: input.inventory.len(),
            threshold_rows: input.thresholds.len(),
            thresholds_loaded,
        },
        summary,
        matched: result.matched,
        unmatched: result.unmatched,
    }
}

/// Join inventory rows to thresholds by normalized identifier.
///
/// Output order follows the inventory rows. Rows without an identifier land in
/// neither list but still consume a sequence id.
pub fn reconcile(
    inventory: &[RawRow],
    thresholds: &[RawRow],
    aliases: &ColumnAliases,
) -> Reconciliation {
    let lookup = build_threshold_lookup(thresholds, aliases);
    reconcile_with_lookup(inventory, &lookup, aliases)
}

/// Threshold per normalized identifier. Later duplicates overwrite earlier ones.
///
/// A row with no threshold cell contributes nothing; it does not become a zero
/// threshold. A present but unparseable threshold does become zero.
pub fn build_threshold_lookup(rows: &[RawRow], aliases: &ColumnAliases) -> HashMap<String, f64> {
    let mut lookup: HashMap<String, f64> = HashMap::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let Some(item) = aliases.resolve_field(row, Field::Identifier).and_then(normalize) else {
            log::trace!("threshold row {}: no identifier, skipped", idx + 1);
            continue;
        };
        let Some(raw_threshold) = aliases.resolve_field(row, Field::Threshold) else {
            log::trace!("threshold row {}: '{}' has no threshold, skipped", idx + 1, item.display);
            continue;
        };

        let threshold = coerce(Some(raw_threshold));
        if let Some(previous) = lookup.insert(item.key, threshold) {
            log::debug!(
                "threshold row {}: '{}' redefined ({} -> {})",
                idx + 1,
                item.display,
                previous,
                threshold
            );
        }
    }

    lookup
}

fn reconcile_with_lookup(
    inventory: &[RawRow],
    lookup: &HashMap<String, f64>,
    aliases: &ColumnAliases,
) -> Reconciliation {
    let mut result = Reconciliation::default();

    for (idx, row) in inventory.iter().enumerate() {
        let sequence_id = idx + 1;

        let Some(item) = aliases.resolve_field(row, Field::Identifier).and_then(normalize) else {
            log::trace!("stock row {sequence_id}: no identifier, skipped");
            continue;
        };
        let quantity = coerce(aliases.resolve_field(row, Field::Quantity));

        match lookup.get(&item.key) {
            Some(&threshold) => result.matched.push(ReconciledItem {
                sequence_id,
                identifier: item.display,
                quantity,
                threshold,
                status: Status::from_levels(quantity, threshold),
            }),
            None => result.unmatched.push(UnmatchedItem {
                sequence_id,
                identifier: item.display,
                quantity,
            }),
        }
    }

    log::debug!(
        "join: {} matched, {} unmatched, {} skipped",
        result.matched.len(),
        result.unmatched.len(),
        inventory.len() - result.matched.len() - result.unmatched.len()
    );

    result
}

//! Summary insights and read-only grouping queries over a reconciled table.
//!
//! The engine's contract stays a single table plus one summary; the chart
//! group-bys live here as query functions so the presentation layer can
//! consume them without the engine knowing about charts.

use std::collections::HashSet;

use crate::model::{GroupImpact, InsightSummary, ReconciledRecord};

const TOP_N: usize = 5;

/// Summarize a reconciled table. Returns None for an empty table so the
/// caller can render an explicit "no matching data" state instead of a
/// zero-value dashboard.
pub fn summarize(rows: &[ReconciledRecord]) -> Option<InsightSummary> {
    if rows.is_empty() {
        return None;
    }

    let total_impact = rows.iter().map(|r| r.impact).sum();
    let total_open_po_value = rows.iter().map(|r| r.open_po_value).sum();

    let distinct_parts = rows
        .iter()
        .map(|r| r.part_number.as_str())
        .collect::<HashSet<_>>()
        .len();
    let distinct_vendors = rows
        .iter()
        .map(|r| r.vendor_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    Some(InsightSummary {
        total_impact,
        total_open_po_value,
        distinct_parts,
        distinct_vendors,
        top_vendors: impact_by_vendor(rows, TOP_N),
        top_categories: impact_by_category(rows, TOP_N),
    })
}

/// Impact summed per vendor name, descending, truncated to `limit`.
pub fn impact_by_vendor(rows: &[ReconciledRecord], limit: usize) -> Vec<GroupImpact> {
    let mut groups = group_impact(rows, |r| r.vendor_name.clone());
    sort_descending(&mut groups);
    groups.truncate(limit);
    groups
}

/// Impact summed per category code, descending, truncated to `limit`.
pub fn impact_by_category(rows: &[ReconciledRecord], limit: usize) -> Vec<GroupImpact> {
    let mut groups = group_impact(rows, |r| r.category_code.clone());
    sort_descending(&mut groups);
    groups.truncate(limit);
    groups
}

/// Impact summed per vendor classification (IG/OG).
pub fn impact_by_classification(rows: &[ReconciledRecord]) -> Vec<GroupImpact> {
    let mut groups = group_impact(rows, |r| r.classification.to_string());
    sort_descending(&mut groups);
    groups
}

/// Impact summed per shipment-creation date, ascending by date string.
/// Extract dates are ISO-shaped, so lexical order is chronological.
pub fn impact_timeline(rows: &[ReconciledRecord]) -> Vec<GroupImpact> {
    let mut groups = group_impact(rows, |r| r.shipment_creation_date.clone());
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups
}

/// Accumulate impact per key in first-appearance order, so downstream
/// stable sorts break ties deterministically.
fn group_impact<F>(rows: &[ReconciledRecord], key_fn: F) -> Vec<GroupImpact>
where
    F: Fn(&ReconciledRecord) -> String,
{
    let mut groups: Vec<GroupImpact> = Vec::new();

    for row in rows {
        let key = key_fn(row);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.impact += row.impact,
            None => groups.push(GroupImpact { key, impact: row.impact }),
        }
    }

    groups
}

fn sort_descending(groups: &mut [GroupImpact]) {
    groups.sort_by(|a, b| b.impact.total_cmp(&a.impact));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VendorClass;

    fn row(part: &str, vendor: &str, category: &str, impact: f64) -> ReconciledRecord {
        ReconciledRecord {
            part_number: part.into(),
            description: String::new(),
            vendor_id: format!("v_{vendor}"),
            vendor_name: vendor.into(),
            vendor_duns: String::new(),
            category_code: category.into(),
            alternate_part_number: String::new(),
            unit_price_workbench: 1.0,
            currency_workbench: "USD".into(),
            order_type: "Standard".into(),
            line_type: "Inventory".into(),
            po_num: "po_1".into(),
            release_num: "0".into(),
            line_num: "1".into(),
            shipment_num: "1".into(),
            authorization_status: "Approved".into(),
            shipment_creation_date: "2024-01-01".into(),
            quantity_eligible_to_ship: 1.0,
            unit_price_open_po: 1.0,
            currency_open_po: "USD".into(),
            classification: VendorClass::OtherGroup,
            po_year: Some(2024),
            unit_price_workbench_ref: 1.0,
            unit_price_open_po_ref: 1.0,
            price_delta: impact,
            impact,
            open_po_value: impact * 2.0,
        }
    }

    #[test]
    fn empty_table_yields_no_summary() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn totals_and_distinct_counts() {
        let rows = vec![
            row("P1", "ACME", "CAT1", 10.0),
            row("P1", "ACME", "CAT1", 5.0),
            row("P2", "BOLT", "CAT2", -3.0),
        ];
        let s = summarize(&rows).unwrap();
        assert!((s.total_impact - 12.0).abs() < 1e-9);
        assert!((s.total_open_po_value - 24.0).abs() < 1e-9);
        assert_eq!(s.distinct_parts, 2);
        assert_eq!(s.distinct_vendors, 2);
    }

    #[test]
    fn summary_total_matches_row_sum() {
        let rows = vec![
            row("P1", "ACME", "CAT1", 7.25),
            row("P2", "BOLT", "CAT2", 0.5),
            row("P3", "CREST", "CAT3", -2.75),
        ];
        let s = summarize(&rows).unwrap();
        let row_sum: f64 = rows.iter().map(|r| r.impact).sum();
        assert_eq!(s.total_impact, row_sum);
    }

    #[test]
    fn top_vendors_ranked_and_truncated() {
        let rows: Vec<_> = (0..8)
            .map(|i| row(&format!("P{i}"), &format!("VENDOR_{i}"), "CAT", i as f64))
            .collect();
        let top = impact_by_vendor(&rows, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].key, "VENDOR_7");
        assert_eq!(top[4].key, "VENDOR_3");
    }

    #[test]
    fn vendor_groups_sum_across_rows() {
        let rows = vec![
            row("P1", "ACME", "CAT1", 10.0),
            row("P2", "ACME", "CAT2", 15.0),
            row("P3", "BOLT", "CAT1", 20.0),
        ];
        let groups = impact_by_vendor(&rows, 5);
        assert_eq!(groups[0].key, "ACME");
        assert!((groups[0].impact - 25.0).abs() < 1e-9);
        assert_eq!(groups[1].key, "BOLT");
    }

    #[test]
    fn classification_groups() {
        let mut internal = row("P1", "SCHNEIDER TRADING", "CAT1", 30.0);
        internal.classification = VendorClass::InternalGroup;
        let rows = vec![internal, row("P2", "ACME", "CAT1", 10.0)];

        let groups = impact_by_classification(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "IG");
        assert!((groups[0].impact - 30.0).abs() < 1e-9);
    }

    #[test]
    fn timeline_is_chronological() {
        let mut a = row("P1", "ACME", "CAT1", 1.0);
        a.shipment_creation_date = "2024-02-01".into();
        let mut b = row("P2", "ACME", "CAT1", 2.0);
        b.shipment_creation_date = "2024-01-15".into();
        let mut c = row("P3", "ACME", "CAT1", 3.0);
        c.shipment_creation_date = "2024-02-01".into();

        let timeline = impact_timeline(&[a, b, c]);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].key, "2024-01-15");
        assert_eq!(timeline[1].key, "2024-02-01");
        assert!((timeline[1].impact - 4.0).abs() < 1e-9);
    }
}

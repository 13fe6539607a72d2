use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::config::EngineConfig;
use crate::currency::to_reference_currency;
use crate::insights::summarize;
use crate::model::{
    OpenPoRecord, ReconMeta, ReconResult, ReconciledRecord, VendorClass, WorkbenchRecord,
};

/// Only Open-PO lines of this type participate in reconciliation.
const INVENTORY_LINE_TYPE: &str = "Inventory";

/// Date shapes seen in `PO_SHIPMENT_CREATION_DATE` across extracts.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S"];

/// Reconcile the two extracts into an impact-ranked table.
///
/// Pure function of its inputs plus the config tables: filter Open-PO to
/// Inventory lines, inner-join on (part, vendor), derive classification,
/// PO year, and the reference-currency price metrics, then sort by impact
/// descending. Unmatched rows on either side are dropped.
pub fn reconcile(
    config: &EngineConfig,
    open_po: &[OpenPoRecord],
    workbench: &[WorkbenchRecord],
) -> Vec<ReconciledRecord> {
    // Index the catalog by composite key. Duplicate keys are kept: the
    // join emits one row per matching catalog entry.
    let mut by_key: HashMap<(&str, &str), Vec<&WorkbenchRecord>> = HashMap::new();
    for wb in workbench {
        by_key
            .entry((wb.part_number.as_str(), wb.vendor_id.as_str()))
            .or_default()
            .push(wb);
    }

    let mut rows = Vec::new();

    for po in open_po {
        if po.line_type != INVENTORY_LINE_TYPE {
            continue;
        }
        let Some(matches) = by_key.get(&(po.part_item_code.as_str(), po.vendor_id.as_str()))
        else {
            continue;
        };

        for wb in matches {
            rows.push(reconcile_pair(config, po, wb));
        }
    }

    // Stable sort keeps input order among equal impacts.
    rows.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    rows
}

fn reconcile_pair(
    config: &EngineConfig,
    po: &OpenPoRecord,
    wb: &WorkbenchRecord,
) -> ReconciledRecord {
    let unit_price_workbench_ref =
        to_reference_currency(wb.unit_price, &wb.currency_code, &config.rates);
    let unit_price_open_po_ref =
        to_reference_currency(po.unit_price, &po.currency_code, &config.rates);

    let price_delta = unit_price_open_po_ref - unit_price_workbench_ref;
    let impact = price_delta * po.quantity_eligible_to_ship;
    let open_po_value = po.quantity_eligible_to_ship * unit_price_open_po_ref;

    ReconciledRecord {
        part_number: wb.part_number.clone(),
        description: wb.description.clone(),
        vendor_id: wb.vendor_id.clone(),
        vendor_name: wb.vendor_name.clone(),
        vendor_duns: wb.vendor_duns.clone(),
        category_code: wb.category_code.clone(),
        alternate_part_number: wb.alternate_part_number.clone(),
        unit_price_workbench: wb.unit_price,
        currency_workbench: wb.currency_code.clone(),

        order_type: po.order_type.clone(),
        line_type: po.line_type.clone(),
        po_num: po.po_num.clone(),
        release_num: po.release_num.clone(),
        line_num: po.line_num.clone(),
        shipment_num: po.shipment_num.clone(),
        authorization_status: po.authorization_status.clone(),
        shipment_creation_date: po.shipment_creation_date.clone(),
        quantity_eligible_to_ship: po.quantity_eligible_to_ship,
        unit_price_open_po: po.unit_price,
        currency_open_po: po.currency_code.clone(),

        classification: classify_vendor(&wb.vendor_name, &config.internal_vendor_markers),
        po_year: po_year(&po.shipment_creation_date),
        unit_price_workbench_ref,
        unit_price_open_po_ref,
        price_delta,
        impact,
        open_po_value,
    }
}

/// Internal-group iff the vendor name contains any configured marker,
/// case-insensitive.
pub fn classify_vendor(vendor_name: &str, markers: &[String]) -> VendorClass {
    let name = vendor_name.to_uppercase();
    if markers.iter().any(|m| name.contains(&m.to_uppercase())) {
        VendorClass::InternalGroup
    } else {
        VendorClass::OtherGroup
    }
}

/// Calendar year of the shipment-creation date. None when no known date
/// shape matches; the row is still reconciled.
pub fn po_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.year());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d.year());
        }
    }
    None
}

/// Run a full reconciliation: ranked table, summary insights, metadata.
pub fn run(
    config: &EngineConfig,
    open_po: &[OpenPoRecord],
    workbench: &[WorkbenchRecord],
) -> ReconResult {
    let rows = reconcile(config, open_po, workbench);
    let summary = summarize(&rows);

    ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

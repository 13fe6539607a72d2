//! Flat CSV serialization of the reconciled table for download.
//!
//! Column order is identical to the in-memory table; no columns are
//! omitted or transformed. Rows are written in table order, which is
//! already impact-ranked.

use std::io::Write;

use crate::error::ReconError;
use crate::model::ReconciledRecord;

pub const COLUMNS: &[&str] = &[
    "part_number",
    "description",
    "vendor_id",
    "vendor_name",
    "vendor_duns",
    "category_code",
    "alternate_part_number",
    "unit_price_workbench",
    "currency_workbench",
    "order_type",
    "line_type",
    "po_num",
    "release_num",
    "line_num",
    "shipment_num",
    "authorization_status",
    "shipment_creation_date",
    "quantity_eligible_to_ship",
    "unit_price_open_po",
    "currency_open_po",
    "classification",
    "po_year",
    "unit_price_workbench_ref",
    "unit_price_open_po_ref",
    "price_delta",
    "impact",
    "open_po_value",
];

pub fn write_csv<W: Write>(rows: &[ReconciledRecord], writer: W) -> Result<(), ReconError> {
    let mut w = csv::Writer::from_writer(writer);

    w.write_record(COLUMNS)
        .map_err(|e| ReconError::Csv(e.to_string()))?;

    for r in rows {
        let record = [
            r.part_number.clone(),
            r.description.clone(),
            r.vendor_id.clone(),
            r.vendor_name.clone(),
            r.vendor_duns.clone(),
            r.category_code.clone(),
            r.alternate_part_number.clone(),
            r.unit_price_workbench.to_string(),
            r.currency_workbench.clone(),
            r.order_type.clone(),
            r.line_type.clone(),
            r.po_num.clone(),
            r.release_num.clone(),
            r.line_num.clone(),
            r.shipment_num.clone(),
            r.authorization_status.clone(),
            r.shipment_creation_date.clone(),
            r.quantity_eligible_to_ship.to_string(),
            r.unit_price_open_po.to_string(),
            r.currency_open_po.clone(),
            r.classification.to_string(),
            r.po_year.map(|y| y.to_string()).unwrap_or_default(),
            r.unit_price_workbench_ref.to_string(),
            r.unit_price_open_po_ref.to_string(),
            r.price_delta.to_string(),
            r.impact.to_string(),
            r.open_po_value.to_string(),
        ];
        w.write_record(&record)
            .map_err(|e| ReconError::Csv(e.to_string()))?;
    }

    w.flush().map_err(|e| ReconError::Io(e.to_string()))?;
    Ok(())
}

pub fn to_csv_string(rows: &[ReconciledRecord]) -> Result<String, ReconError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ReconError::Csv(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

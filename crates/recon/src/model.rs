use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which extract a row (or error) came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    OpenPo,
    Workbench,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenPo => write!(f, "open_po"),
            Self::Workbench => write!(f, "workbench"),
        }
    }
}

/// A single row from the Open-PO report extract.
///
/// `shipment_creation_date` is kept raw; the reconciler derives `po_year`
/// from it and absorbs parse failures per row.
#[derive(Debug, Clone)]
pub struct OpenPoRecord {
    pub part_item_code: String,
    pub vendor_id: String,
    pub order_type: String,
    pub line_type: String,
    pub po_num: String,
    pub release_num: String,
    pub line_num: String,
    pub shipment_num: String,
    pub authorization_status: String,
    pub shipment_creation_date: String,
    pub quantity_eligible_to_ship: f64,
    pub unit_price: f64,
    pub currency_code: String,
}

/// A single row from the Workbench catalog extract.
#[derive(Debug, Clone)]
pub struct WorkbenchRecord {
    pub part_number: String,
    pub vendor_id: String,
    pub description: String,
    pub vendor_name: String,
    pub vendor_duns: String,
    pub category_code: String,
    pub alternate_part_number: String,
    pub unit_price: f64,
    pub currency_code: String,
}

// ---------------------------------------------------------------------------
// Output table
// ---------------------------------------------------------------------------

/// Vendor classification: part of the purchasing organization's own
/// manufacturing network, or an external supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorClass {
    InternalGroup,
    OtherGroup,
}

impl std::fmt::Display for VendorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InternalGroup => write!(f, "IG"),
            Self::OtherGroup => write!(f, "OG"),
        }
    }
}

/// One matched (part, vendor) pair with both sources' attributes kept
/// distinct plus the derived price metrics.
///
/// Unit price and currency carry a source suffix by construction, so a
/// join can never collapse the two sides into one column.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledRecord {
    // Workbench side
    pub part_number: String,
    pub description: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub vendor_duns: String,
    pub category_code: String,
    pub alternate_part_number: String,
    pub unit_price_workbench: f64,
    pub currency_workbench: String,

    // Open-PO side
    pub order_type: String,
    pub line_type: String,
    pub po_num: String,
    pub release_num: String,
    pub line_num: String,
    pub shipment_num: String,
    pub authorization_status: String,
    pub shipment_creation_date: String,
    pub quantity_eligible_to_ship: f64,
    pub unit_price_open_po: f64,
    pub currency_open_po: String,

    // Derived
    pub classification: VendorClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_year: Option<i32>,
    pub unit_price_workbench_ref: f64,
    pub unit_price_open_po_ref: f64,
    pub price_delta: f64,
    pub impact: f64,
    pub open_po_value: f64,
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// Summed impact for one group (vendor, category, classification, date).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupImpact {
    pub key: String,
    pub impact: f64,
}

/// Read-only aggregate over a reconciled table. Recomputed fresh on every
/// reconciliation; absent entirely when the join produced no rows.
#[derive(Debug, Clone, Serialize)]
pub struct InsightSummary {
    pub total_impact: f64,
    pub total_open_po_value: f64,
    pub distinct_parts: usize,
    pub distinct_vendors: usize,
    pub top_vendors: Vec<GroupImpact>,
    pub top_categories: Vec<GroupImpact>,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Full engine output: metadata, summary (None = empty join), and the
/// impact-ranked reconciled table.
#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<InsightSummary>,
    pub rows: Vec<ReconciledRecord>,
}

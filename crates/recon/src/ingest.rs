//! CSV ingestion for the two extracts.
//!
//! Header names are matched after trimming surrounding whitespace (the
//! source systems emit stray spaces around some headers). A missing
//! required column fails the whole load; a malformed quantity or price
//! cell fails with the exact row, column, and value.

use crate::error::ReconError;
use crate::model::{OpenPoRecord, Source, WorkbenchRecord};

/// Resolved header indices for one extract.
struct Headers {
    source: Source,
    names: Vec<String>,
}

impl Headers {
    fn read<R: std::io::Read>(
        source: Source,
        reader: &mut csv::Reader<R>,
    ) -> Result<Self, ReconError> {
        let names = reader
            .headers()
            .map_err(|e| ReconError::Csv(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        Ok(Self { source, names })
    }

    fn index(&self, column: &str) -> Result<usize, ReconError> {
        self.names
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ReconError::MissingColumn {
                source: self.source,
                column: column.into(),
            })
    }

    /// Like `index`, but with a fallback header name. The error names the
    /// primary column.
    fn index_or(&self, column: &str, fallback: &str) -> Result<usize, ReconError> {
        match self.names.iter().position(|h| h == column || h == fallback) {
            Some(i) => Ok(i),
            None => Err(ReconError::MissingColumn {
                source: self.source,
                column: column.into(),
            }),
        }
    }
}

fn field(record: &csv::StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

fn number(
    source: Source,
    record: &csv::StringRecord,
    row: usize,
    idx: usize,
    column: &str,
) -> Result<f64, ReconError> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse().map_err(|_| ReconError::NumberParse {
        source,
        row,
        column: column.into(),
        value: raw.into(),
    })
}

/// Load Open-PO report rows. All line types are loaded; the reconciler
/// filters to Inventory.
pub fn load_open_po(csv_data: &str) -> Result<Vec<OpenPoRecord>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers = Headers::read(Source::OpenPo, &mut reader)?;

    let item_idx = headers.index("ITEM")?;
    let vendor_idx = headers.index("VENDOR_NUM")?;
    let order_type_idx = headers.index("ORDER_TYPE")?;
    let line_type_idx = headers.index("LINE_TYPE")?;
    let po_num_idx = headers.index("PO_NUM")?;
    let release_idx = headers.index("RELEASE_NUM")?;
    let line_num_idx = headers.index("LINE_NUM")?;
    let shipment_idx = headers.index("SHIPMENT_NUM")?;
    let auth_idx = headers.index("AUTHORIZATION_STATUS")?;
    let date_idx = headers.index("PO_SHIPMENT_CREATION_DATE")?;
    let qty_idx = headers.index("QTY_ELIGIBLE_TO_SHIP")?;
    let price_idx = headers.index("UNIT_PRICE")?;
    // The source extract spells the currency header "CURRNECY"; accept the
    // corrected spelling too.
    let currency_idx = headers.index_or("CURRNECY", "CURRENCY_CODE")?;

    let mut rows = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReconError::Csv(e.to_string()))?;
        let row = i + 1;

        rows.push(OpenPoRecord {
            part_item_code: field(&record, item_idx),
            vendor_id: field(&record, vendor_idx),
            order_type: field(&record, order_type_idx),
            line_type: field(&record, line_type_idx),
            po_num: field(&record, po_num_idx),
            release_num: field(&record, release_idx),
            line_num: field(&record, line_num_idx),
            shipment_num: field(&record, shipment_idx),
            authorization_status: field(&record, auth_idx),
            shipment_creation_date: field(&record, date_idx),
            quantity_eligible_to_ship: number(
                Source::OpenPo,
                &record,
                row,
                qty_idx,
                "QTY_ELIGIBLE_TO_SHIP",
            )?,
            unit_price: number(Source::OpenPo, &record, row, price_idx, "UNIT_PRICE")?,
            currency_code: field(&record, currency_idx),
        });
    }

    Ok(rows)
}

/// Load Workbench catalog rows.
pub fn load_workbench(csv_data: &str) -> Result<Vec<WorkbenchRecord>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers = Headers::read(Source::Workbench, &mut reader)?;

    let part_idx = headers.index("PART_NUMBER")?;
    let vendor_idx = headers.index("VENDOR_NUM")?;
    let desc_idx = headers.index("DESCRIPTION")?;
    let vendor_name_idx = headers.index("VENDOR_NAME")?;
    let duns_idx = headers.index("DANDB")?;
    let category_idx = headers.index("STARS Category Code")?;
    let alt_part_idx = headers.index("ASL_MPN")?;
    let price_idx = headers.index("UNIT_PRICE")?;
    let currency_idx = headers.index("CURRENCY_CODE")?;

    let mut rows = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReconError::Csv(e.to_string()))?;
        let row = i + 1;

        rows.push(WorkbenchRecord {
            part_number: field(&record, part_idx),
            vendor_id: field(&record, vendor_idx),
            description: field(&record, desc_idx),
            vendor_name: field(&record, vendor_name_idx),
            vendor_duns: field(&record, duns_idx),
            category_code: field(&record, category_idx),
            alternate_part_number: field(&record, alt_part_idx),
            unit_price: number(Source::Workbench, &record, row, price_idx, "UNIT_PRICE")?,
            currency_code: field(&record, currency_idx),
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN_PO: &str = "\
ORDER_TYPE,LINE_TYPE,ITEM,VENDOR_NUM,PO_NUM,RELEASE_NUM,LINE_NUM,SHIPMENT_NUM,AUTHORIZATION_STATUS,PO_SHIPMENT_CREATION_DATE,QTY_ELIGIBLE_TO_SHIP,UNIT_PRICE,CURRNECY
Standard,Inventory,P1,V1,4500001,0,1,1,Approved,2024-03-15,10,50,USD
Standard,Service,P2,V2,4500002,0,1,1,Approved,2024-04-01,5,12.5,GBP
";

    const WORKBENCH: &str = "\
PART_NUMBER,DESCRIPTION,VENDOR_NUM,VENDOR_NAME,DANDB,STARS Category Code,ASL_MPN,UNIT_PRICE,CURRENCY_CODE
P1,Contactor,V1,ACME CORP,123456789,CAT1,MPN-1,40,USD
";

    #[test]
    fn load_open_po_basic() {
        let rows = load_open_po(OPEN_PO).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].part_item_code, "P1");
        assert_eq!(rows[0].quantity_eligible_to_ship, 10.0);
        assert_eq!(rows[0].unit_price, 50.0);
        assert_eq!(rows[0].currency_code, "USD");
        assert_eq!(rows[1].line_type, "Service");
        assert_eq!(rows[1].unit_price, 12.5);
    }

    #[test]
    fn load_workbench_basic() {
        let rows = load_workbench(WORKBENCH).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].part_number, "P1");
        assert_eq!(rows[0].vendor_name, "ACME CORP");
        assert_eq!(rows[0].vendor_duns, "123456789");
        assert_eq!(rows[0].category_code, "CAT1");
        assert_eq!(rows[0].unit_price, 40.0);
    }

    #[test]
    fn headers_trimmed_before_lookup() {
        let csv = "\
 PART_NUMBER ,DESCRIPTION,VENDOR_NUM,VENDOR_NAME,DANDB,STARS Category Code ,ASL_MPN,UNIT_PRICE,CURRENCY_CODE
P9,Relay,V9,ZENER LTD,987,CAT9,MPN-9,7.25,JPY
";
        let rows = load_workbench(csv).unwrap();
        assert_eq!(rows[0].part_number, "P9");
        assert_eq!(rows[0].category_code, "CAT9");
    }

    #[test]
    fn missing_column_names_the_field() {
        let csv = "\
PART_NUMBER,DESCRIPTION,VENDOR_NUM,VENDOR_NAME,DANDB,ASL_MPN,UNIT_PRICE,CURRENCY_CODE
P1,Contactor,V1,ACME,123,MPN-1,40,USD
";
        let err = load_workbench(csv).unwrap_err();
        match err {
            ReconError::MissingColumn { source, column } => {
                assert_eq!(source, Source::Workbench);
                assert_eq!(column, "STARS Category Code");
            }
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn open_po_accepts_corrected_currency_header() {
        let csv = OPEN_PO.replacen("CURRNECY", "CURRENCY_CODE", 1);
        let rows = load_open_po(&csv).unwrap();
        assert_eq!(rows[0].currency_code, "USD");
    }

    #[test]
    fn open_po_missing_currency_reports_source_spelling() {
        let csv = OPEN_PO.replacen("CURRNECY", "CCY", 1);
        let err = load_open_po(&csv).unwrap_err();
        assert!(err.to_string().contains("'CURRNECY'"), "got: {err}");
    }

    #[test]
    fn bad_quantity_fails_with_row_and_value() {
        let csv = OPEN_PO.replacen(",10,", ",ten,", 1);
        let err = load_open_po(&csv).unwrap_err();
        match err {
            ReconError::NumberParse { source, row, column, value } => {
                assert_eq!(source, Source::OpenPo);
                assert_eq!(row, 1);
                assert_eq!(column, "QTY_ELIGIBLE_TO_SHIP");
                assert_eq!(value, "ten");
            }
            other => panic!("expected NumberParse, got {other}"),
        }
    }

    #[test]
    fn empty_price_cell_is_an_error() {
        let csv = WORKBENCH.replacen(",40,", ",,", 1);
        let err = load_workbench(csv.as_str()).unwrap_err();
        assert!(matches!(err, ReconError::NumberParse { .. }));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        let csv = "\
PART_NUMBER,DESCRIPTION,VENDOR_NUM,VENDOR_NAME,DANDB,STARS Category Code,ASL_MPN,UNIT_PRICE,CURRENCY_CODE
";
        let rows = load_workbench(csv).unwrap();
        assert!(rows.is_empty());
    }
}

use super::domain::{LoanType, OfferRecord};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read offer catalog: {}", err),
            CatalogError::Json(err) => write!(f, "invalid offer catalog JSON: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid offer catalog CSV: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Read-only offer list, built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferCatalog {
    records: Vec<OfferRecord>,
}

impl OfferCatalog {
    pub fn new(records: Vec<OfferRecord>) -> Self {
        Self { records }
    }

    /// Loads a catalog file, choosing CSV for `.csv` paths and JSON otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(file)
        }
    }

    /// Parses a JSON array of offer records.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let rows: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            records.extend(admit(row)?);
        }

        Ok(Self::new(records))
    }

    /// Parses a CSV export whose header row uses the JSON field names. Columns beyond the
    /// known ones are kept as text.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();

        for row in csv_reader.records() {
            let row = row?;
            let fields = headers
                .iter()
                .zip(row.iter())
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(column, cell)| (column.to_string(), csv_cell(column, cell)))
                .collect();
            records.extend(admit(fields)?);
        }

        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[OfferRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

const NUMERIC_COLUMNS: [&str; 6] = [
    "amountMin",
    "amountMax",
    "termMinMonths",
    "termMaxMonths",
    "rateMin",
    "rateMax",
];

// Unparseable numbers stay as text so deserialization reports them.
fn csv_cell(column: &str, cell: &str) -> Value {
    if NUMERIC_COLUMNS.contains(&column) {
        if let Some(number) = cell.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Value::Number(number);
        }
    }
    Value::String(cell.to_string())
}

/// Converts one raw row into a record. Rows naming a loan type the advisor does not offer
/// are skipped, since no profile can ever match them.
fn admit(row: Map<String, Value>) -> Result<Option<OfferRecord>, CatalogError> {
    if let Some(code) = row.get("type").and_then(Value::as_str) {
        if LoanType::from_code(code).is_none() {
            warn!(
                bank = row.get("bank").and_then(serde_json::Value::as_str).unwrap_or_default(),
                product = row.get("product").and_then(serde_json::Value::as_str).unwrap_or_default(),
                loan_type = code,
                "skipping offer with unknown loan type"
            );
            return Ok(None);
        }
    }

    Ok(Some(serde_json::from_value(Value::Object(row))?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn json_catalog_keeps_unknown_fields() {
        let json = r#"[
            {"bank": "Alfa", "product": "Cash Plus", "type": "cash",
             "amountMin": 30000, "amountMax": 5000000, "rateMin": 0.199,
             "url": "https://example.com/cash-plus"},
            {"bank": "Vostok", "product": "Home", "type": "mortgage", "rateMax": null}
        ]"#;

        let catalog = OfferCatalog::from_json_reader(Cursor::new(json)).expect("catalog parses");
        assert_eq!(catalog.len(), 2);

        let cash = &catalog.records()[0];
        assert_eq!(cash.loan_type, LoanType::Cash);
        assert_eq!(cash.amount_min, Some(30000.0));
        assert_eq!(cash.term_max_months, None);
        assert_eq!(
            cash.extra.get("url").and_then(Value::as_str),
            Some("https://example.com/cash-plus")
        );

        let home = &catalog.records()[1];
        assert_eq!(home.rate_max, None);
        assert!(home.extra.is_empty());
    }

    #[test]
    fn json_catalog_skips_unknown_loan_types() {
        let json = r#"[
            {"bank": "Alfa", "product": "Lease", "type": "leasing"},
            {"bank": "Alfa", "product": "Cash", "type": "cash"}
        ]"#;
        let catalog = OfferCatalog::from_json_reader(Cursor::new(json)).expect("catalog parses");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].product, "Cash");
    }

    #[test]
    fn json_catalog_rejects_records_without_a_type() {
        let json = r#"[{"bank": "Alfa", "product": "Lease"}]"#;
        let error = OfferCatalog::from_json_reader(Cursor::new(json)).expect_err("missing type");
        assert!(matches!(error, CatalogError::Json(_)));
    }

    #[test]
    fn csv_catalog_treats_empty_cells_as_unbounded() {
        let csv = "bank,product,type,amountMin,amountMax,termMinMonths,termMaxMonths,rateMin,rateMax,url\n\
Sever,Auto Drive,auto,100000,,12,84,0.15,0.24,https://example.com/auto\n\
Sever,Refi,refinance,,,,,,,\n";

        let catalog = OfferCatalog::from_csv_reader(Cursor::new(csv)).expect("csv parses");
        assert_eq!(catalog.len(), 2);

        let auto = &catalog.records()[0];
        assert_eq!(auto.amount_min, Some(100000.0));
        assert_eq!(auto.amount_max, None);
        assert_eq!(auto.term_max_months, Some(84.0));
        assert!(auto.extra.contains_key("url"));

        let refi = &catalog.records()[1];
        assert_eq!(refi.quoted_rate(), None);
        assert!(refi.extra.is_empty());
    }

    #[test]
    fn csv_catalog_keeps_extra_columns_and_skips_unknown_types() {
        let csv = "bank,product,type,rateMin,url,note\n\
Sever,Cash,cash,0.2,https://example.com/cash,online only\n\
Sever,Lease,leasing,0.1,,\n";

        let catalog = OfferCatalog::from_csv_reader(Cursor::new(csv)).expect("csv parses");
        assert_eq!(catalog.len(), 1);

        let cash = &catalog.records()[0];
        assert_eq!(cash.rate_min, Some(0.2));
        assert_eq!(
            cash.extra.get("note").and_then(Value::as_str),
            Some("online only")
        );
        assert_eq!(
            cash.extra.get("url").and_then(Value::as_str),
            Some("https://example.com/cash")
        );
    }

    #[test]
    fn csv_catalog_rejects_unparseable_bounds() {
        let csv = "bank,product,type,amountMin\nSever,Cash,cash,lots\n";
        let error = OfferCatalog::from_csv_reader(Cursor::new(csv)).expect_err("bad bound");
        assert!(matches!(error, CatalogError::Json(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = OfferCatalog::from_path("./does-not-exist.json").expect_err("missing file");
        match error {
            CatalogError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}

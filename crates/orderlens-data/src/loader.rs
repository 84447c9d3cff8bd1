//! CSV loading for the order-line table
//!
//! Loading fails fast: a missing expected column or an unparseable timestamp
//! aborts construction before any aggregator can run on partial data.

use crate::{OrderRecord, OrderTable};
use chrono::NaiveDateTime;
use orderlens_common::{OrderLensError, Result, Timestamp};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};

/// Timestamp layout used by the source exports
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw CSV row before timestamp parsing. Extra columns in the file are
/// ignored; missing ones fail deserialization.
#[derive(Debug, Deserialize)]
struct RawOrderRecord {
    order_id: String,
    customer_id: String,
    order_purchase_timestamp: String,
    #[serde(default)]
    order_delivered_customer_date: Option<String>,
    price: f64,
    product_id: String,
    #[serde(default)]
    product_category_name_english: Option<String>,
    #[serde(default)]
    customer_state: Option<String>,
}

fn parse_timestamp(value: &str, column: &str, row: usize) -> Result<Timestamp> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
        OrderLensError::parse_with_source(
            format!("row {}: unparseable timestamp {:?}", row, value),
            column,
            e,
        )
    })
}

fn parse_optional_timestamp(
    value: Option<&str>,
    column: &str,
    row: usize,
) -> Result<Option<Timestamp>> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_timestamp(s, column, row).map(Some),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl RawOrderRecord {
    fn into_record(self, row: usize) -> Result<OrderRecord> {
        let purchase = parse_timestamp(
            &self.order_purchase_timestamp,
            "order_purchase_timestamp",
            row,
        )?;
        let delivered = parse_optional_timestamp(
            self.order_delivered_customer_date.as_deref(),
            "order_delivered_customer_date",
            row,
        )?;

        Ok(OrderRecord {
            order_id: self.order_id,
            customer_id: self.customer_id,
            order_purchase_timestamp: purchase,
            order_delivered_customer_date: delivered,
            price: self.price,
            product_id: self.product_id,
            product_category_name_english: non_empty(self.product_category_name_english),
            customer_state: non_empty(self.customer_state),
        })
    }
}

/// Load an order-line table from a CSV file.
///
/// The resulting table is sorted ascending by purchase timestamp.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<OrderTable> {
    let mut reader = csv::Reader::from_path(path.as_ref()).map_err(|e| {
        OrderLensError::table_with_source(
            format!("failed to open {}", path.as_ref().display()),
            e,
        )
    })?;

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<RawOrderRecord>().enumerate() {
        // Row numbers are 1-based and skip the header line
        let row = i + 2;
        let raw = result.map_err(|e| {
            OrderLensError::parse_with_source(
                format!("row {}: malformed record", row),
                "<csv>",
                e,
            )
        })?;
        records.push(raw.into_record(row)?);
    }

    let table = OrderTable::from_records(records);
    info!("Loaded {} order lines", table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "order_id,customer_id,order_purchase_timestamp,order_delivered_customer_date,price,product_id,product_category_name_english,customer_state";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_load_csv_parses_and_sorts() {
        let file = write_csv(&[
            "o2,c2,2018-01-03 09:00:00,2018-01-10 09:00:00,20.0,p2,toys,SP",
            "o1,c1,2018-01-01 10:30:00,,10.5,p1,bed_bath_table,RJ",
        ]);

        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.order_ids(), &["o1", "o2"]);
        assert_eq!(table.prices(), &[10.5, 20.0]);
        assert_eq!(table.delivered_timestamps()[0], None);
        assert!(table.delivered_timestamps()[1].is_some());
    }

    #[test]
    fn test_missing_category_and_state_become_none() {
        let file = write_csv(&["o1,c1,2018-01-01 10:30:00,,10.5,p1,,"]);

        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.categories()[0], None);
        assert_eq!(table.states()[0], None);
    }

    #[test]
    fn test_bad_timestamp_fails_fast() {
        let file = write_csv(&["o1,c1,not-a-date,,10.5,p1,toys,SP"]);

        let err = load_csv(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Parse error"), "unexpected error: {}", msg);
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "order_id,customer_id").unwrap();
        writeln!(file, "o1,c1").unwrap();

        assert!(load_csv(file.path()).is_err());
    }

    #[test]
    fn test_unreadable_path_reports_table_error() {
        let err = load_csv("/nonexistent/orders.csv").unwrap_err();
        assert!(matches!(err, OrderLensError::Table { .. }));
        assert!(err.to_string().contains("failed to open"));
    }

    #[test]
    fn test_empty_file_yields_empty_table() {
        let file = write_csv(&[]);
        let table = load_csv(file.path()).unwrap();
        assert!(table.is_empty());
    }
}

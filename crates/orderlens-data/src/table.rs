//! Columnar in-memory table of order-line records
//!
//! The table owns its column storage; aggregators borrow it read-only and the
//! range filter materializes a fresh table instead of mutating in place.

use crate::OrderRecord;
use orderlens_common::Timestamp;
use tracing::debug;

/// In-memory order-line table with typed columns.
///
/// Rows are kept stably sorted ascending by purchase timestamp. The ordering
/// does not change any aggregate value, but it makes tie-break order within
/// equal-key groups reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderTable {
    order_ids: Vec<String>,
    customer_ids: Vec<String>,
    purchase_timestamps: Vec<Timestamp>,
    delivered_timestamps: Vec<Option<Timestamp>>,
    prices: Vec<f64>,
    product_ids: Vec<String>,
    categories: Vec<Option<String>>,
    states: Vec<Option<String>>,
}

impl OrderTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from records, stably sorting by purchase timestamp
    pub fn from_records(mut records: Vec<OrderRecord>) -> Self {
        records.sort_by_key(|r| r.order_purchase_timestamp);

        let mut table = Self::new();
        for record in records {
            table.push(record);
        }
        debug!("Built order table with {} rows", table.len());
        table
    }

    fn push(&mut self, record: OrderRecord) {
        self.order_ids.push(record.order_id);
        self.customer_ids.push(record.customer_id);
        self.purchase_timestamps.push(record.order_purchase_timestamp);
        self.delivered_timestamps
            .push(record.order_delivered_customer_date);
        self.prices.push(record.price);
        self.product_ids.push(record.product_id);
        self.categories.push(record.product_category_name_english);
        self.states.push(record.customer_state);
    }

    /// Number of line items in the table
    pub fn len(&self) -> usize {
        self.order_ids.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.order_ids.is_empty()
    }

    /// Order id column
    pub fn order_ids(&self) -> &[String] {
        &self.order_ids
    }

    /// Customer id column
    pub fn customer_ids(&self) -> &[String] {
        &self.customer_ids
    }

    /// Purchase timestamp column (ascending)
    pub fn purchase_timestamps(&self) -> &[Timestamp] {
        &self.purchase_timestamps
    }

    /// Delivery timestamp column
    pub fn delivered_timestamps(&self) -> &[Option<Timestamp>] {
        &self.delivered_timestamps
    }

    /// Line-item price column
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Product id column
    pub fn product_ids(&self) -> &[String] {
        &self.product_ids
    }

    /// Product category column; `None` marks a missing category
    pub fn categories(&self) -> &[Option<String>] {
        &self.categories
    }

    /// Customer state column; `None` marks a missing region code
    pub fn states(&self) -> &[Option<String>] {
        &self.states
    }

    /// Earliest purchase timestamp, if any rows exist
    pub fn min_purchase_timestamp(&self) -> Option<Timestamp> {
        self.purchase_timestamps.first().copied()
    }

    /// Latest purchase timestamp, if any rows exist
    pub fn max_purchase_timestamp(&self) -> Option<Timestamp> {
        self.purchase_timestamps.last().copied()
    }

    /// Materialize the rows whose indices satisfy the predicate into a new
    /// table, preserving row order. The source is left untouched.
    pub fn select<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let mut out = Self::new();
        for i in 0..self.len() {
            if keep(i) {
                out.order_ids.push(self.order_ids[i].clone());
                out.customer_ids.push(self.customer_ids[i].clone());
                out.purchase_timestamps.push(self.purchase_timestamps[i]);
                out.delivered_timestamps.push(self.delivered_timestamps[i]);
                out.prices.push(self.prices[i]);
                out.product_ids.push(self.product_ids[i].clone());
                out.categories.push(self.categories[i].clone());
                out.states.push(self.states[i].clone());
            }
        }
        out
    }

    /// Reconstruct the record at the given row
    pub fn record(&self, index: usize) -> OrderRecord {
        OrderRecord {
            order_id: self.order_ids[index].clone(),
            customer_id: self.customer_ids[index].clone(),
            order_purchase_timestamp: self.purchase_timestamps[index],
            order_delivered_customer_date: self.delivered_timestamps[index],
            price: self.prices[index],
            product_id: self.product_ids[index].clone(),
            product_category_name_english: self.categories[index].clone(),
            customer_state: self.states[index].clone(),
        }
    }
}

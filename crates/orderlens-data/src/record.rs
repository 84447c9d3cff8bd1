//! Order-line record type

use orderlens_common::Timestamp;
use serde::{Deserialize, Serialize};

/// One line item of an order. An order may comprise several line items, so
/// `order_id` is not unique across records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier, shared by all line items of the same order
    pub order_id: String,
    /// Stable customer identifier
    pub customer_id: String,
    /// Purchase timestamp, the event clock for all bucketing and recency
    pub order_purchase_timestamp: Timestamp,
    /// Delivery timestamp, parsed but unused by the aggregations
    pub order_delivered_customer_date: Option<Timestamp>,
    /// Line-item revenue contribution, non-negative by convention (unvalidated)
    pub price: f64,
    /// Product identifier
    pub product_id: String,
    /// Category label, shared by many products; missing for some records
    pub product_category_name_english: Option<String>,
    /// Region code of the buying customer
    pub customer_state: Option<String>,
}

//! Aggregators deriving the dashboard views from a filtered order table
//!
//! Each aggregator is a single hash-map-keyed accumulation pass over a
//! borrowed table. Group keys and aggregate shapes are fixed, so there is no
//! generic grouping engine here. Views without a natural sort key emit rows
//! in first-occurrence order so repeated runs produce identical output.

use crate::views::{
    CategoryCount, CategoryRankingView, DailyOrdersPoint, DailyOrdersView, RegionView, RfmScore,
    RfmView, StateCustomerCount,
};
use chrono::NaiveDate;
use orderlens_common::{utils::id_prefix, Result, Timestamp};
use orderlens_data::OrderTable;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Number of id characters shown for a customer in the RFM view
const CUSTOMER_ID_PREFIX_LEN: usize = 5;

/// Trait for deriving one view from a borrowed order table
pub trait ViewAggregator<T> {
    /// Run one accumulation pass over the table and produce the view
    fn aggregate(&self, table: &OrderTable) -> Result<T>;
}

/// Aggregator for the daily order count and revenue time series
#[derive(Debug, Default)]
pub struct DailyOrdersAggregator;

impl DailyOrdersAggregator {
    pub fn new() -> Self {
        Self
    }
}

/// Per-day accumulation state
#[derive(Debug, Default)]
struct DayBucket<'a> {
    orders: HashSet<&'a str>,
    revenue: f64,
}

impl ViewAggregator<DailyOrdersView> for DailyOrdersAggregator {
    #[instrument(skip(self, table))]
    fn aggregate(&self, table: &OrderTable) -> Result<DailyOrdersView> {
        let mut buckets: HashMap<NaiveDate, DayBucket> = HashMap::new();

        for i in 0..table.len() {
            let day = table.purchase_timestamps()[i].date();
            let bucket = buckets.entry(day).or_default();
            bucket.orders.insert(table.order_ids()[i].as_str());
            bucket.revenue += table.prices()[i];
        }

        let mut points: Vec<DailyOrdersPoint> = buckets
            .into_iter()
            .map(|(day, bucket)| DailyOrdersPoint {
                day,
                order_count: bucket.orders.len() as u32,
                revenue: bucket.revenue,
            })
            .collect();

        // Only observed days appear; sort the series ascending
        points.sort_by_key(|point| point.day);

        debug!("Aggregated {} daily order data points", points.len());
        Ok(DailyOrdersView { points })
    }
}

/// Aggregator ranking product categories by line-item count
#[derive(Debug, Default)]
pub struct CategoryRankingAggregator;

impl CategoryRankingAggregator {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
struct CategoryBucket {
    first_seen: usize,
    line_items: u32,
}

impl ViewAggregator<CategoryRankingView> for CategoryRankingAggregator {
    #[instrument(skip(self, table))]
    fn aggregate(&self, table: &OrderTable) -> Result<CategoryRankingView> {
        let mut buckets: HashMap<Option<&str>, CategoryBucket> = HashMap::new();

        for (i, category) in table.categories().iter().enumerate() {
            // A missing category is a valid group of its own, never dropped
            let bucket = buckets
                .entry(category.as_deref())
                .or_insert(CategoryBucket {
                    first_seen: i,
                    line_items: 0,
                });
            bucket.line_items += 1;
        }

        let mut entries: Vec<(usize, CategoryCount)> = buckets
            .into_iter()
            .map(|(category, bucket)| {
                (
                    bucket.first_seen,
                    CategoryCount {
                        category: category.map(|s| s.to_string()),
                        line_items: bucket.line_items,
                    },
                )
            })
            .collect();

        // First-appearance order, then a stable descending sort by count so
        // ties keep that order
        entries.sort_by_key(|(first_seen, _)| *first_seen);
        let mut ranking: Vec<CategoryCount> = entries.into_iter().map(|(_, c)| c).collect();
        ranking.sort_by(|a, b| b.line_items.cmp(&a.line_items));

        debug!("Aggregated {} category groups", ranking.len());
        Ok(CategoryRankingView { ranking })
    }
}

/// Aggregator counting distinct customers per state
#[derive(Debug, Default)]
pub struct RegionAggregator;

impl RegionAggregator {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
struct StateBucket<'a> {
    first_seen: usize,
    customers: HashSet<&'a str>,
}

impl ViewAggregator<RegionView> for RegionAggregator {
    #[instrument(skip(self, table))]
    fn aggregate(&self, table: &OrderTable) -> Result<RegionView> {
        let mut buckets: HashMap<Option<&str>, StateBucket> = HashMap::new();

        for (i, state) in table.states().iter().enumerate() {
            let bucket = buckets.entry(state.as_deref()).or_insert(StateBucket {
                first_seen: i,
                customers: HashSet::new(),
            });
            // Distinct customers: a repeat customer in the same state counts once
            bucket.customers.insert(table.customer_ids()[i].as_str());
        }

        let mut entries: Vec<(usize, StateCustomerCount)> = buckets
            .into_iter()
            .map(|(state, bucket)| {
                (
                    bucket.first_seen,
                    StateCustomerCount {
                        state: state.map(|s| s.to_string()),
                        customer_count: bucket.customers.len() as u32,
                    },
                )
            })
            .collect();

        entries.sort_by_key(|(first_seen, _)| *first_seen);
        let states: Vec<StateCustomerCount> = entries.into_iter().map(|(_, s)| s).collect();

        debug!("Aggregated {} state groups", states.len());
        Ok(RegionView { states })
    }
}

/// Aggregator computing the per-customer RFM segmentation.
///
/// Recency is measured against a reference date computed once from the
/// *unfiltered* dataset and threaded in here, never recomputed from the
/// filtered subset: narrowing the window changes which customers appear, not
/// the recency yardstick.
#[derive(Debug)]
pub struct RfmAggregator {
    reference_date: Timestamp,
}

impl RfmAggregator {
    pub fn new(reference_date: Timestamp) -> Self {
        Self { reference_date }
    }

    /// Whole-day difference between the reference date and a purchase.
    ///
    /// Duration-based floor over full timestamps: a purchase less than 24
    /// hours before the reference yields 0 even across a midnight boundary.
    fn recency_days(&self, last_purchase: Timestamp) -> i64 {
        (self.reference_date - last_purchase).num_days()
    }
}

#[derive(Debug)]
struct CustomerBucket<'a> {
    first_seen: usize,
    orders: HashSet<&'a str>,
    monetary: f64,
    last_purchase: Timestamp,
}

impl ViewAggregator<RfmView> for RfmAggregator {
    #[instrument(skip(self, table))]
    fn aggregate(&self, table: &OrderTable) -> Result<RfmView> {
        let mut buckets: HashMap<&str, CustomerBucket> = HashMap::new();

        for i in 0..table.len() {
            let ts = table.purchase_timestamps()[i];
            let bucket = buckets
                .entry(table.customer_ids()[i].as_str())
                .or_insert(CustomerBucket {
                    first_seen: i,
                    orders: HashSet::new(),
                    monetary: 0.0,
                    last_purchase: ts,
                });
            bucket.orders.insert(table.order_ids()[i].as_str());
            bucket.monetary += table.prices()[i];
            if ts > bucket.last_purchase {
                bucket.last_purchase = ts;
            }
        }

        let mut entries: Vec<(usize, RfmScore)> = buckets
            .into_iter()
            .map(|(customer_id, bucket)| {
                (
                    bucket.first_seen,
                    RfmScore {
                        customer_id_prefix: id_prefix(customer_id, CUSTOMER_ID_PREFIX_LEN),
                        frequency: bucket.orders.len() as u32,
                        monetary: bucket.monetary,
                        recency_days: self.recency_days(bucket.last_purchase),
                    },
                )
            })
            .collect();

        entries.sort_by_key(|(first_seen, _)| *first_seen);
        let scores: Vec<RfmScore> = entries.into_iter().map(|(_, s)| s).collect();

        debug!("Aggregated RFM scores for {} customers", scores.len());
        Ok(RfmView { scores })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderlens_data::OrderRecord;

    fn record(
        order: &str,
        customer: &str,
        day: u32,
        price: f64,
        category: Option<&str>,
        state: Option<&str>,
    ) -> OrderRecord {
        OrderRecord {
            order_id: order.to_string(),
            customer_id: customer.to_string(),
            order_purchase_timestamp: NaiveDate::from_ymd_opt(2018, 3, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            order_delivered_customer_date: None,
            price,
            product_id: format!("prod-{}", order),
            product_category_name_english: category.map(|s| s.to_string()),
            customer_state: state.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_daily_orders_counts_distinct_orders() {
        // Order "a" has two line items on the same day
        let table = OrderTable::from_records(vec![
            record("a", "c1", 1, 10.0, None, None),
            record("a", "c1", 1, 15.0, None, None),
            record("b", "c2", 1, 7.0, None, None),
            record("c", "c3", 2, 3.0, None, None),
        ]);

        let view = DailyOrdersAggregator::new().aggregate(&table).unwrap();
        assert_eq!(view.points.len(), 2);

        assert_eq!(view.points[0].day, NaiveDate::from_ymd_opt(2018, 3, 1).unwrap());
        assert_eq!(view.points[0].order_count, 2);
        assert!((view.points[0].revenue - 32.0).abs() < 1e-9);

        assert_eq!(view.points[1].order_count, 1);
        assert!((view.points[1].revenue - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_orders_empty_table() {
        let view = DailyOrdersAggregator::new()
            .aggregate(&OrderTable::new())
            .unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_category_ranking_counts_line_items_not_products() {
        let table = OrderTable::from_records(vec![
            record("a", "c1", 1, 1.0, Some("toys"), None),
            record("a", "c1", 1, 1.0, Some("toys"), None),
            record("b", "c2", 2, 1.0, Some("auto"), None),
        ]);

        let view = CategoryRankingAggregator::new().aggregate(&table).unwrap();
        assert_eq!(view.ranking.len(), 2);
        assert_eq!(view.ranking[0].category.as_deref(), Some("toys"));
        assert_eq!(view.ranking[0].line_items, 2);
        assert_eq!(view.ranking[1].line_items, 1);
    }

    #[test]
    fn test_category_ranking_missing_category_is_a_group() {
        let table = OrderTable::from_records(vec![
            record("a", "c1", 1, 1.0, None, None),
            record("b", "c2", 1, 1.0, None, None),
            record("c", "c3", 2, 1.0, Some("toys"), None),
        ]);

        let view = CategoryRankingAggregator::new().aggregate(&table).unwrap();
        assert_eq!(view.ranking.len(), 2);
        assert_eq!(view.ranking[0].category, None);
        assert_eq!(view.ranking[0].line_items, 2);
    }

    #[test]
    fn test_category_ranking_ties_keep_first_appearance_order() {
        let table = OrderTable::from_records(vec![
            record("a", "c1", 1, 1.0, Some("later_winner"), None),
            record("b", "c2", 2, 1.0, Some("tied_one"), None),
            record("c", "c3", 3, 1.0, Some("tied_two"), None),
            record("d", "c4", 4, 1.0, Some("later_winner"), None),
        ]);

        let view = CategoryRankingAggregator::new().aggregate(&table).unwrap();
        assert_eq!(view.ranking[0].category.as_deref(), Some("later_winner"));
        assert_eq!(view.ranking[1].category.as_deref(), Some("tied_one"));
        assert_eq!(view.ranking[2].category.as_deref(), Some("tied_two"));
    }

    #[test]
    fn test_region_counts_distinct_customers() {
        let table = OrderTable::from_records(vec![
            record("a", "c1", 1, 1.0, None, Some("SP")),
            record("b", "c1", 2, 1.0, None, Some("SP")),
            record("c", "c2", 3, 1.0, None, Some("SP")),
            record("d", "c3", 4, 1.0, None, Some("RJ")),
        ]);

        let view = RegionAggregator::new().aggregate(&table).unwrap();
        assert_eq!(view.states.len(), 2);
        assert_eq!(view.states[0].state.as_deref(), Some("SP"));
        assert_eq!(view.states[0].customer_count, 2);
        assert_eq!(view.states[1].customer_count, 1);
    }

    #[test]
    fn test_region_missing_state_is_a_group() {
        let table = OrderTable::from_records(vec![
            record("a", "c1", 1, 1.0, None, None),
            record("b", "c2", 2, 1.0, None, None),
        ]);

        let view = RegionAggregator::new().aggregate(&table).unwrap();
        assert_eq!(view.states.len(), 1);
        assert_eq!(view.states[0].state, None);
        assert_eq!(view.states[0].customer_count, 2);
    }

    #[test]
    fn test_rfm_frequency_monetary_recency() {
        let table = OrderTable::from_records(vec![
            record("a", "customer-x", 1, 10.0, None, None),
            record("b", "customer-x", 3, 20.0, None, None),
            record("c", "customer-y", 3, 5.0, None, None),
        ]);

        let reference = table.max_purchase_timestamp().unwrap();
        let view = RfmAggregator::new(reference).aggregate(&table).unwrap();
        assert_eq!(view.len(), 2);

        let x = &view.scores[0];
        assert_eq!(x.customer_id_prefix, "custo");
        assert_eq!(x.frequency, 2);
        assert!((x.monetary - 30.0).abs() < 1e-9);
        assert_eq!(x.recency_days, 0);

        let y = &view.scores[1];
        assert_eq!(y.frequency, 1);
        assert!((y.monetary - 5.0).abs() < 1e-9);
        assert_eq!(y.recency_days, 0);
    }

    #[test]
    fn test_rfm_multi_line_order_counts_once() {
        let table = OrderTable::from_records(vec![
            record("a", "c1", 1, 10.0, None, None),
            record("a", "c1", 1, 12.0, None, None),
        ]);

        let reference = table.max_purchase_timestamp().unwrap();
        let view = RfmAggregator::new(reference).aggregate(&table).unwrap();
        assert_eq!(view.scores[0].frequency, 1);
        assert!((view.scores[0].monetary - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_rfm_recency_uses_duration_floor() {
        let mut early = record("a", "c1", 1, 1.0, None, None);
        early.order_purchase_timestamp = NaiveDate::from_ymd_opt(2018, 3, 1)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();

        let reference = NaiveDate::from_ymd_opt(2018, 3, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let table = OrderTable::from_records(vec![early]);
        let view = RfmAggregator::new(reference).aggregate(&table).unwrap();
        // 10.5 hours is less than a whole day
        assert_eq!(view.scores[0].recency_days, 0);

        let later_reference = NaiveDate::from_ymd_opt(2018, 3, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let view = RfmAggregator::new(later_reference).aggregate(&table).unwrap();
        assert_eq!(view.scores[0].recency_days, 1);
    }

    #[test]
    fn test_rfm_recency_never_negative_against_global_max() {
        let table = OrderTable::from_records(vec![
            record("a", "c1", 5, 1.0, None, None),
            record("b", "c2", 9, 1.0, None, None),
        ]);

        let reference = table.max_purchase_timestamp().unwrap();
        let view = RfmAggregator::new(reference).aggregate(&table).unwrap();
        assert!(view.scores.iter().all(|s| s.recency_days >= 0));
    }
}

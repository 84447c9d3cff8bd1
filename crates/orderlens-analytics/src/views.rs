//! Derived view types produced by the aggregation pipeline
//!
//! Views are immutable snapshots recomputed on every pipeline run. The
//! sum/mean helpers exist for the dashboard's summary metrics; means over an
//! empty view are undefined (NaN) by design, callers check emptiness first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One calendar day of order activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOrdersPoint {
    pub day: NaiveDate,
    /// Distinct orders purchased that day; a multi-line order counts once
    pub order_count: u32,
    /// Sum of line-item prices for that day
    pub revenue: f64,
}

/// Daily time series of order volume and revenue, ascending by day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyOrdersView {
    pub points: Vec<DailyOrdersPoint>,
}

impl DailyOrdersView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total distinct orders across all days
    pub fn total_orders(&self) -> u64 {
        self.points.iter().map(|p| u64::from(p.order_count)).sum()
    }

    /// Total revenue across all days
    pub fn total_revenue(&self) -> f64 {
        self.points.iter().map(|p| p.revenue).sum()
    }

    /// Mean revenue per observed day; NaN for an empty view
    pub fn mean_daily_revenue(&self) -> f64 {
        self.total_revenue() / self.points.len() as f64
    }

    /// Mean distinct orders per observed day; NaN for an empty view
    pub fn mean_daily_orders(&self) -> f64 {
        self.total_orders() as f64 / self.points.len() as f64
    }
}

/// Line-item count for one product category; `None` is the missing-category
/// group, kept as its own bucket rather than dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub line_items: u32,
}

/// Categories ranked descending by line-item count.
///
/// The "worst performing" display is this same aggregate re-sorted ascending,
/// never a second aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryRankingView {
    pub ranking: Vec<CategoryCount>,
}

impl CategoryRankingView {
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    pub fn total_line_items(&self) -> u64 {
        self.ranking.iter().map(|c| u64::from(c.line_items)).sum()
    }

    /// Top `n` categories by count (the stored descending order)
    pub fn best(&self, n: usize) -> &[CategoryCount] {
        &self.ranking[..self.ranking.len().min(n)]
    }

    /// Bottom `n` categories, obtained by re-sorting ascending
    pub fn worst(&self, n: usize) -> Vec<CategoryCount> {
        let mut ascending = self.ranking.clone();
        ascending.sort_by_key(|c| c.line_items);
        ascending.truncate(n);
        ascending
    }
}

/// Distinct-customer count for one state; `None` is the missing-state group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCustomerCount {
    pub state: Option<String>,
    pub customer_count: u32,
}

/// Distinct customers per state. The aggregator imposes no ranking; rows
/// appear in first-occurrence order and consumers sort for top-N displays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionView {
    pub states: Vec<StateCustomerCount>,
}

impl RegionView {
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Sum of per-state distinct-customer counts
    pub fn total_customers(&self) -> u64 {
        self.states.iter().map(|s| u64::from(s.customer_count)).sum()
    }

    /// Top `n` states by customer count, descending (stable)
    pub fn top(&self, n: usize) -> Vec<StateCustomerCount> {
        let mut ranked = self.states.clone();
        ranked.sort_by(|a, b| b.customer_count.cmp(&a.customer_count));
        ranked.truncate(n);
        ranked
    }
}

/// RFM score for one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfmScore {
    /// First five characters of the customer id, a display shorthand;
    /// prefix collisions between distinct customers are accepted
    pub customer_id_prefix: String,
    /// Distinct orders placed in the window
    pub frequency: u32,
    /// Sum of line-item prices in the window
    pub monetary: f64,
    /// Whole days between the dataset-wide reference date and the customer's
    /// latest purchase
    pub recency_days: i64,
}

/// Per-customer RFM segmentation. One row per distinct customer, in
/// first-occurrence order; the three "best customer" rankings are re-sorts of
/// this single view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RfmView {
    pub scores: Vec<RfmScore>,
}

impl RfmView {
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Mean recency in days; NaN for an empty view
    pub fn mean_recency(&self) -> f64 {
        self.scores.iter().map(|s| s.recency_days as f64).sum::<f64>() / self.scores.len() as f64
    }

    /// Mean order frequency; NaN for an empty view
    pub fn mean_frequency(&self) -> f64 {
        self.scores.iter().map(|s| f64::from(s.frequency)).sum::<f64>() / self.scores.len() as f64
    }

    /// Mean monetary total; NaN for an empty view
    pub fn mean_monetary(&self) -> f64 {
        self.scores.iter().map(|s| s.monetary).sum::<f64>() / self.scores.len() as f64
    }

    /// Top `n` customers by recency, ascending (most recent first)
    pub fn top_by_recency(&self, n: usize) -> Vec<RfmScore> {
        let mut ranked = self.scores.clone();
        ranked.sort_by_key(|s| s.recency_days);
        ranked.truncate(n);
        ranked
    }

    /// Top `n` customers by order frequency, descending
    pub fn top_by_frequency(&self, n: usize) -> Vec<RfmScore> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        ranked.truncate(n);
        ranked
    }

    /// Top `n` customers by monetary total, descending
    pub fn top_by_monetary(&self, n: usize) -> Vec<RfmScore> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.monetary.partial_cmp(&a.monetary).unwrap_or(Ordering::Equal));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: Option<&str>, count: u32) -> CategoryCount {
        CategoryCount {
            category: name.map(|s| s.to_string()),
            line_items: count,
        }
    }

    #[test]
    fn test_daily_view_sums() {
        let view = DailyOrdersView {
            points: vec![
                DailyOrdersPoint {
                    day: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                    order_count: 2,
                    revenue: 30.0,
                },
                DailyOrdersPoint {
                    day: NaiveDate::from_ymd_opt(2018, 1, 2).unwrap(),
                    order_count: 1,
                    revenue: 5.0,
                },
            ],
        };

        assert_eq!(view.total_orders(), 3);
        assert!((view.total_revenue() - 35.0).abs() < f64::EPSILON);
        assert!((view.mean_daily_revenue() - 17.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_means_are_nan() {
        assert!(DailyOrdersView::default().mean_daily_revenue().is_nan());
        let rfm = RfmView::default();
        assert!(rfm.mean_recency().is_nan());
        assert!(rfm.mean_frequency().is_nan());
        assert!(rfm.mean_monetary().is_nan());
    }

    #[test]
    fn test_worst_is_reversed_best() {
        let view = CategoryRankingView {
            ranking: vec![
                category(Some("toys"), 9),
                category(Some("auto"), 4),
                category(None, 1),
            ],
        };

        assert_eq!(view.best(2), &view.ranking[..2]);

        let worst = view.worst(2);
        assert_eq!(worst[0], category(None, 1));
        assert_eq!(worst[1], category(Some("auto"), 4));
    }

    #[test]
    fn test_worst_ties_keep_stable_order() {
        let view = CategoryRankingView {
            ranking: vec![
                category(Some("a"), 3),
                category(Some("b"), 1),
                category(Some("c"), 1),
            ],
        };

        let worst = view.worst(3);
        assert_eq!(worst[0].category.as_deref(), Some("b"));
        assert_eq!(worst[1].category.as_deref(), Some("c"));
    }

    #[test]
    fn test_rfm_rankings_are_resorts_of_one_view() {
        let view = RfmView {
            scores: vec![
                RfmScore {
                    customer_id_prefix: "aaaaa".to_string(),
                    frequency: 1,
                    monetary: 50.0,
                    recency_days: 10,
                },
                RfmScore {
                    customer_id_prefix: "bbbbb".to_string(),
                    frequency: 4,
                    monetary: 20.0,
                    recency_days: 0,
                },
            ],
        };

        assert_eq!(view.top_by_recency(1)[0].customer_id_prefix, "bbbbb");
        assert_eq!(view.top_by_frequency(1)[0].customer_id_prefix, "bbbbb");
        assert_eq!(view.top_by_monetary(1)[0].customer_id_prefix, "aaaaa");
        // The view itself keeps its original order
        assert_eq!(view.scores[0].customer_id_prefix, "aaaaa");
    }

    #[test]
    fn test_region_top_truncates_and_ranks() {
        let view = RegionView {
            states: vec![
                StateCustomerCount {
                    state: Some("RJ".to_string()),
                    customer_count: 2,
                },
                StateCustomerCount {
                    state: Some("SP".to_string()),
                    customer_count: 7,
                },
            ],
        };

        let top = view.top(1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].state.as_deref(), Some("SP"));
        assert_eq!(view.total_customers(), 9);
    }
}

//! One-shot pipeline running every aggregator over a filtered table

use crate::{
    filter::{filter_by_range, DateRange},
    views::{CategoryRankingView, DailyOrdersView, RegionView, RfmView},
    CategoryRankingAggregator, DailyOrdersAggregator, RegionAggregator, RfmAggregator,
    ViewAggregator,
};
use orderlens_data::OrderTable;
use orderlens_common::Result;
use tracing::{info, instrument};

/// The four derived views of one pipeline run.
///
/// Views are fresh, independent values; nothing here aliases the source table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardViews {
    pub daily_orders: DailyOrdersView,
    pub category_ranking: CategoryRankingView,
    pub by_state: RegionView,
    pub rfm: RfmView,
}

/// Synchronous batch pipeline: range filter, then the four aggregators.
///
/// Each run is a pure function of (table, window); concurrent runs with
/// different windows need no coordination.
#[derive(Debug, Default)]
pub struct AnalyticsPipeline;

impl AnalyticsPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Run the pipeline over `table`, restricted to `window`. A `None` window
    /// defaults to the full span of the table's timestamps.
    ///
    /// The RFM reference date is the maximum purchase timestamp of the
    /// *unfiltered* table, fixed before filtering (narrowing the window must
    /// not move the recency yardstick).
    #[instrument(skip(self, table))]
    pub fn run(&self, table: &OrderTable, window: Option<DateRange>) -> Result<DashboardViews> {
        let reference_date = table.max_purchase_timestamp();

        let window = match window.or_else(|| DateRange::full_span(table)) {
            Some(window) => window,
            // Empty source table: every view is empty
            None => return Ok(DashboardViews::default()),
        };

        let filtered = filter_by_range(table, &window);

        let daily_orders = DailyOrdersAggregator::new().aggregate(&filtered)?;
        let category_ranking = CategoryRankingAggregator::new().aggregate(&filtered)?;
        let by_state = RegionAggregator::new().aggregate(&filtered)?;

        let rfm = match reference_date {
            Some(reference_date) => RfmAggregator::new(reference_date).aggregate(&filtered)?,
            None => RfmView::default(),
        };

        info!(
            "Pipeline run complete: {} days, {} categories, {} states, {} customers",
            daily_orders.points.len(),
            category_ranking.ranking.len(),
            by_state.states.len(),
            rfm.len()
        );

        Ok(DashboardViews {
            daily_orders,
            category_ranking,
            by_state,
            rfm,
        })
    }
}

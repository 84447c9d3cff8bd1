//! Aggregation pipeline for orderlens
//!
//! Pure batch transformations from an order-line table into the four derived
//! views the dashboard renders: daily orders, category ranking, customers by
//! state, and per-customer RFM segmentation.

pub mod aggregator;
pub mod filter;
pub mod pipeline;
pub mod views;

pub use aggregator::{
    CategoryRankingAggregator, DailyOrdersAggregator, RegionAggregator, RfmAggregator,
    ViewAggregator,
};
pub use filter::{filter_by_range, DateRange};
pub use pipeline::{AnalyticsPipeline, DashboardViews};
pub use views::{
    CategoryCount, CategoryRankingView, DailyOrdersPoint, DailyOrdersView, RegionView, RfmScore,
    RfmView, StateCustomerCount,
};

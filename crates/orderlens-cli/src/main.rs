//! orderlens - e-commerce order analytics, printed as a dashboard summary

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use orderlens_analytics::{AnalyticsPipeline, DashboardViews, DateRange};
use orderlens_common::{init_logging, LoggingConfig};
use orderlens_config::{Config, ConfigLoader};
use orderlens_data::load_csv;
use orderlens_format::format_currency;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Order-line CSV path (overrides the configured one)
    #[arg(short, long)]
    data: Option<String>,

    /// Window start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Window end date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        level: args.log_level.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    if let Some(data) = args.data {
        config.data.csv_path = data;
    }
    if args.start_date.is_some() {
        config.window.start_date = args.start_date;
    }
    if args.end_date.is_some() {
        config.window.end_date = args.end_date;
    }

    info!("Loading order lines from {}", config.data.csv_path);
    let table = load_csv(&config.data.csv_path)?;

    let window = build_window(&config, &table);
    let views = AnalyticsPipeline::new().run(&table, window)?;

    print_summary(&config, &views)?;
    Ok(())
}

/// Resolve the configured window, filling unset bounds from the dataset span
fn build_window(config: &Config, table: &orderlens_data::OrderTable) -> Option<DateRange> {
    let full = DateRange::full_span(table)?;
    let start = config.window.start_date.unwrap_or(full.start);
    let end = config.window.end_date.unwrap_or(full.end);
    Some(DateRange::new(start, end))
}

fn print_summary(config: &Config, views: &DashboardViews) -> Result<()> {
    let display = &config.display;
    let currency = |amount: f64| format_currency(amount, &display.currency, &display.locale);

    println!("Daily Orders");
    println!("  total orders:  {}", views.daily_orders.total_orders());
    println!(
        "  total revenue: {}",
        currency(views.daily_orders.total_revenue())?
    );

    println!("\nBest Performing Categories");
    for entry in views.category_ranking.best(display.top_categories) {
        println!(
            "  {:<40} {:>6}",
            entry.category.as_deref().unwrap_or("(uncategorized)"),
            entry.line_items
        );
    }

    println!("\nWorst Performing Categories");
    for entry in views.category_ranking.worst(display.top_categories) {
        println!(
            "  {:<40} {:>6}",
            entry.category.as_deref().unwrap_or("(uncategorized)"),
            entry.line_items
        );
    }

    println!("\nCustomers by State");
    for entry in views.by_state.top(display.top_states) {
        println!(
            "  {:<6} {:>8}",
            entry.state.as_deref().unwrap_or("(none)"),
            entry.customer_count
        );
    }

    println!("\nBest Customers (RFM)");
    if views.rfm.is_empty() {
        println!("  no customers in window");
        return Ok(());
    }

    println!("  avg recency (days): {:.1}", views.rfm.mean_recency());
    println!("  avg frequency:      {:.2}", views.rfm.mean_frequency());
    println!(
        "  avg monetary:       {}",
        currency(views.rfm.mean_monetary())?
    );

    println!("  by recency:");
    for score in views.rfm.top_by_recency(display.top_customers) {
        println!("    {:<8} {:>5}d", score.customer_id_prefix, score.recency_days);
    }
    println!("  by frequency:");
    for score in views.rfm.top_by_frequency(display.top_customers) {
        println!("    {:<8} {:>5}", score.customer_id_prefix, score.frequency);
    }
    println!("  by monetary:");
    for score in views.rfm.top_by_monetary(display.top_customers) {
        println!(
            "    {:<8} {:>12}",
            score.customer_id_prefix,
            currency(score.monetary)?
        );
    }

    Ok(())
}

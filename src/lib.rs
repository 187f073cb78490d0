// Sales Analytics - Core Library
// Exposes all modules for use in the CLI and tests

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod grouping;
pub mod logging;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod reader;
pub mod transaction;
pub mod validation;

// Re-export commonly used types
pub use analytics::{
    calculate_total_revenue, customer_analysis, daily_sales_trend, find_peak_sales_day,
    low_performing_products, region_wise_sales, top_selling_products,
    CustomerSummary, DailySales, PeakDay, ProductSales, RegionSales, SalesReport,
};
pub use catalog::{
    create_product_mapping, fetch_all_products,
    ApiProduct, HttpCatalog, ProductCatalog, ProductInfo, ProductMapping, StaticCatalog,
};
pub use config::AppConfig;
pub use enrichment::{enrich_sales_data, numeric_product_id, EnrichmentStats};
pub use error::SalesError;
pub use output::save_enriched_data;
pub use parser::{parse_transactions, SalesParser};
pub use pipeline::{run_pipeline, FilterMode, PipelineOutcome, RunSummary};
pub use reader::{read_sales_data, TextEncoding};
pub use transaction::{EnrichedTransaction, Transaction};
pub use validation::{
    check_transaction, filter_options, validate_and_filter,
    FilterCriteria, FilterOptionsSummary, ValidationSummary, Violation,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

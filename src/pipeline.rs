// 🚀 Pipeline orchestration
//
// read → parse → validate/filter → analyse → fetch catalog → enrich → save
// Each step narrates progress on stdout; diagnostics go through tracing.

use crate::analytics::SalesReport;
use crate::catalog::{create_product_mapping, fetch_all_products, ProductCatalog};
use crate::config::AppConfig;
use crate::enrichment::{enrich_sales_data, EnrichmentStats};
use crate::output::save_enriched_data;
use crate::parser::parse_transactions;
use crate::prompt::{prompt_filters, show_filter_options};
use crate::reader::read_sales_data;
use crate::transaction::{EnrichedTransaction, Transaction};
use crate::validation::{filter_options, validate_and_filter, FilterCriteria, ValidationSummary};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tracing::info;

const TOTAL_STEPS: usize = 9;

/// How business filters are chosen for a run
#[derive(Debug, Clone, PartialEq)]
pub enum FilterMode {
    /// Ask on stdin
    Interactive,
    /// Use these criteria without asking
    Fixed(FilterCriteria),
}

/// Serializable record of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub lines_read: usize,
    pub parsed: usize,
    pub filters: FilterCriteria,
    pub validation: ValidationSummary,
    pub enrichment: EnrichmentStats,
    pub rows_written: usize,
    pub report: SalesReport,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub summary: RunSummary,
    pub kept: Vec<Transaction>,
    pub enriched: Vec<EnrichedTransaction>,
}

fn step(n: usize, message: &str) {
    println!("\n[{}/{}] {}", n, TOTAL_STEPS, message);
}

pub fn print_banner() {
    println!("{}", "=".repeat(40));
    println!("      SALES ANALYTICS SYSTEM");
    println!("{}", "=".repeat(40));
}

/// Run the full pipeline once
pub fn run_pipeline(
    config: &AppConfig,
    mode: FilterMode,
    catalog: &dyn ProductCatalog,
) -> Result<PipelineOutcome> {
    // 1. Read
    step(1, "Reading sales data...");
    let raw_lines = read_sales_data(&config.input_path)
        .with_context(|| format!("Failed to read {}", config.input_path.display()))?;
    println!("✓ Successfully read {} transactions", raw_lines.len());

    // 2. Parse
    step(2, "Parsing and cleaning data...");
    let transactions = parse_transactions(&raw_lines);
    println!("✓ Parsed {} records", transactions.len());

    // 3. Filter options
    step(3, "Filter Options Available:");
    let options = filter_options(&transactions);
    let criteria = match mode {
        FilterMode::Interactive => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            prompt_filters(&mut input, &mut output, &options)
                .context("Failed to read filter choices")?
        }
        FilterMode::Fixed(criteria) => {
            show_filter_options(&mut io::stdout(), &options)?;
            if criteria.is_active() {
                println!("Using filters: {:?}", criteria);
            }
            criteria
        }
    };

    // 4. Validate
    step(4, "Validating transactions...");
    let (kept, invalid, validation) = validate_and_filter(&transactions, &criteria);
    println!("✓ Valid: {} | Invalid: {}", kept.len(), invalid);
    info!(summary = %validation.summary(), "validation complete");

    // 5. Analyse
    step(5, "Analyzing sales data...");
    let report = SalesReport::build(&kept, config.top_n, config.low_stock_threshold);
    println!("✓ Analysis complete");
    info!(summary = %report.summary(), "analysis complete");

    // 6. Catalog
    step(6, "Fetching product data from API...");
    let products = fetch_all_products(catalog);
    println!("✓ Fetched {} products", products.len());

    // 7. Enrich
    step(7, "Enriching sales data...");
    let mapping = create_product_mapping(&products);
    let enriched = enrich_sales_data(&kept, &mapping);
    let enrichment = EnrichmentStats::from_enriched(&enriched);
    println!("✓ {}", enrichment.summary());

    // 8. Save
    step(8, "Saving enriched data...");
    let rows_written = save_enriched_data(&enriched, &config.output_path)
        .with_context(|| format!("Failed to save {}", config.output_path.display()))?;

    // 9. Done
    step(9, "Process Complete!");
    println!("{}", "=".repeat(40));

    let summary = RunSummary {
        generated_at: Utc::now(),
        input_path: config.input_path.clone(),
        output_path: config.output_path.clone(),
        lines_read: raw_lines.len(),
        parsed: transactions.len(),
        filters: criteria,
        validation,
        enrichment,
        rows_written,
        report,
    };

    Ok(PipelineOutcome {
        summary,
        kept,
        enriched,
    })
}

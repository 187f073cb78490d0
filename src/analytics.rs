// 📊 Sales analytics
//
// Seven independent, read-only reports over the validated transaction set.
// All of them accept an empty slice and return zero / empty results.
//
// Rounding: `round2` (half away from zero) for percentages and average order
// values. Other totals are left unrounded.

use crate::grouping::{group_fold, round2};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_LOW_THRESHOLD: i64 = 10;

// ============================================================================
// REPORT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSales {
    pub region: String,
    pub total_sales: f64,
    pub transaction_count: usize,
    /// Share of total revenue in percent, 2 decimals; 0.0 when total revenue is zero
    pub percentage: f64,
}

/// Per-product totals, used by both the top and the low performer reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_name: String,
    /// Widened so summing many large quantities cannot overflow
    pub quantity: i128,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_id: String,
    pub total_spent: f64,
    pub purchase_count: usize,
    pub avg_order_value: f64,
    /// Distinct product names. Iteration order is unspecified.
    pub products_bought: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: String,
    pub revenue: f64,
    pub transaction_count: usize,
    pub unique_customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakDay {
    pub date: String,
    pub revenue: f64,
    pub transaction_count: usize,
}

// ============================================================================
// AGGREGATORS
// ============================================================================

/// Sum of line amounts
pub fn calculate_total_revenue(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::line_amount).sum()
}

/// Sales per region, ordered by total sales descending (ties: first seen)
pub fn region_wise_sales(transactions: &[Transaction]) -> Vec<RegionSales> {
    let total_revenue = calculate_total_revenue(transactions);

    let mut regions: Vec<RegionSales> = group_fold(
        transactions,
        |t| t.region.clone(),
        || (0.0_f64, 0usize),
        |(sales, count), t| {
            *sales += t.line_amount();
            *count += 1;
        },
    )
    .into_iter()
    .map(|(region, (total_sales, transaction_count))| RegionSales {
        region,
        total_sales,
        transaction_count,
        percentage: if total_revenue == 0.0 {
            0.0
        } else {
            round2(total_sales / total_revenue * 100.0)
        },
    })
    .collect();

    regions.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    regions
}

fn product_totals(transactions: &[Transaction]) -> Vec<ProductSales> {
    group_fold(
        transactions,
        |t| t.product_name.clone(),
        || (0i128, 0.0_f64),
        |(quantity, revenue), t| {
            *quantity += i128::from(t.quantity);
            *revenue += t.line_amount();
        },
    )
    .into_iter()
    .map(|(product_name, (quantity, revenue))| ProductSales {
        product_name,
        quantity,
        revenue,
    })
    .collect()
}

/// Top `n` products by quantity sold, descending (ties: first seen)
pub fn top_selling_products(transactions: &[Transaction], n: usize) -> Vec<ProductSales> {
    let mut products = product_totals(transactions);
    products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    products.truncate(n);
    products
}

/// Per-customer spend, ordered by total spent descending (ties: first seen)
pub fn customer_analysis(transactions: &[Transaction]) -> Vec<CustomerSummary> {
    let mut customers: Vec<CustomerSummary> = group_fold(
        transactions,
        |t| t.customer_id.clone(),
        || (0.0_f64, 0usize, HashSet::new()),
        |(spent, count, products), t| {
            *spent += t.line_amount();
            *count += 1;
            products.insert(t.product_name.clone());
        },
    )
    .into_iter()
    .map(|(customer_id, (total_spent, purchase_count, products_bought))| CustomerSummary {
        customer_id,
        total_spent,
        purchase_count,
        // Groups always hold at least one purchase
        avg_order_value: round2(total_spent / purchase_count as f64),
        products_bought,
    })
    .collect();

    customers.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    customers
}

/// Revenue per date token, ascending lexical date order
pub fn daily_sales_trend(transactions: &[Transaction]) -> Vec<DailySales> {
    let mut days: Vec<DailySales> = group_fold(
        transactions,
        |t| t.date.clone(),
        || (0.0_f64, 0usize, HashSet::new()),
        |(revenue, count, customers), t| {
            *revenue += t.line_amount();
            *count += 1;
            customers.insert(t.customer_id.clone());
        },
    )
    .into_iter()
    .map(|(date, (revenue, transaction_count, customers))| DailySales {
        date,
        revenue,
        transaction_count,
        unique_customers: customers.len(),
    })
    .collect();

    days.sort_by(|a, b| a.date.cmp(&b.date));
    days
}

/// Date with the highest revenue; the earliest date wins a tie
pub fn find_peak_sales_day(transactions: &[Transaction]) -> Option<PeakDay> {
    let daily = daily_sales_trend(transactions);
    let mut peak: Option<&DailySales> = None;

    for day in &daily {
        match peak {
            Some(best) if day.revenue <= best.revenue => {}
            _ => peak = Some(day),
        }
    }

    peak.map(|day| PeakDay {
        date: day.date.clone(),
        revenue: day.revenue,
        transaction_count: day.transaction_count,
    })
}

/// Products with total quantity strictly below `threshold`, ascending quantity
pub fn low_performing_products(transactions: &[Transaction], threshold: i64) -> Vec<ProductSales> {
    let mut low: Vec<ProductSales> = product_totals(transactions)
        .into_iter()
        .filter(|p| p.quantity < i128::from(threshold))
        .collect();

    low.sort_by(|a, b| a.quantity.cmp(&b.quantity));
    low
}

// ============================================================================
// BUNDLED REPORT
// ============================================================================

/// Every analysis over one transaction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub total_revenue: f64,
    pub region_sales: Vec<RegionSales>,
    pub top_products: Vec<ProductSales>,
    pub customers: Vec<CustomerSummary>,
    pub daily_trend: Vec<DailySales>,
    pub peak_day: Option<PeakDay>,
    pub low_performers: Vec<ProductSales>,
}

impl SalesReport {
    pub fn build(transactions: &[Transaction], top_n: usize, low_threshold: i64) -> Self {
        SalesReport {
            total_revenue: calculate_total_revenue(transactions),
            region_sales: region_wise_sales(transactions),
            top_products: top_selling_products(transactions, top_n),
            customers: customer_analysis(transactions),
            daily_trend: daily_sales_trend(transactions),
            peak_day: find_peak_sales_day(transactions),
            low_performers: low_performing_products(transactions, low_threshold),
        }
    }

    pub fn summary(&self) -> String {
        let peak = match &self.peak_day {
            Some(p) => format!("{} ({:.2})", p.date, p.revenue),
            None => "n/a".to_string(),
        };

        format!(
            "Revenue: {:.2} | {} regions | {} customers | {} days | peak: {} | {} low performers",
            self.total_revenue,
            self.region_sales.len(),
            self.customers.len(),
            self.daily_trend.len(),
            peak,
            self.low_performers.len()
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

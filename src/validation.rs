// ✅ Validation & filtering
//
// Stage 1: structural rules. A record failing any rule is counted and dropped.
// Stage 2: optional business filters (region, amount range) on valid records.

use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

// ============================================================================
// STRUCTURAL RULES
// ============================================================================

/// A failed structural rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(rule: &str, field: &str, message: String) -> Self {
        Violation {
            rule: rule.to_string(),
            field: field.to_string(),
            message,
        }
    }
}

/// Check every structural rule; empty result = valid
pub fn check_transaction(tx: &Transaction) -> Vec<Violation> {
    let mut violations = Vec::new();

    if tx.quantity <= 0 {
        violations.push(Violation::new(
            "quantity_positive",
            "Quantity",
            format!("Quantity must be positive: {}", tx.quantity),
        ));
    }

    // NaN fails here too
    if !(tx.unit_price > 0.0) {
        violations.push(Violation::new(
            "unit_price_positive",
            "UnitPrice",
            format!("Unit price must be positive: {}", tx.unit_price),
        ));
    }

    if !tx.transaction_id.starts_with('T') {
        violations.push(Violation::new(
            "transaction_id_prefix",
            "TransactionID",
            format!("Transaction ID must start with 'T': {}", tx.transaction_id),
        ));
    }

    if !tx.product_id.starts_with('P') {
        violations.push(Violation::new(
            "product_id_prefix",
            "ProductID",
            format!("Product ID must start with 'P': {}", tx.product_id),
        ));
    }

    if !tx.customer_id.starts_with('C') {
        violations.push(Violation::new(
            "customer_id_prefix",
            "CustomerID",
            format!("Customer ID must start with 'C': {}", tx.customer_id),
        ));
    }

    if tx.region.is_empty() {
        violations.push(Violation::new(
            "region_present",
            "Region",
            "Region is empty".to_string(),
        ));
    }

    violations
}

pub fn is_structurally_valid(tx: &Transaction) -> bool {
    check_transaction(tx).is_empty()
}

// ============================================================================
// BUSINESS FILTERS
// ============================================================================

/// Optional business filters.
///
/// An empty region or a zero amount counts as "not supplied", so a minimum
/// of exactly 0 cannot be expressed as an active filter. `new` normalizes
/// those values to `None`, and the `active_*` accessors apply the same rule
/// to values set directly on the fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub region: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl FilterCriteria {
    pub fn new(region: Option<String>, min_amount: Option<f64>, max_amount: Option<f64>) -> Self {
        FilterCriteria {
            region: region.filter(|r| !r.is_empty()),
            min_amount: min_amount.filter(|v| *v != 0.0),
            max_amount: max_amount.filter(|v| *v != 0.0),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn active_region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    pub fn active_min_amount(&self) -> Option<f64> {
        self.min_amount.filter(|v| *v != 0.0)
    }

    pub fn active_max_amount(&self) -> Option<f64> {
        self.max_amount.filter(|v| *v != 0.0)
    }

    pub fn is_active(&self) -> bool {
        self.active_region().is_some()
            || self.active_min_amount().is_some()
            || self.active_max_amount().is_some()
    }

    /// Does a structurally valid record pass every active filter?
    pub fn matches(&self, tx: &Transaction) -> bool {
        let amount = tx.line_amount();

        if let Some(region) = self.active_region() {
            if tx.region != region {
                return false;
            }
        }

        if let Some(min) = self.active_min_amount() {
            if amount < min {
                return false;
            }
        }

        if let Some(max) = self.active_max_amount() {
            if amount > max {
                return false;
            }
        }

        true
    }
}

// ============================================================================
// VALIDATE AND FILTER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Length of the sequence handed to `validate_and_filter`
    pub total_input: usize,
    pub invalid: usize,
    pub final_count: usize,
}

impl ValidationSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} input | {} invalid | {} kept",
            self.total_input, self.invalid, self.final_count
        )
    }
}

/// Drop structurally invalid records, then apply the business filters.
///
/// # Returns
/// `(kept, invalid_count, summary)`; `kept` preserves input order.
pub fn validate_and_filter(
    transactions: &[Transaction],
    criteria: &FilterCriteria,
) -> (Vec<Transaction>, usize, ValidationSummary) {
    let mut valid = Vec::with_capacity(transactions.len());
    let mut invalid = 0;

    for tx in transactions {
        let violations = check_transaction(tx);
        if violations.is_empty() {
            valid.push(tx);
        } else {
            invalid += 1;
            debug!(
                transaction_id = %tx.transaction_id,
                rules = ?violations.iter().map(|v| v.rule.as_str()).collect::<Vec<_>>(),
                "invalid transaction"
            );
        }
    }

    let kept: Vec<Transaction> = valid
        .into_iter()
        .filter(|tx| criteria.matches(tx))
        .cloned()
        .collect();

    let summary = ValidationSummary {
        total_input: transactions.len(),
        invalid,
        final_count: kept.len(),
    };

    (kept, invalid, summary)
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

/// What a user can filter on: distinct regions and the line amount range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptionsSummary {
    /// Sorted, distinct
    pub regions: Vec<String>,
    /// (min, max) line amount; None when there are no valid records
    pub amount_range: Option<(f64, f64)>,
}

/// Describe the filter options over the structurally valid records
pub fn filter_options(transactions: &[Transaction]) -> FilterOptionsSummary {
    let valid: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| is_structurally_valid(tx))
        .collect();

    let regions: BTreeSet<&str> = valid.iter().map(|tx| tx.region.as_str()).collect();

    let amount_range = valid.iter().map(|tx| tx.line_amount()).fold(None, |acc, amount| {
        match acc {
            None => Some((amount, amount)),
            Some((lo, hi)) => Some((f64::min(lo, amount), f64::max(hi, amount))),
        }
    });

    FilterOptionsSummary {
        regions: regions.into_iter().map(str::to_string).collect(),
        amount_range,
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 🔗 Enrichment - join transactions against the product catalog
// One output record per input record, order preserved, never filters.

use crate::catalog::ProductMapping;
use crate::transaction::{EnrichedTransaction, Transaction};
use serde::{Deserialize, Serialize};

/// Numeric lookup key embedded in a product id ("P042" → 42).
/// None when there are no digits or the number does not fit.
pub fn numeric_product_id(product_id: &str) -> Option<i64> {
    let digits: String = product_id.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

pub fn enrich_transaction(tx: &Transaction, mapping: &ProductMapping) -> EnrichedTransaction {
    let info = numeric_product_id(&tx.product_id).and_then(|id| mapping.get(id));

    match info {
        Some(info) => EnrichedTransaction {
            transaction: tx.clone(),
            api_category: info.category.clone(),
            api_brand: info.brand.clone(),
            api_rating: info.rating,
            api_match: true,
        },
        None => EnrichedTransaction::unmatched(tx.clone()),
    }
}

pub fn enrich_sales_data(
    transactions: &[Transaction],
    mapping: &ProductMapping,
) -> Vec<EnrichedTransaction> {
    transactions
        .iter()
        .map(|tx| enrich_transaction(tx, mapping))
        .collect()
}

/// How many records found a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentStats {
    pub matched: usize,
    pub total: usize,
}

impl EnrichmentStats {
    pub fn from_enriched(enriched: &[EnrichedTransaction]) -> Self {
        EnrichmentStats {
            matched: enriched.iter().filter(|e| e.api_match).count(),
            total: enriched.len(),
        }
    }

    /// Percentage of matched records; 0 for an empty set
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64 * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Enriched {}/{} transactions ({:.1}%)",
            self.matched,
            self.total,
            self.success_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductInfo;

    fn tx(id: &str, product_id: &str) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            date: "2024-01-01".to_string(),
            product_id: product_id.to_string(),
            product_name: "Widget".to_string(),
            quantity: 1,
            unit_price: 10.0,
            customer_id: "C1".to_string(),
            region: "North".to_string(),
        }
    }

    fn create_mapping() -> ProductMapping {
        vec![(
            42,
            ProductInfo {
                category: Some("A".to_string()),
                brand: Some("B".to_string()),
                rating: Some(4.5),
            },
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_numeric_product_id() {
        assert_eq!(numeric_product_id("P042"), Some(42));
        assert_eq!(numeric_product_id("P1-0-1"), Some(101));
        assert_eq!(numeric_product_id("PXYZ"), None);
        assert_eq!(numeric_product_id(""), None);
        assert_eq!(numeric_product_id("P99999999999999999999999"), None);
    }

    #[test]
    fn test_match_populates_catalog_fields() {
        let enriched = enrich_transaction(&tx("T1", "P042"), &create_mapping());

        assert!(enriched.api_match);
        assert_eq!(enriched.api_category.as_deref(), Some("A"));
        assert_eq!(enriched.api_brand.as_deref(), Some("B"));
        assert_eq!(enriched.api_rating, Some(4.5));
        assert_eq!(enriched.transaction.product_id, "P042");
    }

    #[test]
    fn test_unmatched_records_kept() {
        let input = vec![tx("T1", "P042"), tx("T2", "P043"), tx("T3", "PABC")];
        let enriched = enrich_sales_data(&input, &create_mapping());

        assert_eq!(enriched.len(), 3);
        let ids: Vec<&str> = enriched.iter().map(|e| e.transaction.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2", "T3"]);
        assert!(enriched[0].api_match);
        assert!(!enriched[1].api_match);
        assert!(enriched[1].api_category.is_none());
        assert!(!enriched[2].api_match);
    }

    #[test]
    fn test_empty_mapping_matches_nothing() {
        let input = vec![tx("T1", "P042")];
        let enriched = enrich_sales_data(&input, &ProductMapping::new());
        assert!(enriched.iter().all(|e| !e.api_match));
    }

    #[test]
    fn test_enrichment_stats() {
        let input = vec![tx("T1", "P042"), tx("T2", "P043"), tx("T3", "P042"), tx("T4", "P1")];
        let stats = EnrichmentStats::from_enriched(&enrich_sales_data(&input, &create_mapping()));

        assert_eq!(stats.matched, 2);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.success_rate(), 50.0);
        assert_eq!(stats.summary(), "Enriched 2/4 transactions (50.0%)");

        assert_eq!(EnrichmentStats::from_enriched(&[]).success_rate(), 0.0);
    }
}

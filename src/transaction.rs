// 🧾 Transaction model
// Records are created by the parser and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// One sales event as read from the pipe-delimited log.
///
/// Field names serialize with the column names of the input file so JSON
/// output and the persisted file speak the same vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,

    /// Opaque, lexically sortable date token (not parsed as a calendar date)
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "ProductID")]
    pub product_id: String,

    /// Commas are stripped by the parser
    #[serde(rename = "ProductName")]
    pub product_name: String,

    #[serde(rename = "Quantity")]
    pub quantity: i64,

    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,

    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    #[serde(rename = "Region")]
    pub region: String,
}

impl Transaction {
    /// Quantity × unit price. Computed on demand, never stored.
    pub fn line_amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// A validated transaction joined against the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    #[serde(rename = "API_Category")]
    pub api_category: Option<String>,

    #[serde(rename = "API_Brand")]
    pub api_brand: Option<String>,

    #[serde(rename = "API_Rating")]
    pub api_rating: Option<f64>,

    /// True iff the catalog lookup succeeded
    #[serde(rename = "API_Match")]
    pub api_match: bool,
}

impl EnrichedTransaction {
    /// Column names of the persisted record, in field order
    pub const HEADERS: [&'static str; 12] = [
        "TransactionID",
        "Date",
        "ProductID",
        "ProductName",
        "Quantity",
        "UnitPrice",
        "CustomerID",
        "Region",
        "API_Category",
        "API_Brand",
        "API_Rating",
        "API_Match",
    ];

    /// Unmatched record: all catalog fields absent
    pub fn unmatched(transaction: Transaction) -> Self {
        EnrichedTransaction {
            transaction,
            api_category: None,
            api_brand: None,
            api_rating: None,
            api_match: false,
        }
    }

    /// Values in `HEADERS` order; absent values render as empty strings
    pub fn to_row(&self) -> Vec<String> {
        let t = &self.transaction;
        vec![
            t.transaction_id.clone(),
            t.date.clone(),
            t.product_id.clone(),
            t.product_name.clone(),
            t.quantity.to_string(),
            format!("{:?}", t.unit_price),
            t.customer_id.clone(),
            t.region.clone(),
            self.api_category.clone().unwrap_or_default(),
            self.api_brand.clone().unwrap_or_default(),
            self.api_rating.map(|r| format!("{:?}", r)).unwrap_or_default(),
            match_flag(self.api_match).to_string(),
        ]
    }
}

/// `API_Match` column value, capitalised like the files downstream readers expect
fn match_flag(matched: bool) -> &'static str {
    if matched {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_transaction() -> Transaction {
        Transaction {
            transaction_id: "T001".to_string(),
            date: "2024-12-01".to_string(),
            product_id: "P101".to_string(),
            product_name: "Laptop".to_string(),
            quantity: 2,
            unit_price: 45000.0,
            customer_id: "C001".to_string(),
            region: "North".to_string(),
        }
    }

    #[test]
    fn test_line_amount() {
        let tx = create_transaction();
        assert_eq!(tx.line_amount(), 90000.0);
    }

    #[test]
    fn test_unmatched_row_renders_empty_catalog_fields() {
        let enriched = EnrichedTransaction::unmatched(create_transaction());
        let row = enriched.to_row();

        assert_eq!(row.len(), EnrichedTransaction::HEADERS.len());
        assert_eq!(row[5], "45000.0");
        assert_eq!(row[8], "");
        assert_eq!(row[9], "");
        assert_eq!(row[10], "");
        assert_eq!(row[11], "False");
    }

    #[test]
    fn test_serializes_with_column_names() {
        let enriched = EnrichedTransaction {
            api_category: Some("laptops".to_string()),
            api_brand: Some("Apple".to_string()),
            api_rating: Some(4.5),
            api_match: true,
            ..EnrichedTransaction::unmatched(create_transaction())
        };

        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["TransactionID"], "T001");
        assert_eq!(json["API_Category"], "laptops");
        assert_eq!(json["API_Match"], true);
    }
}

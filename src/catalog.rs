// 🌐 Product catalog client
//
// A single blocking GET with a bounded timeout. Any failure degrades to an
// empty product list, which leaves every transaction unmatched.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products?limit=100";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// WIRE TYPES
// ============================================================================

/// Product descriptor as returned by the catalog service.
/// Unknown fields are ignored; missing ones deserialize to None.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiProduct {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Catalog returns `{ "products": [...], "total": .., ... }`
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    products: Vec<ApiProduct>,
}

// ============================================================================
// CATALOG SOURCES
// ============================================================================

/// Where product descriptors come from
pub trait ProductCatalog {
    fn fetch_products(&self) -> Result<Vec<ApiProduct>>;

    /// Human-readable source, for logs
    fn source(&self) -> String;
}

/// Remote catalog over HTTP
pub struct HttpCatalog {
    url: String,
    timeout: Duration,
}

impl HttpCatalog {
    pub fn new(url: &str, timeout: Duration) -> Self {
        HttpCatalog {
            url: url.to_string(),
            timeout,
        }
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl ProductCatalog for HttpCatalog {
    fn fetch_products(&self) -> Result<Vec<ApiProduct>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let body = client.get(&self.url).send()?.error_for_status()?.text()?;
        parse_catalog_response(&body)
    }

    fn source(&self) -> String {
        self.url.clone()
    }
}

/// In-memory catalog (offline runs and tests)
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<ApiProduct>,
}

impl StaticCatalog {
    pub fn new(products: Vec<ApiProduct>) -> Self {
        StaticCatalog { products }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ProductCatalog for StaticCatalog {
    fn fetch_products(&self) -> Result<Vec<ApiProduct>> {
        Ok(self.products.clone())
    }

    fn source(&self) -> String {
        format!("static ({} products)", self.products.len())
    }
}

/// Decode a catalog response body
pub fn parse_catalog_response(body: &str) -> Result<Vec<ApiProduct>> {
    let response: CatalogResponse = serde_json::from_str(body)?;
    Ok(response.products)
}

/// Fetch all products, never failing: errors are reported and yield an empty list
pub fn fetch_all_products(catalog: &dyn ProductCatalog) -> Vec<ApiProduct> {
    match catalog.fetch_products() {
        Ok(products) => {
            info!(source = %catalog.source(), count = products.len(), "fetched catalog");
            products
        }
        Err(e) => {
            warn!(source = %catalog.source(), error = %e, "catalog fetch failed");
            println!("✗ API fetch failed: {}", e);
            Vec::new()
        }
    }
}

// ============================================================================
// PRODUCT MAPPING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<f64>,
}

/// Numeric product id → catalog metadata. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductMapping {
    entries: HashMap<i64, ProductInfo>,
}

impl ProductMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptors without an id are skipped; later duplicates win
    pub fn from_products(products: &[ApiProduct]) -> Self {
        let entries = products
            .iter()
            .filter_map(|p| {
                p.id.map(|id| {
                    (
                        id,
                        ProductInfo {
                            category: p.category.clone(),
                            brand: p.brand.clone(),
                            rating: p.rating,
                        },
                    )
                })
            })
            .collect();

        ProductMapping { entries }
    }

    pub fn get(&self, id: i64) -> Option<&ProductInfo> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(i64, ProductInfo)> for ProductMapping {
    fn from_iter<I: IntoIterator<Item = (i64, ProductInfo)>>(iter: I) -> Self {
        ProductMapping {
            entries: iter.into_iter().collect(),
        }
    }
}

pub fn create_product_mapping(products: &[ApiProduct]) -> ProductMapping {
    ProductMapping::from_products(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesError;

    struct FailingCatalog;

    impl ProductCatalog for FailingCatalog {
        fn fetch_products(&self) -> Result<Vec<ApiProduct>> {
            Err(SalesError::Config("unreachable catalog".to_string()))
        }

        fn source(&self) -> String {
            "failing".to_string()
        }
    }

    const SAMPLE_BODY: &str = r#"{
        "products": [
            {"id": 1, "title": "Essence Mascara", "category": "beauty", "brand": "Essence", "rating": 4.94, "price": 9.99},
            {"id": 2, "title": "Eyeshadow Palette", "category": "beauty", "rating": 3.28},
            {"title": "No id"}
        ],
        "total": 194,
        "skip": 0,
        "limit": 100
    }"#;

    #[test]
    fn test_parse_catalog_response() {
        let products = parse_catalog_response(SAMPLE_BODY).unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, Some(1));
        assert_eq!(products[0].brand.as_deref(), Some("Essence"));
        assert_eq!(products[1].brand, None);
    }

    #[test]
    fn test_missing_products_key_is_empty() {
        assert!(parse_catalog_response("{}").unwrap().is_empty());
        assert!(parse_catalog_response("not json").is_err());
    }

    #[test]
    fn test_create_product_mapping() {
        let products = parse_catalog_response(SAMPLE_BODY).unwrap();
        let mapping = create_product_mapping(&products);

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(1).unwrap().category.as_deref(), Some("beauty"));
        assert_eq!(mapping.get(2).unwrap().brand, None);
        assert!(!mapping.contains(3));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let products = vec![
            ApiProduct { id: Some(7), title: None, category: Some("old".to_string()), brand: None, rating: None },
            ApiProduct { id: Some(7), title: None, category: Some("new".to_string()), brand: None, rating: None },
        ];
        let mapping = ProductMapping::from_products(&products);
        assert_eq!(mapping.get(7).unwrap().category.as_deref(), Some("new"));
    }

    #[test]
    fn test_fetch_failure_degrades_to_empty() {
        assert!(fetch_all_products(&FailingCatalog).is_empty());
    }

    #[test]
    fn test_static_catalog() {
        let products = parse_catalog_response(SAMPLE_BODY).unwrap();
        let catalog = StaticCatalog::new(products);
        assert_eq!(fetch_all_products(&catalog).len(), 3);
        assert!(fetch_all_products(&StaticCatalog::empty()).is_empty());
    }
}

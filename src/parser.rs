// 🏗️ Parser - raw pipe-delimited lines → Transaction records
//
// Malformed lines are skipped silently: wrong field count, or a quantity /
// unit price that does not parse. Output keeps input order, no dedup.

use crate::transaction::Transaction;
use tracing::debug;

/// Field delimiter of the sales log
pub const DELIMITER: char = '|';

/// TransactionID, Date, ProductID, ProductName, Quantity, UnitPrice, CustomerID, Region
pub const FIELD_COUNT: usize = 8;

/// SalesParser - turns cleaned text lines into transactions
#[derive(Debug, Clone, Default)]
pub struct SalesParser;

impl SalesParser {
    pub fn new() -> Self {
        SalesParser
    }

    /// Parser version (for log provenance)
    pub fn version(&self) -> &str {
        "1.0.0"
    }

    /// Parse a single line, or None if it has to be skipped
    pub fn parse_line(&self, line: &str) -> Option<Transaction> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return None;
        }

        // Commas inside numbers are thousands separators ("1,200")
        let quantity = numeric_text(fields[4]).parse::<i64>().ok()?;
        let unit_price = numeric_text(fields[5]).parse::<f64>().ok()?;

        Some(Transaction {
            transaction_id: fields[0].to_string(),
            date: fields[1].to_string(),
            product_id: fields[2].to_string(),
            product_name: strip_commas(fields[3]),
            quantity,
            unit_price,
            customer_id: fields[6].to_string(),
            region: fields[7].to_string(),
        })
    }

    /// Parse all lines, preserving order
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Transaction> {
        let transactions: Vec<Transaction> = lines
            .iter()
            .filter_map(|line| self.parse_line(line.as_ref()))
            .collect();

        debug!(
            parser_version = self.version(),
            lines = lines.len(),
            parsed = transactions.len(),
            skipped = lines.len() - transactions.len(),
            "parsed sales lines"
        );

        transactions
    }
}

fn strip_commas(s: &str) -> String {
    s.replace(',', "")
}

/// Numeric field ready for `parse`: commas dropped, trimmed, and `_` digit
/// separators ("1_000") removed. A `_` not between two digits is kept so the
/// parse fails.
fn numeric_text(raw: &str) -> String {
    let text = strip_commas(raw);
    let text = text.trim();
    let bytes = text.as_bytes();

    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).map_or(false, u8::is_ascii_digit))
    });

    if separators_ok {
        text.replace('_', "")
    } else {
        text.to_string()
    }
}

/// Convenience wrapper around `SalesParser::parse`
pub fn parse_transactions<S: AsRef<str>>(lines: &[S]) -> Vec<Transaction> {
    SalesParser::new().parse(lines)
}

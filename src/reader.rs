// 📂 Sales file reader
// Loads the raw log, trying a short list of text encodings in order.

use crate::error::{Result, SalesError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Header lines start with this literal and are dropped
pub const HEADER_PREFIX: &str = "TransactionID";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

/// Default candidates, tried in order
pub const DEFAULT_ENCODINGS: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

// Windows-1252 code points for 0x80..=0x9F; None = undefined byte
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

impl TextEncoding {
    pub fn name(&self) -> &str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "cp1252",
        }
    }

    /// Decode raw bytes, or None if they are not valid in this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            // Every byte is a valid Latin-1 code point
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Windows1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
                    _ => Some(b as char),
                })
                .collect(),
        }
    }
}

/// Trim lines and drop blanks and the header line
pub fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(HEADER_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Read and clean the log using explicit encoding candidates.
///
/// # Returns
/// * `Err(SalesError::FileNotFound)` - path does not exist
/// * `Err(SalesError::UnsupportedEncoding)` - no candidate decoded the bytes
pub fn read_sales_data_with(path: &Path, encodings: &[TextEncoding]) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SalesError::FileNotFound(path.to_path_buf()),
        _ => SalesError::Io(e),
    })?;

    for encoding in encodings {
        match encoding.decode(&bytes) {
            Some(text) => {
                debug!(encoding = encoding.name(), path = %path.display(), "decoded sales file");
                return Ok(clean_lines(&text));
            }
            None => debug!(encoding = encoding.name(), "decode failed, trying next encoding"),
        }
    }

    Err(SalesError::UnsupportedEncoding(path.to_path_buf()))
}

/// Read the sales log with the default encodings.
///
/// Missing files and undecodable files are not fatal: the message is printed
/// and an empty set of lines is returned so the pipeline can carry on.
pub fn read_sales_data(path: &Path) -> Result<Vec<String>> {
    match read_sales_data_with(path, &DEFAULT_ENCODINGS) {
        Ok(lines) => Ok(lines),
        Err(SalesError::FileNotFound(p)) => {
            warn!(path = %p.display(), "sales file not found");
            println!("Error: File '{}' not found.", p.display());
            Ok(Vec::new())
        }
        Err(SalesError::UnsupportedEncoding(p)) => {
            warn!(path = %p.display(), "no supported encoding");
            println!("Error: Unable to read file with supported encodings.");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_clean_lines_drops_header_and_blanks() {
        let text = "TransactionID|Date|ProductID\n\n  T001|2024-12-01|P101  \n   \nT002|2024-12-02|P102\n";
        let lines = clean_lines(text);

        assert_eq!(lines, vec!["T001|2024-12-01|P101", "T002|2024-12-02|P102"]);
    }

    #[test]
    fn test_read_utf8_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "TransactionID|Date").unwrap();
        writeln!(file, "T001|2024-12-01|P101|Café Latte|1|250|C001|North").unwrap();

        let lines = read_sales_data(file.path()).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Café"));
    }

    #[test]
    fn test_latin1_fallback() {
        let mut file = NamedTempFile::new().unwrap();
        // 0xE9 alone is invalid UTF-8 but 'é' in Latin-1
        file.write_all(b"T001|2024-12-01|P101|Caf\xE9|1|250|C001|North\n").unwrap();

        let lines = read_sales_data(file.path()).unwrap();
        assert_eq!(lines, vec!["T001|2024-12-01|P101|Café|1|250|C001|North"]);
    }

    #[test]
    fn test_cp1252_rejects_undefined_bytes() {
        assert_eq!(TextEncoding::Windows1252.decode(b"\x80"), Some("\u{20AC}".to_string()));
        assert_eq!(TextEncoding::Windows1252.decode(b"\x81"), None);
    }

    #[test]
    fn test_no_encoding_worked() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"T001|\xFF\xFE|x\n").unwrap();

        let result = read_sales_data_with(file.path(), &[TextEncoding::Utf8]);
        assert!(matches!(result, Err(SalesError::UnsupportedEncoding(_))));
    }

    #[test]
    fn test_missing_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        assert!(matches!(
            read_sales_data_with(&missing, &DEFAULT_ENCODINGS),
            Err(SalesError::FileNotFound(_))
        ));
        assert!(read_sales_data(&missing).unwrap().is_empty());
    }
}

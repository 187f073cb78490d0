// 💬 Interactive filter prompt
//
// Generic over the reader/writer so the dialogue can be driven from tests.

use crate::error::Result;
use crate::validation::{FilterCriteria, FilterOptionsSummary};
use std::io::{BufRead, Write};

/// Whole-unit amount with thousands separators ("45,000")
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Print the available filter options
pub fn show_filter_options<W: Write>(output: &mut W, options: &FilterOptionsSummary) -> Result<()> {
    writeln!(output, "Regions: {}", options.regions.join(", "))?;
    match options.amount_range {
        Some((min, max)) => writeln!(
            output,
            "Amount Range: ₹{} - ₹{}",
            format_amount(min),
            format_amount(max)
        )?,
        None => writeln!(output, "Amount Range: n/a (no valid transactions)")?,
    }
    Ok(())
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_amount<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<Option<f64>> {
    let answer = match ask(input, output, question)? {
        Some(a) if !a.is_empty() => a,
        _ => return Ok(None),
    };

    match answer.replace(',', "").parse::<f64>() {
        Ok(v) => Ok(Some(v)),
        Err(_) => {
            writeln!(output, "Invalid amount '{}', ignoring.", answer)?;
            Ok(None)
        }
    }
}

/// Ask whether to filter and collect region / amount bounds.
///
/// Blank answers and end of input skip the corresponding filter. Zero
/// amounts and an empty region are inactive (see `FilterCriteria::new`).
pub fn prompt_filters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    options: &FilterOptionsSummary,
) -> Result<FilterCriteria> {
    show_filter_options(output, options)?;

    let choice = ask(input, output, "Do you want to filter data? (y/n): ")?
        .unwrap_or_default()
        .to_lowercase();
    if choice != "y" {
        return Ok(FilterCriteria::none());
    }

    let region = ask(input, output, "Enter region (or press Enter to skip): ")?
        .filter(|r| !r.is_empty());
    let min_amount = ask_amount(input, output, "Enter minimum amount (or press Enter to skip): ")?;
    let max_amount = ask_amount(input, output, "Enter maximum amount (or press Enter to skip): ")?;

    Ok(FilterCriteria::new(region, min_amount, max_amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn create_options() -> FilterOptionsSummary {
        FilterOptionsSummary {
            regions: vec!["East".to_string(), "North".to_string()],
            amount_range: Some((250.0, 1234567.4)),
        }
    }

    fn run(answers: &str) -> (FilterCriteria, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let criteria = prompt_filters(&mut input, &mut output, &create_options()).unwrap();
        (criteria, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.6), "1,000");
        assert_eq!(format_amount(45000.0), "45,000");
        assert_eq!(format_amount(1234567.4), "1,234,567");
        assert_eq!(format_amount(-1500.0), "-1,500");
    }

    #[test]
    fn test_decline_filtering() {
        let (criteria, output) = run("n\n");

        assert_eq!(criteria, FilterCriteria::none());
        assert!(output.contains("Regions: East, North"));
        assert!(output.contains("Amount Range: ₹250 - ₹1,234,567"));
    }

    #[test]
    fn test_full_filter_dialogue() {
        let (criteria, _) = run("Y\nNorth\n1,000\n50000\n");

        assert_eq!(criteria.region.as_deref(), Some("North"));
        assert_eq!(criteria.min_amount, Some(1000.0));
        assert_eq!(criteria.max_amount, Some(50000.0));
    }

    #[test]
    fn test_blank_and_zero_answers_skip_filters() {
        let (criteria, _) = run("y\n\n0\n\n");
        assert!(!criteria.is_active());
    }

    #[test]
    fn test_invalid_amount_is_ignored() {
        let (criteria, output) = run("y\nEast\nlots\n100\n");

        assert_eq!(criteria.min_amount, None);
        assert_eq!(criteria.max_amount, Some(100.0));
        assert!(output.contains("Invalid amount 'lots'"));
    }

    #[test]
    fn test_end_of_input_means_no_filter() {
        let (criteria, _) = run("");
        assert_eq!(criteria, FilterCriteria::none());
    }
}

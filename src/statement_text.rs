use std::sync::OnceLock;

use regex::Regex;

use crate::fields::{parse_amount, parse_date, DateOrder};
use crate::models::{Direction, ExtractedRow};

/// Amounts outside this bound on a statement line are treated as noise
/// (account numbers, balances with OCR artifacts, page footers).
const MAX_PLAUSIBLE_AMOUNT: f64 = 1_000_000.0;

fn date_patterns() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            // DD.MM.YYYY / DD-MM-YYYY / DD/MM/YYYY
            Regex::new(r"\d{2}[.\-/]\d{2}[.\-/]\d{4}").unwrap(),
            // YYYY-MM-DD family
            Regex::new(r"\d{4}[.\-/]\d{2}[.\-/]\d{2}").unwrap(),
            // DD.MM.YY
            Regex::new(r"\d{2}[.\-/]\d{2}[.\-/]\d{2}").unwrap(),
        ]
    })
}

fn amount_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\s*\d[\d.,]*\s*(?:kr|DKK)?").unwrap())
}

/// Scan the concatenated text layer of a statement document for
/// date/amount/description triples, one candidate per qualifying line.
///
/// Statement text gives no polarity signal, so every candidate is a debit;
/// credits have to be fixed up in review.
pub fn extract(text: &str) -> (Vec<ExtractedRow>, usize) {
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // First matching date pattern wins; a line with no date is not a
        // transaction line.
        let Some(date_match) = date_patterns().iter().find_map(|re| re.find(line)) else {
            continue;
        };
        // Dates on these layouts are day-first.
        let normalized = date_match.as_str().replace(['.', '/'], "-");
        let Some(date) = parse_date(&normalized, DateOrder::DayFirst) else {
            skipped += 1;
            continue;
        };

        // Only look past the date so its digits never read as an amount.
        let rest = &line[date_match.end()..];
        let mut amount = None;
        let mut description = rest.to_string();
        for m in amount_pattern().find_iter(rest) {
            let value = parse_amount(m.as_str());
            if !value.is_nan() && value > 0.0 && value < MAX_PLAUSIBLE_AMOUNT && amount.is_none() {
                amount = Some(value);
            }
            description = description.replacen(m.as_str(), "", 1);
        }
        let Some(amount) = amount else {
            skipped += 1;
            continue;
        };

        let description = description.split_whitespace().collect::<Vec<_>>().join(" ");
        if description.chars().count() < 2 {
            skipped += 1;
            continue;
        }

        rows.push(ExtractedRow {
            date,
            description,
            amount,
            direction: Direction::Debit,
            source_row: line_no,
        });
    }

    (rows, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_danish_statement_line() {
        let (rows, skipped) = extract("15.01.2024 NETTO SUPERMARKED 342,50 kr\n");
        assert_eq!(skipped, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert_eq!(rows[0].amount, 342.5);
        assert_eq!(rows[0].description, "NETTO SUPERMARKED");
        assert_eq!(rows[0].direction, Direction::Debit);
    }

    #[test]
    fn test_iso_date_line() {
        let (rows, _) = extract("2024-01-15 FOTEX CITY 120.00\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert_eq!(rows[0].amount, 120.0);
    }

    #[test]
    fn test_short_year_line_is_day_first() {
        let (rows, _) = extract("05.03.24 REMA 1000 89,95 kr\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.format("%Y-%m-%d").to_string(), "2024-03-05");
    }

    #[test]
    fn test_lines_without_date_are_ignored_silently() {
        let (rows, skipped) = extract("Kontoudtog januar 2024\nSaldo: 12.345,67\n");
        assert!(rows.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_implausible_amounts_rejected() {
        let (rows, skipped) = extract("15.01.2024 WIRE REF 99999999999\n");
        assert!(rows.is_empty());
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_first_valid_amount_wins() {
        let (rows, _) = extract("15.01.2024 CIRCLE K 450,00 kr saldo 9.876,54\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, 450.0);
        assert!(rows[0].description.contains("CIRCLE K"));
    }

    #[test]
    fn test_too_short_description_skipped() {
        let (rows, skipped) = extract("15.01.2024 X 100,00\n");
        assert!(rows.is_empty());
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_multiple_lines_keep_order() {
        let text = "15.01.2024 NETTO SUPERMARKED 342,50 kr\n\
                    16.01.2024 DSB REJSEKORT 120,00 kr\n";
        let (rows, _) = extract(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "NETTO SUPERMARKED");
        assert_eq!(rows[1].description, "DSB REJSEKORT");
        assert!(rows[0].source_row < rows[1].source_row);
    }
}

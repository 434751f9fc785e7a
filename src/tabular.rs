use crate::error::{PennyError, Result};
use crate::fields::{parse_amount_signed, parse_date, DateOrder};
use crate::models::{ColumnMapping, Direction, ExtractedRow};

const DATE_HEADERS: &[&str] = &["date", "datum", "transaction date", "trans date", "posted"];
const DESC_HEADERS: &[&str] = &[
    "description",
    "desc",
    "omschrijving",
    "details",
    "narrative",
    "memo",
    "payee",
    "name",
];
const AMOUNT_HEADERS: &[&str] = &["amount", "bedrag", "value", "sum", "debit", "credit"];

/// One parsed CSV statement: header row, raw data rows, and the current
/// column mapping. The raw rows never change after parsing; extraction is a
/// pure function over them, so remapping columns just re-runs it.
#[derive(Debug, Clone)]
pub struct CsvStatement {
    pub headers: Vec<String>,
    rows: Vec<Vec<String>>,
    pub mapping: ColumnMapping,
}

/// Statement exports disagree on the delimiter; `,` unless the header row
/// clearly uses `;`.
fn sniff_delimiter(header_line: &str) -> u8 {
    let mut in_quotes = false;
    let (mut commas, mut semis) = (0usize, 0usize);
    for c in header_line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => commas += 1,
            ';' if !in_quotes => semis += 1,
            _ => {}
        }
    }
    if semis > commas {
        b';'
    } else {
        b','
    }
}

fn find_column(headers: &[String], needles: &[&str]) -> Option<usize> {
    for needle in needles {
        if let Some(idx) = headers.iter().position(|h| h.to_lowercase().contains(needle)) {
            return Some(idx);
        }
    }
    None
}

/// Scan lowercased headers for known column names; positional fallback when
/// nothing matches (date=0, description=1, amount=2).
pub fn detect_columns(headers: &[String]) -> ColumnMapping {
    let default = ColumnMapping::default();
    ColumnMapping {
        date: find_column(headers, DATE_HEADERS).unwrap_or(default.date),
        description: find_column(headers, DESC_HEADERS).unwrap_or(default.description),
        amount: find_column(headers, AMOUNT_HEADERS).unwrap_or(default.amount),
    }
}

impl CsvStatement {
    /// Parse raw CSV text. First line is the header; quoted fields with `""`
    /// escaping are honored. Fails with `EmptyInput` when there is no data
    /// row at all.
    pub fn parse(content: &str) -> Result<CsvStatement> {
        let header_line = content
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| PennyError::EmptyInput("file is empty".to_string()))?;
        let delimiter = sniff_delimiter(header_line);

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(content.as_bytes());

        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        for result in rdr.records() {
            let Ok(record) = result else { continue };
            let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }
            if headers.is_none() {
                headers = Some(fields);
            } else {
                rows.push(fields);
            }
        }

        let headers =
            headers.ok_or_else(|| PennyError::EmptyInput("file is empty".to_string()))?;
        if rows.is_empty() {
            return Err(PennyError::EmptyInput(
                "no data rows found in CSV file".to_string(),
            ));
        }

        let mapping = detect_columns(&headers);
        Ok(CsvStatement {
            headers,
            rows,
            mapping,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Extract candidate rows under the current mapping. Rows whose date or
    /// amount fail to parse are skipped and counted, not surfaced one by
    /// one. Negative source amounts are debits; non-negative are credits.
    pub fn extract(&self, order: DateOrder) -> (Vec<ExtractedRow>, usize) {
        let mut out = Vec::new();
        let mut skipped = 0usize;
        for (i, row) in self.rows.iter().enumerate() {
            let field = |col: usize| row.get(col).map(String::as_str).unwrap_or("");

            let Some(date) = parse_date(field(self.mapping.date), order) else {
                skipped += 1;
                continue;
            };
            let amount = parse_amount_signed(field(self.mapping.amount));
            if amount.is_nan() {
                skipped += 1;
                continue;
            }

            let direction = if amount < 0.0 {
                Direction::Debit
            } else {
                Direction::Credit
            };
            out.push(ExtractedRow {
                date,
                description: field(self.mapping.description).to_string(),
                amount: amount.abs(),
                direction,
                source_row: i,
            });
        }
        (out, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_extract_basic() {
        let stmt = CsvStatement::parse("Date,Description,Amount\n2024-01-15,Coffee Shop,-4.50\n")
            .unwrap();
        let (rows, skipped) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(skipped, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert_eq!(rows[0].description, "Coffee Shop");
        assert_eq!(rows[0].amount, 4.50);
        assert_eq!(rows[0].direction, Direction::Debit);
    }

    #[test]
    fn test_positive_amount_is_credit() {
        let stmt =
            CsvStatement::parse("Date,Description,Amount\n2024-01-31,SALARY JANUARY,2500.00\n")
                .unwrap();
        let (rows, _) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(rows[0].direction, Direction::Credit);
        assert_eq!(rows[0].amount, 2500.0);
    }

    #[test]
    fn test_column_detection_by_header_name() {
        let stmt = CsvStatement::parse(
            "Payee,Posted,Running Bal.,Value\nCoffee Shop,01/15/2024,0.00,-4.50\n",
        )
        .unwrap();
        assert_eq!(stmt.mapping.date, 1);
        assert_eq!(stmt.mapping.description, 0);
        assert_eq!(stmt.mapping.amount, 3);
        let (rows, _) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(rows[0].description, "Coffee Shop");
        assert_eq!(rows[0].amount, 4.5);
    }

    #[test]
    fn test_positional_fallback_when_headers_unknown() {
        let stmt = CsvStatement::parse("A,B,C\n2024-01-15,Thing,-1.00\n").unwrap();
        assert_eq!(stmt.mapping, ColumnMapping::default());
    }

    #[test]
    fn test_semicolon_delimiter_with_european_amounts() {
        let stmt = CsvStatement::parse(
            "Datum;Omschrijving;Bedrag\n15-01-2024;NETTO SUPERMARKED;-342,50\n",
        )
        .unwrap();
        let (rows, _) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert_eq!(rows[0].amount, 342.5);
    }

    #[test]
    fn test_quoted_fields_with_embedded_delimiter_and_escapes() {
        let stmt = CsvStatement::parse(
            "Date,Description,Amount\n2024-01-15,\"ACME, \"\"INC\"\"\",\"1,234.56\"\n",
        )
        .unwrap();
        let (rows, _) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(rows[0].description, "ACME, \"INC\"");
        assert_eq!(rows[0].amount, 1234.56);
    }

    #[test]
    fn test_invalid_rows_skipped_and_counted() {
        let stmt = CsvStatement::parse(
            "Date,Description,Amount\n\
             2024-01-15,Good Row,-4.50\n\
             not-a-date,Bad Date,-1.00\n\
             2024-01-16,Bad Amount,oops\n",
        )
        .unwrap();
        let (rows, skipped) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(rows.len(), 1);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_remapping_is_pure_over_raw_rows() {
        let mut stmt = CsvStatement::parse(
            "Date,Description,Amount,Fee\n2024-01-15,Coffee Shop,-4.50,-0.25\n",
        )
        .unwrap();
        let rows_before = stmt.rows().to_vec();
        let (first, _) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(first[0].amount, 4.5);

        stmt.mapping.amount = 3;
        let (remapped, _) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(remapped[0].amount, 0.25);
        assert_eq!(stmt.rows(), rows_before.as_slice());

        stmt.mapping.amount = 2;
        let (back, _) = stmt.extract(DateOrder::MonthFirst);
        assert_eq!(back[0].amount, first[0].amount);
    }

    #[test]
    fn test_empty_input_errors() {
        assert!(matches!(
            CsvStatement::parse(""),
            Err(PennyError::EmptyInput(_))
        ));
        assert!(matches!(
            CsvStatement::parse("Date,Description,Amount\n"),
            Err(PennyError::EmptyInput(_))
        ));
    }
}

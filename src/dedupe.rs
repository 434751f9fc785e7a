use std::collections::HashSet;

use chrono::Datelike;

use crate::models::Transaction;

fn cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Drop candidates that are structurally identical to an earlier one in the
/// same batch: same date, description, and amount (to the cent). Stable,
/// first occurrence wins.
///
/// Batch-local only. The committed ledger is not consulted, so the same
/// transaction can be re-imported from a second file.
pub fn dedupe(candidates: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen: HashSet<(i32, String, i64)> = HashSet::new();
    candidates
        .into_iter()
        .filter(|t| {
            seen.insert((
                t.date.num_days_from_ce(),
                t.description.clone(),
                cents(t.amount),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use crate::taxonomy::ParentCategory;
    use chrono::NaiveDate;

    fn txn(date: &str, desc: &str, amount: f64) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: desc.to_string(),
            amount,
            direction: Direction::Debit,
            parent: ParentCategory::Other,
            subcategory: None,
            source_row: 0,
        }
    }

    #[test]
    fn test_removes_exact_duplicates_keeps_first() {
        let out = dedupe(vec![
            txn("2024-01-15", "NETTO", 342.5),
            txn("2024-01-16", "DSB", 120.0),
            txn("2024-01-15", "NETTO", 342.5),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].description, "NETTO");
        assert_eq!(out[1].description, "DSB");
    }

    #[test]
    fn test_near_duplicates_survive() {
        let out = dedupe(vec![
            txn("2024-01-15", "NETTO", 342.5),
            txn("2024-01-16", "NETTO", 342.5),
            txn("2024-01-15", "NETTO", 342.51),
            txn("2024-01-15", "NETTO ", 342.5),
        ]);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_idempotent_and_order_preserving() {
        let input = vec![
            txn("2024-01-15", "A", 1.0),
            txn("2024-01-15", "B", 2.0),
            txn("2024-01-15", "A", 1.0),
            txn("2024-01-15", "C", 3.0),
        ];
        let once = dedupe(input);
        let descs: Vec<_> = once.iter().map(|t| t.description.clone()).collect();
        assert_eq!(descs, vec!["A", "B", "C"]);
        let twice = dedupe(once.clone());
        assert_eq!(twice.len(), once.len());
        let descs2: Vec<_> = twice.iter().map(|t| t.description.clone()).collect();
        assert_eq!(descs2, descs);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
